//! This module implements functionality for measuring the duration of some task and summarizing
//! repeated measurements.

use std::cmp;
use std::hint::black_box;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Measures the time it takes to execute the function `test_fn`, and hands back its result.
#[inline(never)]
pub fn measure_duration<R>(test_fn: impl FnOnce() -> R) -> (Duration, R) {
    let start = Instant::now();

    let result = black_box(test_fn());

    (start.elapsed(), result)
}

/// Summary of the timed iterations of one counter on one input kind, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub samples: usize,
    pub median_ms: f64,
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    /// Ratio between the samples 10% above and 10% below the median. Close to 1.0 on a quiet
    /// machine.
    pub spread: f64,
}

impl Summary {
    /// Analyzes multiple measurement samples. Returns `None` for fewer than 3 samples.
    pub fn analyze(durations: &[Duration]) -> Option<Self> {
        let len = durations.len();

        if len < 3 {
            return None;
        }

        let mut sorted = durations.iter().map(as_ms).collect::<Vec<_>>();
        sorted.sort_unstable_by(f64::total_cmp);

        let mid = len / 2;
        let offset = cmp::max((len as f64 / 10.0).round() as usize, 1).min(mid);
        let upper = sorted[cmp::min(mid + offset, len - 1)];
        let lower = sorted[mid - offset];

        Some(Self {
            samples: len,
            median_ms: sorted[mid],
            mean_ms: sorted.iter().sum::<f64>() / len as f64,
            min_ms: sorted[0],
            max_ms: sorted[len - 1],
            spread: if lower > 0.0 { upper / lower } else { 1.0 },
        })
    }
}

fn as_ms(duration: &Duration) -> f64 {
    // Uses f64 to allow for sub-millisecond precision.
    duration.as_secs_f64() * 1e3
}
