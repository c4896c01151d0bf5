use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::benchmark::Measurement;
use crate::config::{CounterKind, PatternKind, TrialConfig};
use crate::measure::Summary;

/// By versioning the result files, we can catch compatibility issues early.
const REPORT_VERSION: usize = 1;

#[derive(Debug, Serialize)]
pub struct Report {
    pub version: usize,
    pub len: usize,
    pub min: i32,
    pub max: i32,
    pub run_len: usize,
    pub forks: usize,
    pub results: Vec<ReportEntry>,
}

#[derive(Debug, Serialize)]
pub struct ReportEntry {
    pub counter: CounterKind,
    pub pattern: PatternKind,
    /// Count of the last fork, forks generate different inputs.
    pub inversions: u64,
    #[serde(flatten)]
    pub summary: Summary,
}

impl Report {
    pub fn new(config: &TrialConfig, measurements: &[Measurement]) -> anyhow::Result<Self> {
        let results = measurements
            .iter()
            .map(|measurement| {
                let summary = Summary::analyze(&measurement.durations).with_context(|| {
                    format!(
                        "too few samples for {} on {}",
                        measurement.counter.name(),
                        measurement.pattern.name()
                    )
                })?;

                Ok(ReportEntry {
                    counter: measurement.counter,
                    pattern: measurement.pattern,
                    inversions: measurement.inversions,
                    summary,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            version: REPORT_VERSION,
            len: config.len,
            min: config.min,
            max: config.max,
            run_len: config.run_len,
            forks: config.forks,
            results,
        })
    }

    pub fn print(&self) {
        println!(
            "{:<20} {:<10} {:>16} {:>8} {:>12} {:>12} {:>12} {:>12} {:>7}",
            "counter", "input", "inversions", "samples", "median ms", "mean ms", "min ms", "max ms",
            "spread"
        );

        for entry in &self.results {
            let summary = &entry.summary;
            println!(
                "{:<20} {:<10} {:>16} {:>8} {:>12.3} {:>12.3} {:>12.3} {:>12.3} {:>7.3}",
                entry.counter.name(),
                entry.pattern.name(),
                entry.inversions,
                summary.samples,
                summary.median_ms,
                summary.mean_ms,
                summary.min_ms,
                summary.max_ms,
                summary.spread,
            );
        }
    }

    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize results")?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;

        Ok(())
    }
}
