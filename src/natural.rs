use std::cmp::Ordering;
use std::mem;

use crate::merge::{merge_and_count, ScratchBuf};
use crate::runs::find_run_bounds;

counter_impl!("natural");

/// What a natural merge count did, besides sorting its input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NaturalStats {
    pub inversions: u64,
    /// Maximal non-decreasing runs found in the input.
    pub initial_runs: usize,
    /// Merge passes until a single run remained, ⌈log2 initial_runs⌉.
    pub merge_passes: usize,
}

#[inline]
pub fn count<T>(v: &mut [T]) -> u64
where
    T: Ord,
{
    natural_count(v, |a, b| a.lt(b)).inversions
}

#[inline]
pub fn count_by<T, F>(v: &mut [T], mut compare: F) -> u64
where
    F: FnMut(&T, &T) -> Ordering,
{
    natural_count(v, |a, b| compare(a, b) == Ordering::Less).inversions
}

#[inline]
pub fn count_with_stats<T>(v: &mut [T]) -> NaturalStats
where
    T: Ord,
{
    natural_count(v, |a, b| a.lt(b))
}

#[inline]
pub fn count_with_stats_by<T, F>(v: &mut [T], mut compare: F) -> NaturalStats
where
    F: FnMut(&T, &T) -> Ordering,
{
    natural_count(v, |a, b| compare(a, b) == Ordering::Less)
}

////////////////////////////////////////////////////////////////////////////////
// Counting
////////////////////////////////////////////////////////////////////////////////

fn natural_count<T, F>(v: &mut [T], mut is_less: F) -> NaturalStats
where
    F: FnMut(&T, &T) -> bool,
{
    if mem::size_of::<T>() == 0 {
        // All values of a zero-sized type are equal under a valid total order, so they form a
        // single run.
        return NaturalStats {
            initial_runs: usize::from(!v.is_empty()),
            ..NaturalStats::default()
        };
    }

    let mut bounds = find_run_bounds(v, &mut is_less);
    let initial_runs = bounds.len() - 1;

    let mut stats = NaturalStats {
        initial_runs,
        ..NaturalStats::default()
    };

    if initial_runs <= 1 {
        return stats;
    }

    let mut scratch = ScratchBuf::with_len(v.len());

    while bounds.len() > 2 {
        stats.inversions += merge_pass(v, &mut bounds, &mut scratch, &mut is_less);
        stats.merge_passes += 1;
    }

    stats
}

/// Merges runs `2i` and `2i + 1` for every `i`, left to right, and rewrites `bounds` in place to
/// describe the merged runs. An unpaired last run is carried over as is. Returns the inversions
/// found between the merged pairs.
fn merge_pass<T, F>(
    v: &mut [T],
    bounds: &mut Vec<usize>,
    scratch: &mut ScratchBuf<T>,
    is_less: &mut F,
) -> u64
where
    F: FnMut(&T, &T) -> bool,
{
    let run_count = bounds.len() - 1;
    let mut inversions = 0;

    // bounds[0] is always 0. Writes trail reads, run r is read from bounds[r..=r + 2] after at
    // most r / 2 + 1 slots have been rewritten.
    let mut write = 1;
    let mut run = 0;

    while run + 1 < run_count {
        let start = bounds[run];
        let mid = bounds[run + 1];
        let end = bounds[run + 2];

        inversions += merge_and_count(&mut v[start..end], mid - start, scratch, is_less);

        bounds[write] = end;
        write += 1;
        run += 2;
    }

    if run < run_count {
        bounds[write] = bounds[run + 1];
        write += 1;
    }

    bounds.truncate(write);

    inversions
}
