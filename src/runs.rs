//! Detection of maximal non-decreasing runs.

use std::ops::Range;

/// Scans `v` once and returns the boundaries of its maximal non-decreasing runs.
///
/// The result holds the start index of every run followed by `v.len()`, so run `i` is
/// `bounds[i]..bounds[i + 1]`. Empty input yields `[0]`, which describes zero runs. A new run
/// starts wherever an element is strictly less than its predecessor, so equal neighbours stay in
/// the same run.
pub fn find_run_bounds<T, F>(v: &[T], is_less: &mut F) -> Vec<usize>
where
    F: FnMut(&T, &T) -> bool,
{
    let mut bounds = vec![0];

    for i in 1..v.len() {
        if is_less(&v[i], &v[i - 1]) {
            bounds.push(i);
        }
    }

    if !v.is_empty() {
        bounds.push(v.len());
    }

    bounds
}

/// Returns the maximal non-decreasing runs of `v` in order. Together they cover `v` exactly.
pub fn find_runs<T, F>(v: &[T], mut is_less: F) -> Vec<Range<usize>>
where
    F: FnMut(&T, &T) -> bool,
{
    find_run_bounds(v, &mut is_less)
        .windows(2)
        .map(|w| w[0]..w[1])
        .collect()
}

#[inline]
pub fn runs<T: Ord>(v: &[T]) -> Vec<Range<usize>> {
    find_runs(v, |a, b| a.lt(b))
}
