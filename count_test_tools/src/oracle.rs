//! Reference inversion counts that share no code with the counters under test.

use std::cmp::Ordering;

/// Compares every pair. O(n²), only meant for short inputs.
pub fn brute_force_inversions<T: Ord>(v: &[T]) -> u64 {
    let mut inversions = 0;

    for i in 0..v.len() {
        for j in (i + 1)..v.len() {
            if v[i] > v[j] {
                inversions += 1;
            }
        }
    }

    inversions
}

/// Counts with a Fenwick tree over the ranks of the elements. O(n log n).
///
/// Elements are visited in ascending order, ties by ascending index. When an element at index `i`
/// is visited, every already visited element at an index above `i` is strictly less than it, so
/// summing those gives the inversions that element heads.
pub fn fenwick_inversions<T: Ord>(v: &[T]) -> u64 {
    let n = v.len();
    let ord = {
        let mut ord: Vec<_> = (0..n).collect();
        ord.sort_unstable_by(|&il, &ir| v[il].cmp(&v[ir]).then_with(|| il.cmp(&ir)));
        ord
    };

    let mut res = 0u64;
    // 1-based, sum[i] covers the visited flags of the indices (i - lowbit(i), i].
    let mut sum = vec![0u64; n + 1];

    for i in ord.into_iter().map(|i| i + 1) {
        res += prefix_sum(&sum, n) - prefix_sum(&sum, i);

        let mut i = i;
        while i <= n {
            sum[i] += 1;
            i += i & i.wrapping_neg();
        }
    }

    res
}

fn prefix_sum(sum: &[u64], mut i: usize) -> u64 {
    let mut res = 0;
    while i > 0 {
        res += sum[i];
        i -= i & i.wrapping_neg();
    }

    res
}

/// Picks the cheapest oracle that is still trustworthy for `v`.
pub fn reference_inversions<T: Ord>(v: &[T]) -> u64 {
    if v.len() <= 500 {
        brute_force_inversions(v)
    } else {
        fenwick_inversions(v)
    }
}

/// `n · (n − 1) / 2`, the inversion count of any strictly descending sequence of length `n`.
pub fn max_inversions(n: usize) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1) / 2
}

/// Whether `v` is non-decreasing under `compare`.
pub fn is_sorted_by<T>(v: &[T], mut compare: impl FnMut(&T, &T) -> Ordering) -> bool {
    v.windows(2)
        .all(|w| compare(&w[0], &w[1]) != Ordering::Greater)
}

#[test]
fn sanity_check() {
    for f in [brute_force_inversions::<i32>, fenwick_inversions::<i32>] {
        assert_eq!(f(&[1, 5, 4, 2, 3]), 5);
        assert_eq!(f(&[5, 3, 4, 1, 2]), 8);
        assert_eq!(f(&[1, 2, 3, 4, 5]), 0);
        assert_eq!(f(&[5, 4, 3, 2, 1]), 10);
        assert_eq!(f(&[1, 1, 1, 1, 1]), 0);
        assert_eq!(f(&[2, 1, 2, 1]), 3);
        assert_eq!(f(&[]), 0);
    }

    assert_eq!(max_inversions(0), 0);
    assert_eq!(max_inversions(1), 0);
    assert_eq!(max_inversions(1_000_000), 499_999_500_000);
}
