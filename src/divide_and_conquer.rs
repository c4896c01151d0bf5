use std::cmp::Ordering;
use std::mem;

use crate::merge::{merge_and_count, ScratchBuf};

counter_impl!("divide_and_conquer");

#[inline]
pub fn count<T>(v: &mut [T]) -> u64
where
    T: Ord,
{
    divide_and_conquer_count(v, |a, b| a.lt(b))
}

#[inline]
pub fn count_by<T, F>(v: &mut [T], mut compare: F) -> u64
where
    F: FnMut(&T, &T) -> Ordering,
{
    divide_and_conquer_count(v, |a, b| compare(a, b) == Ordering::Less)
}

////////////////////////////////////////////////////////////////////////////////
// Counting
////////////////////////////////////////////////////////////////////////////////

fn divide_and_conquer_count<T, F>(v: &mut [T], mut is_less: F) -> u64
where
    F: FnMut(&T, &T) -> bool,
{
    if mem::size_of::<T>() == 0 {
        // All values of a zero-sized type are equal under a valid total order.
        return 0;
    }

    if v.len() < 2 {
        return 0;
    }

    let mut scratch = ScratchBuf::with_len(v.len());
    count_recursive(v, &mut scratch, &mut is_less)
}

/// Sorts `v` and returns its inversion count. The split point only depends on the length, so every
/// input of length n goes through the same ⌈log2 n⌉ levels of merges.
fn count_recursive<T, F>(v: &mut [T], scratch: &mut ScratchBuf<T>, is_less: &mut F) -> u64
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len <= 1 {
        return 0;
    }

    let mid = len / 2;
    let (left, right) = v.split_at_mut(mid);

    let left_count = count_recursive(left, scratch, is_less);
    let right_count = count_recursive(right, scratch, is_less);

    left_count + right_count + merge_and_count(v, mid, scratch, is_less)
}
