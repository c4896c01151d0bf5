//! The merge-and-count primitive shared by all counters.

use std::ptr;

/// Scratch storage for [`merge_and_count`].
///
/// Allocated once per top-level counting call and reused by every merge of that call. The backing
/// `Vec` never has a non-zero length, elements are only ever bitwise copies of slice elements, so
/// dropping the buffer never drops a `T`.
pub struct ScratchBuf<T> {
    buf: Vec<T>,
}

impl<T> ScratchBuf<T> {
    /// Creates a buffer able to merge slices of up to `len` elements.
    pub fn with_len(len: usize) -> Self {
        Self {
            buf: Vec::with_capacity(len),
        }
    }

    /// The longest slice this buffer can merge.
    fn capacity(&self) -> usize {
        self.buf.capacity()
    }
}

/// Merges the non-decreasing partitions `v[..mid]` and `v[mid..]` into a non-decreasing `v`, and
/// returns the number of pairs `(x, y)`, `x` from the left partition and `y` from the right one,
/// with `y < x`.
///
/// The right element is only taken first if it is strictly less than the left one, so equal
/// elements are never counted and keep their relative order. Performs exactly `v.len()` element
/// moves into `scratch` and back, and at most `v.len() - 1` comparisons.
///
/// If `is_less` panics, `v` is left untouched.
///
/// # Panics
///
/// Panics if `mid > v.len()` or `scratch` is shorter than `v`.
pub fn merge_and_count<T, F>(
    v: &mut [T],
    mid: usize,
    scratch: &mut ScratchBuf<T>,
    is_less: &mut F,
) -> u64
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    assert!(mid <= len, "mid {mid} out of bounds for length {len}");
    assert!(
        scratch.capacity() >= len,
        "scratch of length {} too short for length {len}",
        scratch.capacity()
    );

    if mid == 0 || mid == len {
        return 0;
    }

    let v_ptr = v.as_mut_ptr();
    let buf_ptr = scratch.buf.as_mut_ptr();

    let mut inversions = 0u64;
    let mut left = 0;
    let mut right = mid;
    let mut out = 0;

    // SAFETY: left < mid, mid <= right < len and out == (left + right - mid) < len, so every read
    // is in bounds of `v` and every write in bounds of the `len` element capacity of `scratch`.
    // `v` is only read until the final copy back, so a panic in `is_less` leaves it as it was and
    // `scratch`, which has length 0, never drops the copies it holds.
    unsafe {
        while left < mid && right < len {
            let take_right = is_less(&*v_ptr.add(right), &*v_ptr.add(left));

            if take_right {
                ptr::copy_nonoverlapping(v_ptr.add(right), buf_ptr.add(out), 1);
                right += 1;
                // Everything still pending on the left is >= the element just taken, so all of it
                // is inverted against it.
                inversions += (mid - left) as u64;
            } else {
                ptr::copy_nonoverlapping(v_ptr.add(left), buf_ptr.add(out), 1);
                left += 1;
            }

            out += 1;
        }

        let left_rest = mid - left;
        ptr::copy_nonoverlapping(v_ptr.add(left), buf_ptr.add(out), left_rest);
        out += left_rest;

        ptr::copy_nonoverlapping(v_ptr.add(right), buf_ptr.add(out), len - right);

        ptr::copy_nonoverlapping(buf_ptr, v_ptr, len);
    }

    inversions
}
