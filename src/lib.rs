use std::cmp::Ordering;

macro_rules! counter_impl {
    ($name:expr) => {
        pub struct CounterImpl;

        impl count_test_tools::Counter for CounterImpl {
            fn name() -> String {
                $name.into()
            }

            #[inline]
            fn count<T>(v: &mut [T]) -> u64
            where
                T: Ord,
            {
                count(v)
            }

            #[inline]
            fn count_by<T, F>(v: &mut [T], compare: F) -> u64
            where
                F: FnMut(&T, &T) -> Ordering,
            {
                count_by(v, compare)
            }
        }
    };
}

pub mod divide_and_conquer;
pub mod error;
pub mod merge;
pub mod natural;
pub mod runs;

pub use count_test_tools::{patterns, Counter};
pub use error::CountError;

/// Counts the inversions of `v` by recursive midpoint splitting. `v` is sorted afterwards.
#[inline]
pub fn count_divide_and_conquer<T: Ord>(v: &mut [T]) -> u64 {
    divide_and_conquer::count(v)
}

/// Counts the inversions of `v` by merging its pre-existing runs. `v` is sorted afterwards.
#[inline]
pub fn count_natural<T: Ord>(v: &mut [T]) -> u64 {
    natural::count(v)
}

/// Checked entry point for callers that may not have a sequence at hand.
///
/// Fails with [`CountError::InvalidInput`] before doing any work if `v` is `None`. An empty slice
/// is valid input and yields 0.
pub fn try_count<C, T>(v: Option<&mut [T]>) -> Result<u64, CountError>
where
    C: Counter,
    T: Ord,
{
    let v = v.ok_or(CountError::InvalidInput)?;
    Ok(C::count(v))
}

/// Like [`try_count`], with a custom comparison.
pub fn try_count_by<C, T, F>(v: Option<&mut [T]>, compare: F) -> Result<u64, CountError>
where
    C: Counter,
    F: FnMut(&T, &T) -> Ordering,
{
    let v = v.ok_or(CountError::InvalidInput)?;
    Ok(C::count_by(v, compare))
}
