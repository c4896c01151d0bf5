pub trait Counter {
    fn name() -> String;

    fn count<T>(v: &mut [T]) -> u64
    where
        T: Ord;

    fn count_by<T, F>(v: &mut [T], compare: F) -> u64
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering;
}

pub mod oracle;
pub mod patterns;
