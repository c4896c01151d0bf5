use count_test_tools::instantiate_count_tests;
use count_test_tools::oracle;
use count_test_tools::Counter;

struct CounterImpl {}

impl Counter for CounterImpl {
    fn name() -> String {
        "fenwick_reference".into()
    }

    fn count<T>(v: &mut [T]) -> u64
    where
        T: Ord,
    {
        let inversions = oracle::fenwick_inversions(v);
        v.sort();
        inversions
    }

    fn count_by<T, F>(v: &mut [T], mut compare: F) -> u64
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        // Binary insertion sort, an element inserted at `lo` jumps over `i - lo` strictly greater
        // elements.
        let mut inversions = 0;
        for i in 1..v.len() {
            let (mut lo, mut hi) = (0, i);
            while lo < hi {
                let mid = lo + (hi - lo) / 2;
                if compare(&v[i], &v[mid]) == std::cmp::Ordering::Less {
                    hi = mid;
                } else {
                    lo = mid + 1;
                }
            }

            inversions += (i - lo) as u64;
            v[lo..=i].rotate_right(1);
        }
        inversions
    }
}

instantiate_count_tests!(CounterImpl);
