#![no_main]

use libfuzzer_sys::fuzz_target;

use count_test_tools::oracle;

fuzz_target!(|data: &[u8]| {
    let expected = oracle::reference_inversions(data);

    let mut a = data.to_vec();
    let mut b = data.to_vec();

    assert_eq!(inversion_count::count_divide_and_conquer(&mut a), expected);
    assert_eq!(inversion_count::count_natural(&mut b), expected);

    assert!(oracle::is_sorted_by(&a, |x, y| x.cmp(y)));
    assert_eq!(a, b);
});
