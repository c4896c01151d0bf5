#![no_main]

use libfuzzer_sys::fuzz_target;

use count_test_tools::oracle;

// Wider values than u8 produce long runs and few duplicates.
fn bytes_as_i32(data: &[u8]) -> Vec<i32> {
    data.chunks_exact(4)
        .map(|bytes| i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}

fuzz_target!(|data: &[u8]| {
    let v = bytes_as_i32(data);
    let expected = oracle::reference_inversions(&v);

    let mut a = v.clone();
    let mut b = v;

    assert_eq!(inversion_count::count_divide_and_conquer(&mut a), expected);
    assert_eq!(inversion_count::count_natural(&mut b), expected);
    assert_eq!(a, b);
});
