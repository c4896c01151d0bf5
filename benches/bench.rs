use std::env;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use inversion_count::{divide_and_conquer, natural, patterns, Counter};

// Same value range and run length as the presorted input of inversion-bench.
const VALUE_RANGE: std::ops::RangeInclusive<i32> = -100_000..=100_000;
const PRESORTED_RUN_LEN: usize = 2_000;

fn pin_thread_to_core() {
    use std::cell::Cell;
    let pin_core_id: usize = 2;

    thread_local! {static AFFINITY_ALREADY_SET: Cell<bool> = Cell::new(false); }

    // Set affinity only once per thread.
    AFFINITY_ALREADY_SET.with(|affinity_already_set| {
        if !affinity_already_set.get() {
            if let Some(core_id_2) = core_affinity::get_core_ids()
                .as_ref()
                .and_then(|ids| ids.get(pin_core_id))
            {
                core_affinity::set_for_current(*core_id_2);
            }

            affinity_already_set.set(true);
        }
    });
}

#[inline(never)]
fn bench_count<T: Ord + std::fmt::Debug>(
    c: &mut Criterion,
    test_len: usize,
    transform_name: &str,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
    bench_name: &str,
    count_func: impl Fn(&mut [T]) -> u64,
) {
    // Pin the benchmark to the same core to improve repeatability. Doing it this way allows
    // criterion to do other stuff with other threads, which greatly impacts overall benchmark
    // throughput.
    pin_thread_to_core();

    let batch_size = if test_len > 30 {
        BatchSize::LargeInput
    } else {
        BatchSize::SmallInput
    };

    c.bench_function(
        &format!("{bench_name}-hot-{transform_name}-{pattern_name}-{test_len}"),
        |b| {
            b.iter_batched(
                || transform(pattern_provider(test_len)),
                |mut test_data| count_func(black_box(test_data.as_mut_slice())),
                batch_size,
            )
        },
    );
}

fn measure_comp_count<C: Counter, T: Ord + std::fmt::Debug>(
    name: &str,
    test_len: usize,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_provider: &fn(usize) -> Vec<i32>,
) {
    // Measure how many comparisons are performed by a specific implementation and input
    // combination.
    let run_count: usize = if test_len <= 20 {
        100_000
    } else if test_len < 10_000 {
        3000
    } else if test_len < 100_000 {
        1000
    } else if test_len < 1_000_000 {
        100
    } else {
        10
    };

    let mut comp_count = 0u64;

    // Instrument via count_by to ensure the type properties such as Copy of the type
    // that is being counted doesn't change. And we get representative numbers.
    for _ in 0..run_count {
        let mut test_data = transform(pattern_provider(test_len));
        C::count_by(black_box(test_data.as_mut_slice()), |a, b| {
            comp_count += 1;
            a.cmp(b)
        });
    }

    // If there is on average less than a single comparison this will be wrong.
    // But that's such a corner case I don't care about it.
    let total = comp_count / (run_count as u64);
    println!("{name}: mean comparisons: {total}");
}

#[inline(never)]
fn bench_impl<C: Counter, T: Ord + std::fmt::Debug>(
    c: &mut Criterion,
    test_len: usize,
    transform_name: &str,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
) {
    let bench_name = C::name();

    if env::var("MEASURE_COMP").is_ok() {
        let name = format!("{bench_name}-comp-{transform_name}-{pattern_name}-{test_len}");
        measure_comp_count::<C, T>(&name, test_len, transform, pattern_provider);
    } else {
        bench_count(
            c,
            test_len,
            transform_name,
            transform,
            pattern_name,
            pattern_provider,
            &bench_name,
            C::count,
        );
    }
}

fn bench_patterns<T: Ord + std::fmt::Debug>(
    c: &mut Criterion,
    test_len: usize,
    transform_name: &str,
    transform: fn(Vec<i32>) -> Vec<T>,
) {
    if test_len > 100_000 && transform_name != "i32" {
        // These are just too expensive.
        return;
    }

    let pattern_providers: Vec<(&'static str, fn(usize) -> Vec<i32>)> = vec![
        ("random", |len| patterns::random_uniform(len, VALUE_RANGE)),
        ("presorted", |len| {
            patterns::presorted_uniform(len, PRESORTED_RUN_LEN, VALUE_RANGE)
        }),
        ("random_dense", |len| {
            patterns::random_uniform(len, 0..=(((len as f64).log2().round()) as i32))
        }),
        ("ascending", patterns::ascending),
        ("descending", patterns::descending),
        ("saws_long", |len| {
            patterns::saw_ascending(len, ((len as f64).log2().round()) as usize)
        }),
        ("saws_short", |len| {
            patterns::saw_ascending(len, (len as f64 / 22.0).round() as usize)
        }),
    ];

    for (pattern_name, pattern_provider) in pattern_providers.iter() {
        if test_len < 3 && *pattern_name != "random" {
            continue;
        }

        bench_impl::<divide_and_conquer::CounterImpl, T>(
            c,
            test_len,
            transform_name,
            &transform,
            pattern_name,
            pattern_provider,
        );

        bench_impl::<natural::CounterImpl, T>(
            c,
            test_len,
            transform_name,
            &transform,
            pattern_name,
            pattern_provider,
        );
    }
}

fn ensure_true_random() {
    // Ensure that random vecs are actually different.
    let random_vec_a = patterns::random(5);
    let random_vec_b = patterns::random(5);

    // The fixed seed used for tests would make every benchmark input the same.
    assert_ne!(random_vec_a, random_vec_b);
}

fn criterion_benchmark(c: &mut Criterion) {
    let test_lens = [
        0, 1, 2, 3, 8, 20, 50, 101, 500, 1_000, 2_048, 10_000, 100_000, 1_000_000,
    ];

    patterns::disable_fixed_seed();
    ensure_true_random();

    for test_len in test_lens {
        // Basic type often used to test counting algorithms.
        bench_patterns(c, test_len, "i32", |values| values);

        // Common type for usize on 64-bit machines.
        bench_patterns(c, test_len, "u64", |values| {
            values
                .iter()
                .map(|val| -> u64 {
                    // Extends the value into the 64 bit range,
                    // while preserving input order.
                    let x = ((*val as i64) + (i32::MAX as i64) + 1) as u64;
                    x.checked_mul(i32::MAX as u64).unwrap()
                })
                .collect()
        });

        // Every element behind its own allocation, so each comparison chases a pointer.
        bench_patterns(c, test_len, "boxed_i32", |values| {
            values.into_iter().map(Box::new).collect()
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
