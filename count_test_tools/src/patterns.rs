use std::env;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::prelude::*;

use once_cell::sync::OnceCell;

/// Provides a set of input patterns useful for testing and benchmarking inversion counters.
/// Currently limited to i32 values.

// --- Public ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    random_vec(len)
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>>,
{
    // :.:.:.::
    let mut rng = rand::rngs::StdRng::from(new_seed());

    random_uniform_from(&mut rng, len, range)
}

/// Like [`random_uniform`], but draws from `rng` instead of a freshly seeded generator. Repeated
/// calls with the same `rng` yield independent values rather than prefixes of one sequence.
pub fn random_uniform_from<R>(rng: &mut StdRng, len: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>>,
{
    // Abstracting over ranges in Rust :(
    let dist: rand::distributions::Uniform<i32> = range.into();

    (0..len).map(|_| dist.sample(rng)).collect()
}

/// A generator seeded from [`random_init_seed`], for tests that draw many inputs in a row.
pub fn seeded_rng() -> StdRng {
    new_seed()
}

/// Random values from `range` where every chunk of `run_len` values is sorted on its own, the last
/// chunk may be shorter. Chunk boundaries are left as they fall, so the result has at most
/// ⌈len / run_len⌉ runs.
pub fn presorted_uniform<R>(len: usize, run_len: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>>,
{
    //   .:  .:  .:
    // .:::.:::.:::

    let mut vals = random_uniform(len, range);

    for chunk in vals.chunks_mut(run_len.max(1)) {
        chunk.sort();
    }

    vals
}

pub fn random_sorted(len: usize, sorted_percent: f64) -> Vec<i32> {
    //     .:
    //   .:::. :
    // .::::::.::
    // [----][--]
    //  ^      ^
    //  |      |
    // sorted  |
    //     unsorted

    let mut v = random_vec(len);
    let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;

    v[0..sorted_len].sort_unstable();

    v
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    (0..len).map(|_| 66).collect::<Vec<_>>()
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect::<Vec<_>>()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect::<Vec<_>>()
}

pub fn saw_ascending(len: usize, saw_count: usize) -> Vec<i32> {
    //   .:  .:
    // .:::.:::

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random_vec(len);
    let chunks_len = (len / saw_count.max(1)).max(1);

    for chunk in vals.chunks_mut(chunks_len) {
        chunk.sort();
    }

    vals
}

pub fn saw_descending(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.
    // :::.:::.

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random_vec(len);
    let chunks_len = (len / saw_count.max(1)).max(1);

    for chunk in vals.chunks_mut(chunks_len) {
        chunk.sort_by_key(|&e| std::cmp::Reverse(e));
    }

    vals
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut vals = random_vec(len);

    let first_half = &mut vals[0..(len / 2)];
    first_half.sort();

    let second_half = &mut vals[(len / 2)..len];
    second_half.sort_by_key(|&e| std::cmp::Reverse(e));

    vals
}

static USE_FIXED_SEED: AtomicBool = AtomicBool::new(true);
static FIXED_SEED: OnceCell<u64> = OnceCell::new();

/// Makes every call to a random derived pattern draw a new seed.
///
/// By default `patterns::random(4)` yields the same values for the whole process, which keeps
/// test failures reproducible. Benchmarks should call this.
pub fn disable_fixed_seed() {
    USE_FIXED_SEED.store(false, Ordering::Release);
}

/// Pins the per-process seed to `seed`. Returns `false` if a pattern was already generated with
/// another seed, in which case nothing changes.
pub fn set_fixed_seed(seed: u64) -> bool {
    let pinned = FIXED_SEED.set(seed).is_ok() || FIXED_SEED.get() == Some(&seed);
    if pinned {
        USE_FIXED_SEED.store(true, Ordering::Release);
    }

    pinned
}

/// The seed used for the next random pattern. Set `OVERRIDE_SEED` to replay a failing run.
pub fn random_init_seed() -> u64 {
    if USE_FIXED_SEED.load(Ordering::Acquire) {
        *FIXED_SEED.get_or_init(|| -> u64 {
            env::var("OVERRIDE_SEED")
                .ok()
                .and_then(|seed| u64::from_str(&seed).ok())
                .unwrap_or_else(|| thread_rng().gen())
        })
    } else {
        thread_rng().gen()
    }
}

// --- Private ---

fn new_seed() -> StdRng {
    rand::SeedableRng::seed_from_u64(random_init_seed())
}

fn random_vec(len: usize) -> Vec<i32> {
    let mut rng = rand::rngs::StdRng::from(new_seed());

    (0..len).map(|_| rng.gen::<i32>()).collect()
}
