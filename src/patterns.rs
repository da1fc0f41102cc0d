use std::sync::atomic::{AtomicBool, Ordering};

use rand::prelude::*;

use once_cell::sync::OnceCell;

use crate::config::qualification_threshold;

/// Provides a set of patterns useful for testing and benchmarking sorting algorithms.
/// Currently limited to i32 values.

// --- Public ---

pub fn random(size: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    random_vec(size)
}

pub fn random_uniform<R>(size: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>>,
{
    // :.:.:.::
    let mut rng = new_seed();

    // Abstracting over ranges in Rust :(
    let dist: rand::distributions::Uniform<i32> = range.into();

    (0..size).map(|_| dist.sample(&mut rng)).collect()
}

pub fn shuffled(size: usize) -> Vec<i32> {
    // Permutation of 0..size.

    let mut vals = ascending(size);
    vals.shuffle(&mut new_seed());
    vals
}

pub fn shuffled_16_values(size: usize) -> Vec<i32> {
    let mut vals: Vec<i32> = (0..size as i32).map(|i| i % 16).collect();
    vals.shuffle(&mut new_seed());
    vals
}

pub fn all_equal(size: usize) -> Vec<i32> {
    // ......
    // ::::::

    (0..size).map(|_| 66).collect::<Vec<_>>()
}

pub fn ascending(size: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..size as i32).collect::<Vec<_>>()
}

pub fn descending(size: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..size as i32).rev().collect::<Vec<_>>()
}

pub fn pipe_organ(size: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let half = size / 2;
    (0..half)
        .chain((half..size).map(|i| size - i))
        .map(|x| x as i32)
        .collect()
}

pub fn push_front(size: usize) -> Vec<i32> {
    //    .:
    //  .:::
    // .::::.

    if size == 0 {
        return Vec::new();
    }

    (1..size as i32).chain(std::iter::once(0)).collect()
}

pub fn push_middle(size: usize) -> Vec<i32> {
    //    .:
    //  .:::
    // .::::.  with the value missing in the middle appended.

    let middle = size / 2;
    (0..size)
        .filter(|&i| i != middle)
        .chain(std::iter::once(middle).filter(|_| size > 0))
        .map(|x| x as i32)
        .collect()
}

pub fn ascending_sawtooth(size: usize) -> Vec<i32> {
    //   .:  .:  .:
    // .:::.:::.:::
    //
    // Teeth are a bit longer than the shortest run vergesort keeps.

    let tooth = sawtooth_len(size);
    (0..size).map(|i| (i % tooth) as i32).collect()
}

pub fn descending_sawtooth(size: usize) -> Vec<i32> {
    // :.  :.  :.
    // :::.:::.:::.

    let tooth = sawtooth_len(size);
    (0..size).rev().map(|i| (i % tooth) as i32).collect()
}

pub fn alternating(size: usize) -> Vec<i32> {
    // Every other value negated: -0, 1, -2, 3, ...

    (0..size as i32)
        .map(|i| if i % 2 == 0 { -i } else { i })
        .collect()
}

pub fn alternating_16_values(size: usize) -> Vec<i32> {
    (0..size as i32)
        .map(|i| if i % 2 == 0 { -(i % 16) } else { i % 16 })
        .collect()
}

pub fn saw_mixed(size: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    if size == 0 {
        return Vec::new();
    }

    let mut vals = random_vec(size);
    let chunks_size = (size / saw_count.max(1)).max(1);
    let saw_directions = random_uniform((size / chunks_size) + 1, 0..=1);

    for (i, chunk) in vals.chunks_mut(chunks_size).enumerate() {
        if saw_directions[i] == 0 {
            chunk.sort();
        } else {
            chunk.sort_by_key(|&e| std::cmp::Reverse(e));
        }
    }

    vals
}

/// Every named pattern with a length-only signature, in the order the benchmark runs them.
pub fn named() -> Vec<(&'static str, fn(usize) -> Vec<i32>)> {
    vec![
        ("shuffled", shuffled),
        ("shuffled_16_values", shuffled_16_values),
        ("all_equal", all_equal),
        ("ascending", ascending),
        ("descending", descending),
        ("pipe_organ", pipe_organ),
        ("push_front", push_front),
        ("push_middle", push_middle),
        ("ascending_sawtooth", ascending_sawtooth),
        ("descending_sawtooth", descending_sawtooth),
        ("alternating", alternating),
        ("alternating_16_values", alternating_16_values),
    ]
}

static USE_FIXED_SEED: AtomicBool = AtomicBool::new(true);

pub fn disable_fixed_seed() {
    USE_FIXED_SEED.store(false, Ordering::Release);
}

pub fn random_init_seed() -> u64 {
    if USE_FIXED_SEED.load(Ordering::Acquire) {
        static SEED: OnceCell<u64> = OnceCell::new();
        *SEED.get_or_init(|| -> u64 { thread_rng().gen() })
    } else {
        thread_rng().gen()
    }
}

// --- Private ---

fn new_seed() -> StdRng {
    // Random seed, but prints it for repeatability.
    rand::SeedableRng::seed_from_u64(random_init_seed())
}

fn random_vec(size: usize) -> Vec<i32> {
    let mut rng = new_seed();

    (0..size).map(|_| rng.gen::<i32>()).collect()
}

fn sawtooth_len(size: usize) -> usize {
    if size < 2 {
        return 1;
    }

    (qualification_threshold(size) * 11 / 10).max(1)
}
