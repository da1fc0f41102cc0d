use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::env;
use std::fmt::Debug;
use std::fs;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;

use vergesort::bidirectional::List;
use vergesort::{patterns, Sort};

#[cfg(miri)]
const TEST_SIZES: [usize; 24] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 15, 16, 17, 20, 24, 30, 32, 33, 35, 50, 100, 200, 500,
];

#[cfg(not(miri))]
const TEST_SIZES: [usize; 31] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 15, 16, 17, 20, 24, 30, 32, 33, 35, 50, 79, 80, 81, 100,
    200, 500, 1_000, 2_048, 10_000, 100_000,
];

fn get_or_init_random_seed<S: Sort>() -> u64 {
    static SEED_WRITTEN: Mutex<bool> = Mutex::new(false);
    let seed = patterns::random_init_seed();

    let mut seed_writer = SEED_WRITTEN.lock().unwrap();
    if !*seed_writer {
        // Always write the seed before doing anything to ensure reproducibility of crashes.
        io::stdout()
            .write_all(format!("\nSeed: {seed}\nTesting: {}\n\n", S::name()).as_bytes())
            .unwrap();
        io::stdout().flush().unwrap();

        *seed_writer = true;
    }

    seed
}

fn sort_comp<S: Sort, T>(v: &mut [T])
where
    T: Ord + Clone + Debug,
{
    let seed = get_or_init_random_seed::<S>();

    let is_small_test = v.len() <= 100;
    let original_clone = v.to_vec();

    let mut stdlib_sorted_vec = v.to_vec();
    let stdlib_sorted = stdlib_sorted_vec.as_mut_slice();
    stdlib_sorted.sort();

    let testsort_sorted = v;
    S::sort(testsort_sorted);

    assert_eq!(stdlib_sorted.len(), testsort_sorted.len());

    for (a, b) in stdlib_sorted.iter().zip(testsort_sorted.iter()) {
        if a != b {
            if is_small_test {
                eprintln!("Orginal:  {:?}", original_clone);
                eprintln!("Expected: {:?}", stdlib_sorted);
                eprintln!("Got:      {:?}", testsort_sorted);
            } else if env::var("WRITE_LARGE_FAILURE").is_ok() {
                // Large arrays output them as files.
                let original_name = format!("original_{}.txt", seed);
                let std_name = format!("stdlib_sorted_{}.txt", seed);
                let test_name = format!("testsort_sorted_{}.txt", seed);

                fs::write(&original_name, format!("{:?}", original_clone)).unwrap();
                fs::write(&std_name, format!("{:?}", stdlib_sorted)).unwrap();
                fs::write(&test_name, format!("{:?}", testsort_sorted)).unwrap();

                eprintln!(
                    "Failed comparison, see files {original_name}, {std_name}, and {test_name}"
                );
            } else {
                eprintln!(
                    "Failed comparison, re-run with WRITE_LARGE_FAILURE env var set, to get output."
                );
            }

            panic!("Test assertion failed! {}", S::name())
        }
    }
}

fn test_impl<S: Sort, T: Ord + Clone + Debug>(pattern_fn: impl Fn(usize) -> Vec<T>) {
    for test_size in TEST_SIZES {
        let mut test_data = pattern_fn(test_size);
        sort_comp::<S, T>(test_data.as_mut_slice());
    }
}

fn test_impl_custom(mut test_fn: impl FnMut(usize, fn(usize) -> Vec<i32>)) {
    let test_pattern_fns: Vec<fn(usize) -> Vec<i32>> = vec![
        patterns::random,
        |size| patterns::random_uniform(size, 0..=(((size as f64).log2().round()) as i32)),
        |size| patterns::random_uniform(size, 0..=1),
        patterns::ascending,
        patterns::descending,
        patterns::pipe_organ,
        patterns::push_middle,
        patterns::ascending_sawtooth,
        |size| patterns::saw_mixed(size, ((size as f64).log2().round()) as usize),
    ];

    for test_pattern_fn in test_pattern_fns {
        for test_size in &TEST_SIZES[..TEST_SIZES.len() - 2] {
            if *test_size < 2 {
                continue;
            }

            test_fn(*test_size, test_pattern_fn);
        }
    }
}

// Sorts a copy of `v` with `compare` and returns how often it was called.
fn count_comps<S: Sort, T: Clone>(v: &[T], mut compare: impl FnMut(&T, &T) -> Ordering) -> usize {
    let mut copy = v.to_vec();
    let mut comp_counter = 0;

    S::sort_by(&mut copy, |a, b| {
        comp_counter += 1;
        compare(a, b)
    });

    comp_counter
}

fn panic_retain_original_set_impl<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();

    let test_fn = |test_size: usize, pattern_fn: fn(usize) -> Vec<i32>| {
        let mut test_data = pattern_fn(test_size);

        let sum_before: i64 = test_data.iter().map(|x| *x as i64).sum();

        // Calculate a specific comparison that should panic.
        // Ensure that it can be any of the possible comparisons and that it always panics.
        let required_comps = count_comps::<S, _>(&test_data, |a, b| a.cmp(b));
        if required_comps == 0 {
            return;
        }
        let panic_threshold =
            patterns::random_uniform(1, 1..=required_comps as i32)[0] as usize - 1;

        let mut comp_counter = 0;

        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            S::sort_by(&mut test_data, |a, b| {
                if comp_counter == panic_threshold {
                    panic!();
                }
                comp_counter += 1;

                a.cmp(b)
            });
        }));

        assert!(res.is_err());

        // If the sum before and after don't match, it means the set of elements hasn't remained the
        // same.
        let sum_after: i64 = test_data.iter().map(|x| *x as i64).sum();
        assert_eq!(sum_before, sum_after);
    };

    test_impl_custom(test_fn);
}

fn panic_observable_is_less_impl<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();

    // Every is_less call must be observable in the output, even when the user comparison panics.
    // A merge that compares against a temporary copy and never writes it back would lose the
    // effect of interior mutation done during the comparison.

    #[derive(PartialEq, Eq, Debug, Clone)]
    struct CompCount {
        val: i32,
        comp_count: Cell<u32>,
    }

    let test_fn = |test_size: usize, pattern_fn: fn(usize) -> Vec<i32>| {
        let pattern = pattern_fn(test_size);

        let mut test_input = pattern
            .iter()
            .map(|val| CompCount {
                val: *val,
                comp_count: Cell::new(0),
            })
            .collect::<Vec<_>>();

        let required_comps = count_comps::<S, _>(&test_input, |a, b| a.val.cmp(&b.val));
        if required_comps == 0 {
            return;
        }
        let panic_threshold = patterns::random_uniform(1, 1..=required_comps as i32)[0] as u64 - 1;

        let mut comp_count_global = 0;

        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            S::sort_by(&mut test_input, |a, b| {
                if comp_count_global == panic_threshold {
                    panic!();
                }

                a.comp_count.replace(a.comp_count.get() + 1);
                b.comp_count.replace(b.comp_count.get() + 1);
                comp_count_global += 1;

                a.val.cmp(&b.val)
            });
        }));

        assert!(res.is_err());

        let total_inner: u64 = test_input.iter().map(|c| c.comp_count.get() as u64).sum();
        assert_eq!(total_inner, comp_count_global * 2);

        let mut vals_after = test_input.iter().map(|c| c.val).collect::<Vec<_>>();
        let mut vals_before = pattern;
        vals_after.sort();
        vals_before.sort();
        assert_eq!(vals_before, vals_after);
    };

    test_impl_custom(test_fn);
}

fn violate_ord_retain_original_set_impl<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();

    // A comparator that does not define a total order may leave the elements in any order, but
    // every element must still be there exactly once, with or without a panic.

    let random_orderings = patterns::random_uniform(5_000, 0..3);

    let get_random_0_1_or_2 = |random_idx: &mut usize| {
        let ridx = *random_idx;
        *random_idx += 1;
        if ridx + 1 == random_orderings.len() {
            *random_idx = 0;
        }

        random_orderings[ridx] as usize
    };

    let mut random_idx_a = 0;
    let mut random_idx_b = 0;

    let mut last_element_a = -1;
    let mut last_element_b = -1;

    let mut rand_counter_b = 0;
    let mut streak_counter_a = 0;

    let mut invalid_ord_comp_functions: Vec<Box<dyn FnMut(&i32, &i32) -> Ordering>> = vec![
        Box::new(|_a, _b| -> Ordering {
            // random
            let idx = get_random_0_1_or_2(&mut random_idx_a);
            [Ordering::Less, Ordering::Equal, Ordering::Greater][idx]
        }),
        Box::new(|_a, _b| -> Ordering {
            // everything is less
            Ordering::Less
        }),
        Box::new(|_a, _b| -> Ordering {
            // everything is greater
            Ordering::Greater
        }),
        Box::new(|a, b| -> Ordering {
            // equal means less else greater
            if a == b {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }),
        Box::new(|a, b| -> Ordering {
            // Transitive breaker. remember last element.
            let lea = last_element_a;
            let leb = last_element_b;

            last_element_a = *a;
            last_element_b = *b;

            if *a == lea && *b != leb {
                b.cmp(a)
            } else {
                a.cmp(b)
            }
        }),
        Box::new(|a, b| -> Ordering {
            // Sampled random 1% of comparisons are reversed.
            rand_counter_b += get_random_0_1_or_2(&mut random_idx_b);
            if rand_counter_b >= 100 {
                rand_counter_b = 0;
                b.cmp(a)
            } else {
                a.cmp(b)
            }
        }),
        Box::new(|a, b| -> Ordering {
            // STREAK_LEN comparisons yield a.cmp(b) then STREAK_LEN comparisons less. Pushes run
            // expansion further than a random ordering would.
            const STREAK_LEN: usize = 50;

            streak_counter_a += 1;
            if streak_counter_a <= STREAK_LEN {
                a.cmp(b)
            } else {
                if streak_counter_a == STREAK_LEN * 2 {
                    streak_counter_a = 0;
                }
                Ordering::Less
            }
        }),
    ];

    for comp_func in &mut invalid_ord_comp_functions {
        let test_fn = |test_size: usize, pattern_fn: fn(usize) -> Vec<i32>| {
            let mut test_data = pattern_fn(test_size);
            let mut before = test_data.clone();

            // It's ok to panic on Ord violation or to complete.
            // In both cases the original elements must still be present.
            let _ = panic::catch_unwind(AssertUnwindSafe(|| {
                S::sort_by(&mut test_data, &mut *comp_func);
            }));

            before.sort();
            test_data.sort();
            assert_eq!(before, test_data);
        };

        test_impl_custom(test_fn);
    }
}

const GAS: usize = usize::MAX;

// Sorts `len` items against McIlroy's adversary, which decides the order of two items only when
// forced to, and always so that the candidate pivot compares low. Returns the comparison count.
fn antiqsort_comps<S: Sort>(len: usize) -> usize {
    antiqsort_comps_from::<S>(vec![GAS; len])
}

// Same adversary, but every item at an even position starts out frozen, in ascending order. Any two
// neighbours then hold one frozen and one gas item, so the input reads as a zigzag to run detection
// and the adversary still controls the order of the gas items.
fn zigzag_antiqsort_comps<S: Sort>(len: usize) -> usize {
    let values = (0..len)
        .map(|i| if i % 2 == 0 { i / 2 } else { GAS })
        .collect();
    antiqsort_comps_from::<S>(values)
}

fn antiqsort_comps_from<S: Sort>(mut values: Vec<usize>) -> usize {
    let mut items = (0..values.len()).collect::<Vec<usize>>();
    let mut nsolid = values.iter().filter(|&&val| val != GAS).count();
    let mut candidate = 0;
    let mut comps = 0;

    S::sort_by(&mut items, |&x, &y| {
        comps += 1;

        if values[x] == GAS && values[y] == GAS {
            let freeze = if x == candidate { x } else { y };
            values[freeze] = nsolid;
            nsolid += 1;
        }

        if values[x] == GAS {
            candidate = x;
        } else if values[y] == GAS {
            candidate = y;
        }

        values[x].cmp(&values[y])
    });

    assert!(items.windows(2).all(|w| values[w[0]] <= values[w[1]]));
    comps
}

macro_rules! instantiate_sort_tests {
    ($sort_impl:ty) => {
        type SortImpl = $sort_impl;

        #[test]
        fn basic() {
            sort_comp::<SortImpl, i32>(&mut []);
            sort_comp::<SortImpl, ()>(&mut []);
            sort_comp::<SortImpl, ()>(&mut [()]);
            sort_comp::<SortImpl, ()>(&mut [(), ()]);
            sort_comp::<SortImpl, ()>(&mut [(), (), ()]);
            sort_comp::<SortImpl, _>(&mut [2, 3]);
            sort_comp::<SortImpl, _>(&mut [2, 3, 6]);
            sort_comp::<SortImpl, _>(&mut [2, 3, 99, 6]);
            sort_comp::<SortImpl, _>(&mut [2, 7709, 400, 90932]);
            sort_comp::<SortImpl, _>(&mut [15, -1, 3, -1, -3, -1, 7]);
            sort_comp::<SortImpl, _>(&mut [5, 4, 3, 2, 1]);
        }

        #[test]
        fn fixed_seed() {
            let fixed_seed_a = patterns::random_init_seed();
            let fixed_seed_b = patterns::random_init_seed();

            assert_eq!(fixed_seed_a, fixed_seed_b);
        }

        #[test]
        fn random() {
            test_impl::<SortImpl, _>(patterns::random);
        }

        #[test]
        fn random_narrow() {
            test_impl::<SortImpl, _>(|size| {
                patterns::random_uniform(size, 0..=(((size as f64).log2().round()) as i32) * 100)
            });
        }

        #[test]
        fn random_binary() {
            test_impl::<SortImpl, _>(|size| patterns::random_uniform(size, 0..=1));
        }

        #[test]
        fn shuffled() {
            test_impl::<SortImpl, _>(patterns::shuffled);
            test_impl::<SortImpl, _>(patterns::shuffled_16_values);
        }

        #[test]
        fn all_equal() {
            test_impl::<SortImpl, _>(patterns::all_equal);
        }

        #[test]
        fn ascending() {
            test_impl::<SortImpl, _>(patterns::ascending);
        }

        #[test]
        fn descending() {
            test_impl::<SortImpl, _>(patterns::descending);
        }

        #[test]
        fn pipe_organ() {
            test_impl::<SortImpl, _>(patterns::pipe_organ);
        }

        #[test]
        fn push_front_and_middle() {
            test_impl::<SortImpl, _>(patterns::push_front);
            test_impl::<SortImpl, _>(patterns::push_middle);
        }

        #[test]
        fn sawtooth() {
            test_impl::<SortImpl, _>(patterns::ascending_sawtooth);
            test_impl::<SortImpl, _>(patterns::descending_sawtooth);
        }

        #[test]
        fn alternating() {
            test_impl::<SortImpl, _>(patterns::alternating);
            test_impl::<SortImpl, _>(patterns::alternating_16_values);
        }

        #[test]
        fn saw_mixed() {
            test_impl::<SortImpl, _>(|size| {
                patterns::saw_mixed(size, ((size as f64).log2().round()) as usize)
            });
        }

        #[test]
        fn random_str() {
            test_impl::<SortImpl, _>(|size| {
                patterns::random(size)
                    .into_iter()
                    .map(|val| format!("{}", val))
                    .collect::<Vec<_>>()
            });
        }

        #[test]
        fn random_large_val() {
            test_impl::<SortImpl, _>(|size| {
                patterns::random(size)
                    .into_iter()
                    .map(|val| [val; 16])
                    .collect::<Vec<_>>()
            });
        }

        #[test]
        fn long_run_then_short_run() {
            // 900 ascending elements and a descending run of 100, which is too short to qualify.
            let mut v = (0..900).collect::<Vec<i32>>();
            v.extend((900..1000).rev());
            sort_comp::<SortImpl, _>(&mut v);
        }

        #[test]
        fn qualifying_descending_run() {
            let mut v = patterns::random(500);
            v.extend((0..2000).rev());
            v.extend(patterns::random(500));
            sort_comp::<SortImpl, _>(&mut v);
        }

        #[test]
        fn idempotent() {
            let mut v = patterns::saw_mixed(10_000, 13);
            SortImpl::sort(&mut v);
            let once = v.clone();
            SortImpl::sort(&mut v);
            assert_eq!(v, once);
        }

        #[test]
        fn reversed_comparator() {
            for size in [0, 1, 5, 79, 80, 1000, 10_000] {
                let mut v = patterns::saw_mixed(size, 7);
                SortImpl::sort_by(&mut v, |a, b| b.cmp(a));

                let mut expected = v.clone();
                expected.sort();
                expected.reverse();
                assert_eq!(v, expected);
            }
        }

        #[test]
        fn no_comparisons_below_two() {
            assert_eq!(count_comps::<SortImpl, i32>(&[], |a, b| a.cmp(b)), 0);
            assert_eq!(count_comps::<SortImpl, i32>(&[7], |a, b| a.cmp(b)), 0);
        }

        #[test]
        fn panic_retain_original_set() {
            panic_retain_original_set_impl::<SortImpl>();
        }

        #[test]
        fn panic_observable_is_less() {
            panic_observable_is_less_impl::<SortImpl>();
        }

        #[test]
        fn violate_ord_retain_original_set() {
            violate_ord_retain_original_set_impl::<SortImpl>();
        }

        #[test]
        fn sort_vs_sort_by() {
            let _seed = get_or_init_random_seed::<SortImpl>();

            // Ensure that sort and sort_by produce the same result.
            let mut input_normal = [800, 3, -801, 5, -801, -3, 60, 200, 50, 7, 10];
            let expected = [-801, -801, -3, 3, 5, 7, 10, 50, 60, 200, 800];

            let mut input_sort_by = input_normal.to_vec();

            SortImpl::sort(&mut input_normal);
            SortImpl::sort_by(&mut input_sort_by, |a, b| a.cmp(b));

            assert_eq!(input_normal, expected);
            assert_eq!(input_sort_by, expected);
        }

        #[test]
        fn int_edge() {
            let _seed = get_or_init_random_seed::<SortImpl>();

            // Ensure that the sort can handle integer edge cases.
            sort_comp::<SortImpl, _>(&mut [i32::MIN, i32::MAX]);
            sort_comp::<SortImpl, _>(&mut [i32::MAX, i32::MIN]);
            sort_comp::<SortImpl, _>(&mut [i32::MIN, 3]);
            sort_comp::<SortImpl, _>(&mut [i32::MIN, -3, i32::MAX]);
            sort_comp::<SortImpl, _>(&mut [i32::MAX, 3, i32::MIN, 5, i32::MIN, -3, 60, 200, 50]);

            sort_comp::<SortImpl, _>(&mut [u64::MIN, u64::MAX]);
            sort_comp::<SortImpl, _>(&mut [u64::MAX, u64::MIN]);
            sort_comp::<SortImpl, _>(&mut [u64::MIN, u64::MAX - 3, u64::MAX, u64::MIN, 5]);

            let mut large = patterns::random(TEST_SIZES[TEST_SIZES.len() - 2]);
            large.push(i32::MAX);
            large.push(i32::MIN);
            large.push(i32::MAX);
            sort_comp::<SortImpl, _>(&mut large);
        }
    };
}

mod random_access {
    use super::*;

    instantiate_sort_tests!(vergesort::RandomAccessImpl);

    #[test]
    fn sorted_input_compares_linearly() {
        let v = patterns::ascending(10_000);
        assert_eq!(count_comps::<SortImpl, _>(&v, |a, b| a.cmp(b)), 9_999);
    }

    #[test]
    fn adversary_is_absorbed_as_sorted() {
        // Run detection compares neighbours first, which makes the adversary freeze every item in
        // ascending order.
        for len in [100, 1_000, 10_000] {
            assert_eq!(antiqsort_comps::<SortImpl>(len), len - 1);
        }
    }

    #[test]
    fn zigzag_adversary_stays_n_log_n() {
        for len in [1_000, 10_000, 100_000] {
            let comps = zigzag_antiqsort_comps::<SortImpl>(len);
            // No run qualifies, everything goes through pdqsort.
            assert!(comps > len);
            assert!(comps <= 8 * len * len.ilog2() as usize);
        }
    }
}

mod bidirectional {
    use super::*;

    instantiate_sort_tests!(vergesort::BidirectionalImpl);

    #[test]
    fn sorted_input_compares_linearly() {
        let v = patterns::ascending(10_000);
        assert_eq!(count_comps::<SortImpl, _>(&v, |a, b| a.cmp(b)), 9_999);
    }
}

mod pdqsort {
    use super::*;

    instantiate_sort_tests!(vergesort::PdqsortImpl);

    #[test]
    fn adversary_stays_n_log_n() {
        for len in [100, 1_000, 10_000] {
            let comps = antiqsort_comps::<SortImpl>(len);
            assert!(comps > len);
            assert!(comps <= 8 * len * len.ilog2() as usize);
        }
    }

    #[test]
    fn zigzag_adversary_stays_n_log_n() {
        for len in [1_000, 10_000] {
            assert!(zigzag_antiqsort_comps::<SortImpl>(len) <= 8 * len * len.ilog2() as usize);
        }
    }
}

// --- Dispatch over containers ---

fn list_and_sorted(values: &[i32]) -> (List<i32>, Vec<i32>) {
    let mut expected = values.to_vec();
    expected.sort();
    (values.iter().copied().collect(), expected)
}

#[test]
fn list_patterns() {
    for pattern_fn in patterns::named().into_iter().map(|(_, f)| f) {
        for size in [0, 1, 2, 50, 80, 1_000, 5_000] {
            let (mut list, expected) = list_and_sorted(&pattern_fn(size));
            vergesort::sort(&mut list);
            assert_eq!(Vec::from(list), expected);
        }
    }
}

// Inputs known to hurt median-of-three quicksort.
const QUICKSORT_ADVERSARIES: [fn(usize) -> Vec<i32>; 3] =
    [patterns::pipe_organ, patterns::push_front, patterns::push_middle];

#[test]
fn list_quicksort_adversaries_are_runs() {
    // Run detection takes these apart, quicksort only ever sees short leftovers.
    for pattern_fn in QUICKSORT_ADVERSARIES {
        for len in [1_000, 10_000, 50_000] {
            let (mut list, expected) = list_and_sorted(&pattern_fn(len));

            let mut comps = 0;
            vergesort::sort_by(&mut list, |a, b| {
                comps += 1;
                a.cmp(b)
            });

            assert_eq!(Vec::from(list), expected);
            assert!(comps <= 8 * len * len.ilog2() as usize);
        }
    }
}

// Sorts `values` as a list with the bidirectional quicksort alone and returns the comparison count.
fn list_quicksort_comps(values: &[i32]) -> usize {
    let (mut list, expected) = list_and_sorted(values);

    let mut comps = 0;
    vergesort::bidirectional::quicksort(&mut list, |a, b| {
        comps += 1;
        a.cmp(b)
    });

    assert_eq!(Vec::from(list), expected);
    comps
}

#[test]
fn list_quicksort_push_front_and_middle() {
    for pattern_fn in [patterns::push_front, patterns::push_middle] {
        for len in [1_000, 5_000, 10_000] {
            let comps = list_quicksort_comps(&pattern_fn(len));
            assert!(comps <= 4 * len * len.ilog2() as usize);
        }
    }
}

#[test]
fn list_quicksort_pipe_organ_is_quadratic() {
    // Without run detection, median of three degrades on this shape.
    let n_log_n = |len: usize| len * len.ilog2() as usize;

    let small = list_quicksort_comps(&patterns::pipe_organ(1_000));
    let large = list_quicksort_comps(&patterns::pipe_organ(10_000));

    assert!(small <= 1_000 * 1_000 / 16);
    assert!(large <= 10_000 * 10_000 / 16);

    // Per n * log(n) the count keeps growing with the length.
    assert!(large * n_log_n(1_000) > 2 * small * n_log_n(10_000));
}

#[test]
fn list_sort_by_key() {
    let (mut list, mut expected) = list_and_sorted(&patterns::saw_mixed(3_000, 9));
    vergesort::sort_by_key(&mut list, |x| std::cmp::Reverse(*x));
    expected.reverse();
    assert_eq!(Vec::from(list), expected);
}

#[test]
fn list_with_panic_keeps_elements() {
    let values = patterns::random(2_000);
    let (mut list, expected) = list_and_sorted(&values);

    let mut comps = 0;
    let res = panic::catch_unwind(AssertUnwindSafe(|| {
        vergesort::sort_by(&mut list, |a, b| {
            comps += 1;
            if comps == 5_000 {
                panic!();
            }
            a.cmp(b)
        });
    }));
    assert!(res.is_err());

    let mut after = Vec::from(list);
    after.sort();
    assert_eq!(after, expected);
}

#[test]
fn vec_deque_wrapped() {
    let mut deque = VecDeque::with_capacity(1_000);
    for x in patterns::pipe_organ(1_000) {
        if x % 2 == 0 {
            deque.push_back(x);
        } else {
            deque.push_front(x);
        }
    }
    let mut expected = deque.iter().copied().collect::<Vec<_>>();
    expected.sort();

    vergesort::sort(&mut deque);
    assert!(deque.iter().eq(expected.iter()));
}

#[test]
fn arrays_and_slices() {
    let mut array = [3, 1, 2];
    vergesort::sort(&mut array);
    assert_eq!(array, [1, 2, 3]);

    let mut v = patterns::push_front(500);
    vergesort::sort(&mut v[100..]);
    assert!(v[100..].windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(v[..100], patterns::push_front(500)[..100]);

    let mut words = vec!["pear", "fig", "apple", "kiwi"];
    vergesort::sort_by_key(&mut words, |w| w.len());
    assert_eq!(words[0], "fig");
    assert_eq!(words[3], "apple");
}
