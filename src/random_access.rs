//! Run detection for slices.
//!
//! The scanner jumps `T` elements ahead and checks the direction of a single pair. Most unsorted
//! regions are rejected that way after a handful of comparisons, real runs are then expanded one
//! element at a time in both directions. Sorted material is tracked as a list of segment
//! boundaries, which are merged pairwise at the end.

use core::mem;

use crate::config::{qualification_threshold, SMALL_SORT_THRESHOLD};
use crate::merge::{merge, merge3, merge_runs, Scratch};
use crate::pdqsort;

/// Sorts `v`, short slices go straight to pdqsort.
#[inline]
pub(crate) fn sort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    // Sorting has no meaningful behavior on zero-sized types.
    if mem::size_of::<T>() == 0 || v.len() < 2 {
        return;
    }

    if v.len() < SMALL_SORT_THRESHOLD {
        pdqsort::quicksort(v, is_less);
        return;
    }

    vergesort(v, is_less);
}

/// Sorts `v` by detecting runs of at least `len / floor(log2(len))` elements, sorting everything
/// else with pdqsort and merging the results.
///
/// Expects `v.len() >= 2`, shorter slices are handled by the caller.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn vergesort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    debug_assert!(len >= 2);

    let min_run = qualification_threshold(len);

    let sorted_until = find_sorted_until(v, is_less);
    if sorted_until == len {
        return;
    }

    // Boundaries of the sorted segments found so far, the first boundary is always 0.
    let mut runs = vec![0];

    // Start of the open unstable region, if any.
    let mut begin_unstable: Option<usize> = None;

    // No merge ever needs more than the shorter of its two ranges.
    let mut scratch = Scratch::new(len / 2);

    // `current` and `next` are the two elements of the pair that is tested for the direction.
    let mut current = sorted_until - 1;
    let mut next = current + 1;

    // The sorted prefix without its last element is kept if long enough, the last element is where
    // the next range starts.
    if current >= min_run {
        runs.push(current);
    } else {
        begin_unstable = Some(0);
    }

    loop {
        let begin_range = current;

        // The rest is too short to ever qualify.
        if len - next <= min_run {
            begin_unstable.get_or_insert(begin_range);
            break;
        }

        current += min_run;
        next += min_run;

        // Forward cursors start at the jump target.
        let mut current2 = current;
        let mut next2 = next;

        let descending = !is_less(&v[current], &v[next]);

        // Expand the range backward. The pair at `current` and `next` already has the right
        // direction, so the loop starts by stepping back.
        let mut broke = false;
        while current != begin_range {
            current -= 1;
            next -= 1;
            if in_order(v, current, next, descending, is_less) {
                continue;
            }
            broke = true;
            break;
        }
        if broke {
            current += 1;
        }

        // Expand the range forward.
        while next2 != len && in_order(v, current2, next2, descending, is_less) {
            current2 += 1;
            next2 += 1;
        }

        if next2 - current >= min_run {
            if descending {
                v[current..next2].reverse();
            }

            // Elements the backward expansion did not reach are unstable as well.
            let begin = begin_unstable.take().unwrap_or(begin_range);
            close_before_run(v, &mut runs, begin, current, next2, &mut scratch, is_less);
        } else {
            begin_unstable.get_or_insert(begin_range);
        }

        if next2 == len {
            break;
        }

        current = next2;
        next = next2 + 1;
    }

    if let Some(begin) = begin_unstable {
        debug_assert_eq!(runs.last(), Some(&begin));
        pdqsort::quicksort(&mut v[begin..], is_less);

        let last = runs.len() - 1;
        if len - begin < min_run && last > 0 {
            // A short tail joins the previous segment right away.
            let start = runs[last - 1];
            merge(&mut v[start..], begin - start, &mut scratch, is_less);
            runs[last] = len;
        } else {
            runs.push(len);
        }
    }

    if runs.len() > 2 {
        merge_runs(v, &mut runs, &mut scratch, is_less);
    }
}

// Returns the length of the longest non-decreasing prefix of `v`.
fn find_sorted_until<T, F>(v: &[T], is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let mut i = 1;
    while i < v.len() && !is_less(&v[i], &v[i - 1]) {
        i += 1;
    }
    i
}

// Checks that `v[a]`, `v[b]` continue a non-decreasing (or non-increasing) range.
#[inline(always)]
fn in_order<T, F>(v: &[T], a: usize, b: usize, descending: bool, is_less: &mut F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    if descending {
        !is_less(&v[a], &v[b])
    } else {
        !is_less(&v[b], &v[a])
    }
}

// Sorts the unstable region `v[begin..run_start]` and records it together with the qualifying run
// `v[run_start..run_end]`. A region too short to qualify as a run is merged into its neighbours
// right away instead of becoming a segment of its own.
fn close_before_run<T, F>(
    v: &mut [T],
    runs: &mut Vec<usize>,
    begin: usize,
    run_start: usize,
    run_end: usize,
    scratch: &mut Scratch<T>,
    is_less: &mut F,
) where
    F: FnMut(&T, &T) -> bool,
{
    debug_assert_eq!(runs.last(), Some(&begin));

    if begin == run_start {
        runs.push(run_end);
        return;
    }

    pdqsort::quicksort(&mut v[begin..run_start], is_less);

    let last = runs.len() - 1;
    if run_start - begin >= qualification_threshold(v.len()) {
        runs.push(run_start);
        runs.push(run_end);
    } else if last > 0 {
        // Previous segment, unstable region and run become one segment.
        let start = runs[last - 1];
        merge3(
            &mut v[start..run_end],
            begin - start,
            run_start - start,
            scratch,
            is_less,
        );
        runs[last] = run_end;
    } else {
        merge(&mut v[..run_end], run_start, scratch, is_less);
        runs.push(run_end);
    }
}
