//! Pattern-defeating quicksort, the fallback sorter for random-access sequences.
//!
//! Unstable, in-place, *O*(*n* \* log(*n*)) worst-case. Ranges that are not leftmost in the
//! recursion keep their predecessor, the pivot of the parent partition, in `v[0]`. Seeing a pivot
//! that compares equal to that predecessor triggers a partition of equal elements, which makes
//! inputs with few distinct values run in linear time.

use core::cmp::Ordering;
use core::mem;

use crate::config::INSERTION_SORT_THRESHOLD;

mod heapsort;
mod partition;
mod pivot;
pub(crate) mod smallsort;

pub(crate) use heapsort::heapsort;
#[cfg(test)]
pub(crate) use heapsort::heapsort_calls;

use partition::{partition_left, partition_right};
use pivot::{break_patterns, choose_pivot};
use smallsort::{insertion_sort_shift_left, partial_insertion_sort};

/// Sorts `v` with pdqsort, without run detection.
#[inline]
pub fn sort<T: Ord>(v: &mut [T]) {
    quicksort(v, &mut |a, b| a.lt(b));
}

/// Sorts `v` with pdqsort using `compare` to order elements.
#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    quicksort(v, &mut |a, b| compare(a, b) == Ordering::Less);
}

/// Sorts `v` with heapsort alone, the escape hatch of pdqsort. Useful as a baseline.
pub fn heapsort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    heapsort(v, &mut |a, b| compare(a, b) == Ordering::Less);
}

/// Sorts `v` using pattern-defeating quicksort, which is *O*(*n* \* log(*n*)) worst-case.
pub(crate) fn quicksort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    // Sorting has no meaningful behavior on zero-sized types.
    if mem::size_of::<T>() == 0 || v.len() < 2 {
        return;
    }

    // Limit the number of imbalanced partitions to `floor(log2(len))`.
    let bad_allowed = v.len().ilog2();

    recurse(v, is_less, bad_allowed, true);
}

/// Sorts `v` recursively.
///
/// If `leftmost` is false, `v[0]` is not part of the range to sort. It is the predecessor of the
/// range and not greater than any element in it.
///
/// `bad_allowed` is the number of allowed imbalanced partitions before switching to `heapsort`. If
/// zero, a range too long for insertion sort goes to heapsort right away.
fn recurse<'a, T, F>(mut v: &'a mut [T], is_less: &mut F, mut bad_allowed: u32, mut leftmost: bool)
where
    F: FnMut(&T, &T) -> bool,
{
    loop {
        let offset = (!leftmost) as usize;
        let len = v.len() - offset;

        if len < INSERTION_SORT_THRESHOLD {
            if len >= 2 {
                insertion_sort_shift_left(&mut v[offset..], 1, is_less);
            }
            return;
        }

        if bad_allowed == 0 {
            heapsort(&mut v[offset..], is_less);
            return;
        }

        choose_pivot(&mut v[offset..], is_less);

        // If the chosen pivot is equal to the predecessor, then it's the smallest element in the
        // range. Partition it into elements equal to and elements greater than the pivot. This case
        // is usually hit when the range contains many duplicate elements.
        if !leftmost && !is_less(&v[0], &v[1]) {
            let mid = partition_left(&mut v[1..], is_less);

            // The pivot at `v[1 + mid]` becomes the predecessor of the remaining range.
            v = &mut v[1 + mid..];
            continue;
        }

        let (mid, was_partitioned) = partition_right(&mut v[offset..], is_less);
        let pivot_pos = offset + mid;

        let l_len = mid;
        let r_len = len - mid - 1;
        let highly_unbalanced = l_len < len / 8 || r_len < len / 8;

        if highly_unbalanced {
            bad_allowed -= 1;

            // If too many bad pivot choices were made, simply fall back to heapsort in order to
            // guarantee `O(n * log(n))` worst-case.
            if bad_allowed == 0 {
                heapsort(&mut v[offset..], is_less);
                return;
            }

            break_patterns(&mut v[offset..pivot_pos]);
            break_patterns(&mut v[pivot_pos + 1..]);
        } else if was_partitioned
            && partial_insertion_sort(&mut v[offset..pivot_pos], is_less)
            && partial_insertion_sort(&mut v[pivot_pos + 1..], is_less)
        {
            // Both sides were nearly sorted and have been finished off.
            return;
        }

        // `left` keeps the current predecessor, `right` starts with the pivot which becomes the
        // predecessor of the right side.
        let (left, right) = v.split_at_mut(pivot_pos);

        // Recurse into the shorter side only in order to minimize the total number of recursive
        // calls and consume less stack space. Then just continue with the longer side (this is
        // akin to tail recursion).
        if l_len < r_len {
            recurse(left, is_less, bad_allowed, leftmost);
            v = right;
            leftmost = false;
        } else {
            recurse(right, is_less, bad_allowed, false);
            v = left;
        }
    }
}
