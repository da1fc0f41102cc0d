//! vergesort, an unstable in-place sort that keeps long runs of already sorted data.
//!
//! The input is scanned for non-decreasing and non-increasing runs. Runs of at least
//! `len / floor(log2(len))` elements are kept, descending ones reversed, and everything between
//! them is sorted by a fallback quicksort. The pieces are then merged in place. Slices use
//! pattern-defeating quicksort as fallback, sequences that can only be stepped through use a
//! median-of-three quicksort.
//!
//! ```ignore
//! let mut v = vec![5, 4, 3, 2, 1];
//! vergesort::sort(&mut v);
//! assert_eq!(v, [1, 2, 3, 4, 5]);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;

pub mod bidirectional;
pub mod config;
mod merge;
pub mod patterns;
pub mod pdqsort;
mod random_access;

use bidirectional::{List, StepSlice};

/// A sequence that can be sorted by [`sort`], [`sort_by`] and [`sort_by_key`].
///
/// The implementation picks the traversal used for sorting: slices and the containers that can
/// expose one are sorted with random access, [`List`] with the bidirectional algorithm.
pub trait Sequence {
    type Item;

    #[doc(hidden)]
    fn sort_with<F>(&mut self, is_less: &mut F)
    where
        F: FnMut(&Self::Item, &Self::Item) -> bool;
}

impl<T> Sequence for [T] {
    type Item = T;

    #[inline]
    fn sort_with<F>(&mut self, is_less: &mut F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        random_access::sort(self, is_less);
    }
}

impl<T, const N: usize> Sequence for [T; N] {
    type Item = T;

    #[inline]
    fn sort_with<F>(&mut self, is_less: &mut F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        random_access::sort(self.as_mut_slice(), is_less);
    }
}

impl<T> Sequence for Vec<T> {
    type Item = T;

    #[inline]
    fn sort_with<F>(&mut self, is_less: &mut F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        random_access::sort(self.as_mut_slice(), is_less);
    }
}

impl<T> Sequence for VecDeque<T> {
    type Item = T;

    #[inline]
    fn sort_with<F>(&mut self, is_less: &mut F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        random_access::sort(self.make_contiguous(), is_less);
    }
}

impl<T> Sequence for List<T> {
    type Item = T;

    #[inline]
    fn sort_with<F>(&mut self, is_less: &mut F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        bidirectional::sort_with(self, is_less);
    }
}

/// Sorts `seq` in ascending order.
///
/// This sort is unstable (i.e., may reorder equal elements), in-place and *O*(*n* \* log(*n*))
/// worst-case for slices. It is *O*(*n*) on already sorted or reverse sorted input, and close to
/// that on input made of a few long runs.
///
/// Merging runs tries to allocate scratch space of up to half the input. If that fails, the merge
/// falls back to an algorithm that needs none.
#[inline]
pub fn sort<S>(seq: &mut S)
where
    S: Sequence + ?Sized,
    S::Item: Ord,
{
    seq.sort_with(&mut |a, b| a.lt(b));
}

/// Sorts `seq` with a comparator function.
///
/// The comparator must define a total ordering for the elements. If it does not, the order of the
/// elements is unspecified, but every element is still present exactly once. The same holds if
/// `compare` panics.
#[inline]
pub fn sort_by<S, F>(seq: &mut S, mut compare: F)
where
    S: Sequence + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    seq.sort_with(&mut |a, b| compare(a, b) == Ordering::Less);
}

/// Sorts `seq` with a key extraction function.
///
/// The key is computed anew for every comparison.
#[inline]
pub fn sort_by_key<S, K, F>(seq: &mut S, mut f: F)
where
    S: Sequence + ?Sized,
    F: FnMut(&S::Item) -> K,
    K: Ord,
{
    seq.sort_with(&mut |a, b| f(a).lt(&f(b)));
}

/// Common interface of the sort variants in this crate, used by the test harness and the
/// benchmarks to run the same inputs through each of them.
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> Ordering;
}

macro_rules! sort_impl {
    ($prefix:ident, $name:expr, $sort_by:expr) => {
        paste::paste! {
            #[doc = concat!("`", $name, "` through the [`Sort`] interface.")]
            pub struct [<$prefix Impl>];

            impl Sort for [<$prefix Impl>] {
                fn name() -> String {
                    $name.into()
                }

                #[inline]
                fn sort<T>(arr: &mut [T])
                where
                    T: Ord,
                {
                    $sort_by(arr, |a: &T, b: &T| a.cmp(b));
                }

                #[inline]
                fn sort_by<T, F>(arr: &mut [T], compare: F)
                where
                    F: FnMut(&T, &T) -> Ordering,
                {
                    $sort_by(arr, compare);
                }
            }
        }
    };
}

sort_impl!(RandomAccess, "vergesort_random_access", sort_by);
sort_impl!(
    Bidirectional,
    "vergesort_bidirectional",
    |arr, compare| bidirectional::sort_by(&mut StepSlice::new(arr), compare)
);
sort_impl!(Pdqsort, "pdqsort", pdqsort::sort_by);
sort_impl!(Heapsort, "heapsort", pdqsort::heapsort_by);
