//! Sorting for sequences that can only be walked one element at a time.
//!
//! Everything here works through the [`Bidirectional`] trait: step a cursor forward or backward,
//! read the element under a cursor, swap two elements. No element is ever moved out of the
//! sequence, so a panicking comparator always leaves a permutation of the input behind.

use core::cmp::Ordering;

use crate::config::{qualification_threshold, SMALL_SORT_THRESHOLD};

mod list;
mod merge;
mod quicksort;

pub use list::{Iter, List};

use merge::{merge, merge3};

/// A sequence with cursors that step forward and backward.
///
/// A cursor names a position, not a value: swapping the elements at two positions leaves every
/// cursor valid and pointing at the same position. `end()` is the position past the last element,
/// `prev(end())` is the last element.
pub trait Bidirectional {
    type Item;
    type Cursor: Copy + Eq;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Cursor of the first element, `end()` if the sequence is empty.
    fn begin(&self) -> Self::Cursor;

    fn end(&self) -> Self::Cursor;

    fn next(&self, cursor: Self::Cursor) -> Self::Cursor;

    fn prev(&self, cursor: Self::Cursor) -> Self::Cursor;

    fn get(&self, cursor: Self::Cursor) -> &Self::Item;

    fn swap(&mut self, a: Self::Cursor, b: Self::Cursor);
}

/// A slice seen through the [`Bidirectional`] interface only.
///
/// Lets slice data go through the bidirectional code path, for example to compare it with the
/// random-access one on the same input.
pub struct StepSlice<'a, T> {
    slice: &'a mut [T],
}

impl<'a, T> StepSlice<'a, T> {
    pub fn new(slice: &'a mut [T]) -> Self {
        Self { slice }
    }
}

impl<T> Bidirectional for StepSlice<'_, T> {
    type Item = T;
    type Cursor = usize;

    #[inline]
    fn len(&self) -> usize {
        self.slice.len()
    }

    #[inline]
    fn begin(&self) -> usize {
        0
    }

    #[inline]
    fn end(&self) -> usize {
        self.slice.len()
    }

    #[inline]
    fn next(&self, cursor: usize) -> usize {
        cursor + 1
    }

    #[inline]
    fn prev(&self, cursor: usize) -> usize {
        cursor - 1
    }

    #[inline]
    fn get(&self, cursor: usize) -> &T {
        &self.slice[cursor]
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.slice.swap(a, b);
    }
}

/// Sorts `seq` with vergesort for bidirectional sequences.
#[inline]
pub fn sort<B>(seq: &mut B)
where
    B: Bidirectional + ?Sized,
    B::Item: Ord,
{
    sort_with(seq, &mut |a, b| a.lt(b));
}

/// Sorts `seq` with vergesort for bidirectional sequences using `compare` to order elements.
#[inline]
pub fn sort_by<B, F>(seq: &mut B, mut compare: F)
where
    B: Bidirectional + ?Sized,
    F: FnMut(&B::Item, &B::Item) -> Ordering,
{
    sort_with(seq, &mut |a, b| compare(a, b) == Ordering::Less);
}

/// Sorts `seq` with the median-of-three quicksort alone, without run detection.
pub fn quicksort<B, F>(seq: &mut B, mut compare: F)
where
    B: Bidirectional + ?Sized,
    F: FnMut(&B::Item, &B::Item) -> Ordering,
{
    let (first, last, len) = (seq.begin(), seq.end(), seq.len());
    quicksort::quicksort(
        seq,
        first,
        last,
        len,
        &mut |a, b| compare(a, b) == Ordering::Less,
    );
}

pub(crate) fn sort_with<B, F>(seq: &mut B, is_less: &mut F)
where
    B: Bidirectional + ?Sized,
    F: FnMut(&B::Item, &B::Item) -> bool,
{
    let len = seq.len();
    if len < 2 {
        return;
    }

    if len < SMALL_SORT_THRESHOLD {
        let (first, last) = (seq.begin(), seq.end());
        quicksort::quicksort(seq, first, last, len, is_less);
        return;
    }

    vergesort(seq, is_less);
}

/// Returns the cursor `n` steps after `cursor`.
#[inline]
pub(crate) fn advance<B>(seq: &B, mut cursor: B::Cursor, n: usize) -> B::Cursor
where
    B: Bidirectional + ?Sized,
{
    for _ in 0..n {
        cursor = seq.next(cursor);
    }
    cursor
}

/// Reverses the elements in `[first, last)`.
pub(crate) fn reverse<B>(seq: &mut B, mut first: B::Cursor, mut last: B::Cursor)
where
    B: Bidirectional + ?Sized,
{
    while first != last {
        last = seq.prev(last);
        if first == last {
            break;
        }
        seq.swap(first, last);
        first = seq.next(first);
    }
}

// State of one scan. Everything in `[first, begin_unstable)`, or up to the current range if there
// is no unstable region, is sorted.
struct Scan<C> {
    first: C,
    sorted_len: usize,
    begin_unstable: Option<C>,
    unstable_len: usize,
    min_run: usize,
}

impl<C: Copy + Eq> Scan<C> {
    // Takes the range `[begin, end)` of `len` elements that was just walked. A qualifying range is
    // merged into the sorted prefix, together with the pending unstable region if there is one.
    // Anything shorter is added to the unstable region.
    fn take_range<B, F>(
        &mut self,
        seq: &mut B,
        begin: C,
        end: C,
        len: usize,
        descending: bool,
        is_less: &mut F,
    ) where
        B: Bidirectional<Cursor = C> + ?Sized,
        F: FnMut(&B::Item, &B::Item) -> bool,
    {
        if len < self.min_run {
            self.unstable_len += len;
            self.begin_unstable.get_or_insert(begin);
            return;
        }

        if descending {
            reverse(seq, begin, end);
        }

        if let Some(begin_unstable) = self.begin_unstable.take() {
            quicksort::quicksort(seq, begin_unstable, begin, self.unstable_len, is_less);
            merge3(
                seq,
                [self.first, begin_unstable, begin, end],
                [self.sorted_len, self.unstable_len, len],
                is_less,
            );
            self.sorted_len += self.unstable_len + len;
            self.unstable_len = 0;
        } else {
            merge(seq, self.first, begin, end, self.sorted_len, len, is_less);
            self.sorted_len += len;
        }
    }
}

/// Sorts `seq` by collecting alternating non-increasing and non-decreasing ranges. Ranges of at
/// least `len / floor(log2(len))` elements are merged into the sorted prefix, everything else is
/// sorted with quicksort before merging.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
fn vergesort<B, F>(seq: &mut B, is_less: &mut F)
where
    B: Bidirectional + ?Sized,
    F: FnMut(&B::Item, &B::Item) -> bool,
{
    let len = seq.len();
    let first = seq.begin();
    let last = seq.end();

    // Find the end of the sorted prefix.
    let mut current = first;
    let mut next = seq.next(first);
    let mut sorted_len = 1;
    while next != last && !is_less(seq.get(next), seq.get(current)) {
        current = next;
        next = seq.next(next);
        sorted_len += 1;
    }
    if next == last {
        return;
    }

    // The last element of the prefix starts the first range.
    let mut scan = Scan {
        first,
        sorted_len: sorted_len - 1,
        begin_unstable: None,
        unstable_len: 0,
        min_run: qualification_threshold(len),
    };

    loop {
        // Non-increasing range.
        let begin_range = current;
        let mut range_len = 1;
        while next != last && !is_less(seq.get(current), seq.get(next)) {
            current = next;
            next = seq.next(next);
            range_len += 1;
        }
        scan.take_range(seq, begin_range, next, range_len, true, is_less);

        if next == last {
            break;
        }
        current = next;
        next = seq.next(next);

        // Non-decreasing range.
        let begin_range = current;
        let mut range_len = 1;
        while next != last && !is_less(seq.get(next), seq.get(current)) {
            current = next;
            next = seq.next(next);
            range_len += 1;
        }
        scan.take_range(seq, begin_range, next, range_len, false, is_less);

        if next == last {
            break;
        }
        current = next;
        next = seq.next(next);
    }

    if let Some(begin_unstable) = scan.begin_unstable {
        quicksort::quicksort(seq, begin_unstable, last, scan.unstable_len, is_less);
        merge(
            seq,
            first,
            begin_unstable,
            last,
            scan.sorted_len,
            scan.unstable_len,
            is_less,
        );
    }
}
