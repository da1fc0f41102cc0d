use crate::config::BIDIRECTIONAL_INSERTION_SORT_THRESHOLD;

use super::{advance, Bidirectional};

/// Sorts the `len` elements in `[first, last)`.
///
/// The pivot is the median of the first, middle and last element. Two partition passes split the
/// range into elements less than, equal to and greater than the pivot. Only the smaller of the
/// outer parts is sorted recursively, the function then continues with the larger one.
pub(crate) fn quicksort<B, F>(
    seq: &mut B,
    mut first: B::Cursor,
    mut last: B::Cursor,
    mut len: usize,
    is_less: &mut F,
) where
    B: Bidirectional + ?Sized,
    F: FnMut(&B::Item, &B::Item) -> bool,
{
    loop {
        if len < BIDIRECTIONAL_INSERTION_SORT_THRESHOLD {
            insertion_sort(seq, first, last, is_less);
            return;
        }

        // Median of three, moved to the front.
        let middle = advance(seq, first, len / 2);
        let last_1 = seq.prev(last);
        sort3(seq, first, middle, last_1, is_less);
        seq.swap(first, middle);
        let pivot = first;

        let rest = seq.next(first);
        let (middle1, less_len) = partition(seq, rest, last, |seq, c| {
            is_less(seq.get(c), seq.get(pivot))
        });
        let (middle2, equal_len) = partition(seq, middle1, last, |seq, c| {
            !is_less(seq.get(pivot), seq.get(c))
        });
        let greater_len = len - 1 - less_len - equal_len;

        // Put the pivot behind the elements less than it. Equal elements, the pivot included, now
        // sit in `[pivot_pos, middle2)` and are done.
        let pivot_pos = seq.prev(middle1);
        seq.swap(pivot, pivot_pos);

        if less_len < greater_len {
            quicksort(seq, first, pivot_pos, less_len, is_less);
            first = middle2;
            len = greater_len;
        } else {
            quicksort(seq, middle2, last, greater_len, is_less);
            last = pivot_pos;
            len = less_len;
        }
    }
}

// Moves the elements of `[first, last)` that satisfy `pred` to the front. Returns the cursor behind
// them and their count.
fn partition<B, P>(
    seq: &mut B,
    mut first: B::Cursor,
    last: B::Cursor,
    mut pred: P,
) -> (B::Cursor, usize)
where
    B: Bidirectional + ?Sized,
    P: FnMut(&B, B::Cursor) -> bool,
{
    let mut count = 0;
    while first != last && pred(&*seq, first) {
        first = seq.next(first);
        count += 1;
    }
    if first == last {
        return (first, count);
    }

    let mut cursor = seq.next(first);
    while cursor != last {
        if pred(&*seq, cursor) {
            seq.swap(first, cursor);
            first = seq.next(first);
            count += 1;
        }
        cursor = seq.next(cursor);
    }

    (first, count)
}

fn sort2<B, F>(seq: &mut B, a: B::Cursor, b: B::Cursor, is_less: &mut F)
where
    B: Bidirectional + ?Sized,
    F: FnMut(&B::Item, &B::Item) -> bool,
{
    if is_less(seq.get(b), seq.get(a)) {
        seq.swap(a, b);
    }
}

fn sort3<B, F>(seq: &mut B, a: B::Cursor, b: B::Cursor, c: B::Cursor, is_less: &mut F)
where
    B: Bidirectional + ?Sized,
    F: FnMut(&B::Item, &B::Item) -> bool,
{
    sort2(seq, a, b, is_less);
    sort2(seq, b, c, is_less);
    sort2(seq, a, b, is_less);
}

/// Sorts `[first, last)` by swapping every element towards the front until it is in place.
pub(crate) fn insertion_sort<B, F>(seq: &mut B, first: B::Cursor, last: B::Cursor, is_less: &mut F)
where
    B: Bidirectional + ?Sized,
    F: FnMut(&B::Item, &B::Item) -> bool,
{
    if first == last {
        return;
    }

    let mut cursor = seq.next(first);
    while cursor != last {
        let mut hole = cursor;
        while hole != first {
            let prev = seq.prev(hole);
            if !is_less(seq.get(hole), seq.get(prev)) {
                break;
            }
            seq.swap(prev, hole);
            hole = prev;
        }
        cursor = seq.next(cursor);
    }
}
