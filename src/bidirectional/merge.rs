//! Merges that only swap elements. They need no scratch space at all and cost *O*(*n* \* log(*n*))
//! element swaps for a merge of `n` elements.

use super::{advance, reverse, Bidirectional};

/// Merges the sorted ranges `[first, middle)` and `[middle, last)`, of `len1` and `len2` elements.
pub(crate) fn merge<B, F>(
    seq: &mut B,
    mut first: B::Cursor,
    mut middle: B::Cursor,
    mut last: B::Cursor,
    mut len1: usize,
    mut len2: usize,
    is_less: &mut F,
) where
    B: Bidirectional + ?Sized,
    F: FnMut(&B::Item, &B::Item) -> bool,
{
    loop {
        if len1 == 0 || len2 == 0 {
            return;
        }

        // Already in order.
        if !is_less(seq.get(middle), seq.get(seq.prev(middle))) {
            return;
        }

        if len1 + len2 == 2 {
            seq.swap(first, middle);
            return;
        }

        let (first_cut, second_cut, len11, len22);
        if len1 > len2 {
            len11 = len1 / 2;
            first_cut = advance(seq, first, len11);
            (second_cut, len22) = lower_bound(seq, middle, len2, first_cut, is_less);
        } else {
            len22 = len2 / 2;
            second_cut = advance(seq, middle, len22);
            (first_cut, len11) = upper_bound(seq, first, len1, second_cut, is_less);
        }

        let new_middle = rotate(seq, first_cut, middle, second_cut, len1 - len11, len22);

        // Recurse into the shorter half and continue with the longer one.
        let (left_len, right_len) = (len11 + len22, len1 - len11 + len2 - len22);
        if left_len < right_len {
            merge(seq, first, first_cut, new_middle, len11, len22, is_less);
            first = new_middle;
            middle = second_cut;
            len1 -= len11;
            len2 -= len22;
        } else {
            merge(
                seq,
                new_middle,
                second_cut,
                last,
                len1 - len11,
                len2 - len22,
                is_less,
            );
            middle = first_cut;
            last = new_middle;
            len1 = len11;
            len2 = len22;
        }
    }
}

/// Merges the three adjacent sorted ranges delimited by `bounds`, with the given lengths.
///
/// If the first range is shorter than the last one, the first two are merged first, otherwise the
/// last two.
pub(crate) fn merge3<B, F>(seq: &mut B, bounds: [B::Cursor; 4], lens: [usize; 3], is_less: &mut F)
where
    B: Bidirectional + ?Sized,
    F: FnMut(&B::Item, &B::Item) -> bool,
{
    let [first, middle1, middle2, last] = bounds;
    let [len_a, len_b, len_c] = lens;

    if len_a < len_c {
        merge(seq, first, middle1, middle2, len_a, len_b, is_less);
        merge(seq, first, middle2, last, len_a + len_b, len_c, is_less);
    } else {
        merge(seq, middle1, middle2, last, len_b, len_c, is_less);
        merge(seq, first, middle1, last, len_a, len_b + len_c, is_less);
    }
}

/// Swaps `[first, middle)` and `[middle, last)`, holding `len1` and `len2` elements. Returns the
/// cursor `len2` steps after `first`, where the elements of the first range start now.
fn rotate<B>(
    seq: &mut B,
    first: B::Cursor,
    middle: B::Cursor,
    last: B::Cursor,
    len1: usize,
    len2: usize,
) -> B::Cursor
where
    B: Bidirectional + ?Sized,
{
    if len1 == 0 {
        return last;
    }
    if len2 == 0 {
        return first;
    }

    reverse(seq, first, middle);
    reverse(seq, middle, last);
    reverse(seq, first, last);

    // Walk from the nearer end.
    if len2 <= len1 {
        advance(seq, first, len2)
    } else {
        let mut cursor = last;
        for _ in 0..len1 {
            cursor = seq.prev(cursor);
        }
        cursor
    }
}

// First cursor in the `len` elements after `first` that is not less than the element at `value`,
// and its distance from `first`.
fn lower_bound<B, F>(
    seq: &B,
    mut first: B::Cursor,
    mut len: usize,
    value: B::Cursor,
    is_less: &mut F,
) -> (B::Cursor, usize)
where
    B: Bidirectional + ?Sized,
    F: FnMut(&B::Item, &B::Item) -> bool,
{
    let mut offset = 0;
    while len > 0 {
        let half = len / 2;
        let mid = advance(seq, first, half);
        if is_less(seq.get(mid), seq.get(value)) {
            first = seq.next(mid);
            offset += half + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }
    (first, offset)
}

// First cursor in the `len` elements after `first` that is greater than the element at `value`,
// and its distance from `first`.
fn upper_bound<B, F>(
    seq: &B,
    mut first: B::Cursor,
    mut len: usize,
    value: B::Cursor,
    is_less: &mut F,
) -> (B::Cursor, usize)
where
    B: Bidirectional + ?Sized,
    F: FnMut(&B::Item, &B::Item) -> bool,
{
    let mut offset = 0;
    while len > 0 {
        let half = len / 2;
        let mid = advance(seq, first, half);
        if !is_less(seq.get(value), seq.get(mid)) {
            first = seq.next(mid);
            offset += half + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }
    (first, offset)
}
