use crate::config::{INSERTION_SORT_THRESHOLD, NINTHER_THRESHOLD};

/// Swaps `v[a]` and `v[b]` if `v[b] < v[a]`.
#[inline(always)]
fn sort2<T, F>(v: &mut [T], a: usize, b: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if is_less(&v[b], &v[a]) {
        v.swap(a, b);
    }
}

/// Sorts `v[a]`, `v[b]` and `v[c]` in place.
#[inline(always)]
fn sort3<T, F>(v: &mut [T], a: usize, b: usize, c: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    sort2(v, a, b, is_less);
    sort2(v, b, c, is_less);
    sort2(v, a, b, is_less);
}

/// Moves a pivot candidate to `v[0]`.
///
/// Short slices use the median of the first, middle and last element. Longer slices use Tukey's
/// ninther, the median of three medians of three, which also leaves the first and last three
/// elements pre-sorted against each other.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn choose_pivot<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    debug_assert!(len >= 3);

    let s2 = len / 2;

    if len >= NINTHER_THRESHOLD {
        sort3(v, 0, s2, len - 1, is_less);
        sort3(v, 1, s2 - 1, len - 2, is_less);
        sort3(v, 2, s2 + 1, len - 3, is_less);
        sort3(v, s2 - 1, s2, s2 + 1, is_less);
        v.swap(0, s2);
    } else {
        sort3(v, s2, 0, len - 1, is_less);
    }
}

/// Scatters some elements around in an attempt to break patterns that might cause imbalanced
/// partitions in quicksort.
#[cold]
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn break_patterns<T>(v: &mut [T]) {
    let len = v.len();
    if len < INSERTION_SORT_THRESHOLD {
        return;
    }

    let q = len / 4;
    v.swap(0, q);
    v.swap(len - 1, len - q);

    if len > NINTHER_THRESHOLD {
        v.swap(1, q + 1);
        v.swap(2, q + 2);
        v.swap(len - 2, len - q - 1);
        v.swap(len - 3, len - q - 2);
    }
}
