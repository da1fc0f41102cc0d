//! In-place merges of adjacent sorted ranges for the random-access path.

use core::cmp;
use core::mem;
use core::ptr;

/// Scratch space shared by every merge of one sort call.
///
/// Nothing is allocated until the first merge that cannot exit early. That merge reserves up to
/// `wanted` elements, all later merges reuse them.
pub(crate) struct Scratch<T> {
    // Length stays 0, the buffer never owns the elements copied into it.
    buf: Vec<T>,
    wanted: usize,
}

impl<T> Scratch<T> {
    pub(crate) fn new(wanted: usize) -> Self {
        Scratch {
            buf: Vec::new(),
            wanted,
        }
    }

    fn get(&mut self) -> (*mut T, usize) {
        if self.wanted > 0 {
            self.buf = make_scratch(mem::take(&mut self.wanted));
        }
        (self.buf.as_mut_ptr(), self.buf.capacity())
    }
}

/// Merges the sorted ranges `v[..mid]` and `v[mid..]` into one sorted range.
///
/// Uses `scratch` for the shorter of the two ranges. If it is too small, the merge splits the
/// ranges until the pieces fit. Without any scratch space the merge works purely by rotation.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn merge<T, F>(v: &mut [T], mid: usize, scratch: &mut Scratch<T>, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if mem::size_of::<T>() == 0 || mid == 0 || mid >= len {
        return;
    }

    // The ranges are already in order, a common case for inputs that are mostly sorted.
    if !is_less(&v[mid], &v[mid - 1]) {
        return;
    }

    let (buf, buf_cap) = scratch.get();

    // SAFETY: `buf` has room for `buf_cap` elements and is not aliased by `v`.
    unsafe {
        merge_with_scratch(v, mid, buf, buf_cap, is_less);
    }
}

/// Merges the three adjacent sorted ranges `v[..b]`, `v[b..c]` and `v[c..]`.
///
/// The pair that makes the first merge cheaper is merged first: if the first range is shorter than
/// the last one, `v[..b]` with `v[b..c]`, otherwise `v[b..c]` with `v[c..]`.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn merge3<T, F>(
    v: &mut [T],
    b: usize,
    c: usize,
    scratch: &mut Scratch<T>,
    is_less: &mut F,
) where
    F: FnMut(&T, &T) -> bool,
{
    debug_assert!(b <= c && c <= v.len());

    if b < v.len() - c {
        merge(&mut v[..c], b, scratch, is_less);
        merge(v, c, scratch, is_less);
    } else {
        merge(&mut v[b..], c - b, scratch, is_less);
        merge(v, b, scratch, is_less);
    }
}

/// Merges the sorted segments delimited by `runs` into one.
///
/// `runs` holds the ascending segment boundaries, starting with 0 and ending with `v.len()`. Every
/// pass walks the list from left to right, merging each segment with its right neighbour and
/// removing the boundary between them, until a single segment remains.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn merge_runs<T, F>(
    v: &mut [T],
    runs: &mut Vec<usize>,
    scratch: &mut Scratch<T>,
    is_less: &mut F,
) where
    F: FnMut(&T, &T) -> bool,
{
    debug_assert!(runs.first() == Some(&0) && runs.last() == Some(&v.len()));

    while runs.len() > 2 {
        let mut i = 0;
        while i + 2 < runs.len() {
            let (start, mid, end) = (runs[i], runs[i + 1], runs[i + 2]);
            merge(&mut v[start..end], mid - start, scratch, is_less);
            runs.remove(i + 1);
            i += 1;
        }
    }
}

// Allocates scratch space for up to `len` elements. In low-memory situations a smaller request is
// preferred over failing, down to no scratch space at all.
fn make_scratch<T>(mut len: usize) -> Vec<T> {
    let mut buf = Vec::new();
    while len > 0 {
        if buf.try_reserve_exact(len).is_ok() {
            break;
        }
        len /= 2;
    }
    buf
}

/// Merges `v[..mid]` and `v[mid..]` using up to `buf_cap` elements of scratch space at `buf`.
///
/// Whenever the shorter range fits into the scratch space, it is merged with a buffered merge.
/// Otherwise the longer range is cut in half, the matching cut in the other range is found by binary
/// search and the middle part is rotated so that the problem splits into two independent merges.
///
/// # Safety
///
/// `buf` must be valid for writes of `buf_cap` elements and must not overlap `v`.
pub(crate) unsafe fn merge_with_scratch<T, F>(
    mut v: &mut [T],
    mut mid: usize,
    buf: *mut T,
    buf_cap: usize,
    is_less: &mut F,
) where
    F: FnMut(&T, &T) -> bool,
{
    loop {
        let len = v.len();
        if mid == 0 || mid >= len {
            return;
        }

        if len == 2 {
            if is_less(&v[1], &v[0]) {
                v.swap(0, 1);
            }
            return;
        }

        if cmp::min(mid, len - mid) <= buf_cap {
            // SAFETY: both ranges are non-empty and the shorter one fits into `buf`.
            unsafe {
                merge_buffered(v, mid, buf, is_less);
            }
            return;
        }

        let (left_cut, right_cut) = if mid > len - mid {
            let left_cut = mid / 2;
            let right_cut = mid + lower_bound(&v[mid..], &v[left_cut], is_less);
            (left_cut, right_cut)
        } else {
            let right_cut = mid + (len - mid) / 2;
            let left_cut = upper_bound(&v[..mid], &v[right_cut], is_less);
            (left_cut, right_cut)
        };

        // v[left_cut..mid] and v[mid..right_cut] trade places.
        v[left_cut..right_cut].rotate_left(mid - left_cut);
        let new_mid = left_cut + (right_cut - mid);

        let (left, right) = v.split_at_mut(new_mid);
        let right_mid = mid - left_cut;

        // Recurse into the shorter side only.
        if left.len() < right.len() {
            // SAFETY: forwarded from the caller.
            unsafe {
                merge_with_scratch(left, left_cut, buf, buf_cap, is_less);
            }
            v = right;
            mid = right_mid;
        } else {
            // SAFETY: forwarded from the caller.
            unsafe {
                merge_with_scratch(right, right_mid, buf, buf_cap, is_less);
            }
            v = left;
            mid = left_cut;
        }
    }
}

// Index of the first element of `v` that is not less than `x`.
fn lower_bound<T, F>(v: &[T], x: &T, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    v.partition_point(|e| is_less(e, x))
}

// Index of the first element of `v` that is greater than `x`.
fn upper_bound<T, F>(v: &[T], x: &T, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    v.partition_point(|e| !is_less(x, e))
}

/// Merges non-decreasing runs `v[..mid]` and `v[mid..]` using `buf` as temporary storage, and
/// stores the result into `v[..]`.
///
/// # Safety
///
/// The two slices must be non-empty and `mid` must be in bounds. Buffer `buf` must be long enough
/// to hold a copy of the shorter slice. Also, `T` must not be a zero-sized type.
#[inline(never)]
unsafe fn merge_buffered<T, F>(v: &mut [T], mid: usize, buf: *mut T, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    let arr_ptr = v.as_mut_ptr();
    let (v_mid, v_end) = unsafe { (arr_ptr.add(mid), arr_ptr.add(len)) };

    // The merge process first copies the shorter run into `buf`. Then it traces the newly copied
    // run and the longer run forwards (or backwards), comparing their next unconsumed elements and
    // copying the lesser (or greater) one into `v`.
    //
    // As soon as the shorter run is fully consumed, the process is done. If the longer run gets
    // consumed first, then we must copy whatever is left of the shorter run into the remaining
    // hole in `v`.
    //
    // Panic safety:
    //
    // If `is_less` panics at any point during the process, `hole` will get dropped and fill the
    // hole in `v` with the unconsumed range in `buf`, thus ensuring that `v` still holds every
    // object it initially held exactly once.
    let mut hole;

    if mid <= len - mid {
        // The left run is shorter.
        unsafe {
            ptr::copy_nonoverlapping(arr_ptr, buf, mid);
            hole = MergeHole {
                start: buf,
                end: buf.add(mid),
                dest: arr_ptr,
            };
        }

        let left = &mut hole.start;
        let mut right = v_mid;
        let out = &mut hole.dest;

        while *left < hole.end && right < v_end {
            // Take from the right run only if strictly smaller.
            unsafe {
                let to_copy = if is_less(&*right, &**left) {
                    get_and_increment(&mut right)
                } else {
                    get_and_increment(left)
                };
                ptr::copy_nonoverlapping(to_copy, get_and_increment(out), 1);
            }
        }
    } else {
        // The right run is shorter.
        unsafe {
            ptr::copy_nonoverlapping(v_mid, buf, len - mid);
            hole = MergeHole {
                start: buf,
                end: buf.add(len - mid),
                dest: v_mid,
            };
        }

        // Both runs are traced from their ends.
        let left = &mut hole.dest;
        let right = &mut hole.end;
        let mut out = v_end;

        while arr_ptr < *left && buf < *right {
            unsafe {
                let to_copy = if is_less(&*right.sub(1), &*left.sub(1)) {
                    decrement_and_get(left)
                } else {
                    decrement_and_get(right)
                };
                ptr::copy_nonoverlapping(to_copy, decrement_and_get(&mut out), 1);
            }
        }
    }
    // `hole` gets dropped here and moves whatever is left of the shorter run into place.

    unsafe fn get_and_increment<T>(ptr: &mut *mut T) -> *mut T {
        let old = *ptr;
        *ptr = unsafe { ptr.add(1) };
        old
    }

    unsafe fn decrement_and_get<T>(ptr: &mut *mut T) -> *mut T {
        *ptr = unsafe { ptr.sub(1) };
        *ptr
    }

    // When dropped, copies the range `start..end` into `dest..`.
    struct MergeHole<T> {
        start: *mut T,
        end: *mut T,
        dest: *mut T,
    }

    impl<T> Drop for MergeHole<T> {
        fn drop(&mut self) {
            // SAFETY: `T` is not a zero-sized type, and these are pointers into a slice's elements.
            unsafe {
                let len = self.end.offset_from(self.start) as usize;
                ptr::copy_nonoverlapping(self.start, self.dest, len);
            }
        }
    }
}
