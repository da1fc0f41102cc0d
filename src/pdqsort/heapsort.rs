#[cfg(test)]
use std::cell::Cell;

#[cfg(test)]
thread_local! {
    /// How often the escape hatch ran on this thread.
    pub(crate) static HEAPSORT_CALLS: Cell<usize> = Cell::new(0);
}

/// Sorts `v` using heapsort, which guarantees *O*(*n* \* log(*n*)) worst-case.
///
/// The heap is a max-heap laid out in `v` itself, the greatest remaining element is swapped behind
/// the shrinking heap on every step.
#[cold]
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn heapsort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    #[cfg(test)]
    HEAPSORT_CALLS.with(|calls| calls.set(calls.get() + 1));

    let len = v.len();

    for root in (0..len / 2).rev() {
        sift_down(v, root, is_less);
    }

    for heap_len in (1..len).rev() {
        v.swap(0, heap_len);
        sift_down(&mut v[..heap_len], 0, is_less);
    }
}

// Restores `parent >= child` below `node`, assuming both subtrees of `node` already are heaps.
fn sift_down<T, F>(heap: &mut [T], mut node: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    loop {
        let left = 2 * node + 1;
        if left >= heap.len() {
            return;
        }

        let right = left + 1;
        let greater = if right < heap.len() && is_less(&heap[left], &heap[right]) {
            right
        } else {
            left
        };

        if !is_less(&heap[node], &heap[greater]) {
            return;
        }

        heap.swap(node, greater);
        node = greater;
    }
}

/// Calls of `heapsort` on the current thread so far.
#[cfg(test)]
pub(crate) fn heapsort_calls() -> usize {
    HEAPSORT_CALLS.with(Cell::get)
}
