use core::fmt;
use core::iter::FusedIterator;
use core::mem;

use super::Bidirectional;

/// Cursor value that marks the position past the last element.
const END: usize = usize::MAX;

#[derive(Clone)]
struct Node<T> {
    value: T,
    prev: usize,
    next: usize,
}

/// A doubly linked list whose nodes live in one arena.
///
/// It only offers stepping from one element to its neighbours, which makes it the reference
/// sequence for the bidirectional code path. Cursors are node indices, sorting swaps the values
/// between nodes and never relinks them.
#[derive(Clone)]
pub struct List<T> {
    nodes: Vec<Node<T>>,
    head: usize,
    tail: usize,
}

impl<T> List<T> {
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: END,
            tail: END,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: END,
            tail: END,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push_back(&mut self, value: T) {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            value,
            prev: self.tail,
            next: END,
        });

        if self.tail == END {
            self.head = idx;
        } else {
            self.nodes[self.tail].next = idx;
        }
        self.tail = idx;
    }

    pub fn push_front(&mut self, value: T) {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            value,
            prev: END,
            next: self.head,
        });

        if self.head == END {
            self.tail = idx;
        } else {
            self.nodes[self.head].prev = idx;
        }
        self.head = idx;
    }

    pub fn front(&self) -> Option<&T> {
        self.nodes.get(self.head).map(|node| &node.value)
    }

    pub fn back(&self) -> Option<&T> {
        self.nodes.get(self.tail).map(|node| &node.value)
    }

    /// Iterates the values from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.nodes.reserve(iter.size_hint().0);
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> From<List<T>> for Vec<T> {
    fn from(list: List<T>) -> Self {
        let mut order = Vec::with_capacity(list.len());
        let mut idx = list.head;
        while idx != END {
            order.push(idx);
            idx = list.nodes[idx].next;
        }

        let mut slots: Vec<Option<T>> =
            list.nodes.into_iter().map(|node| Some(node.value)).collect();
        order.into_iter().filter_map(|idx| slots[idx].take()).collect()
    }
}

impl<T> Bidirectional for List<T> {
    type Item = T;
    type Cursor = usize;

    #[inline]
    fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    fn begin(&self) -> usize {
        self.head
    }

    #[inline]
    fn end(&self) -> usize {
        END
    }

    #[inline]
    fn next(&self, cursor: usize) -> usize {
        self.nodes[cursor].next
    }

    #[inline]
    fn prev(&self, cursor: usize) -> usize {
        if cursor == END {
            self.tail
        } else {
            self.nodes[cursor].prev
        }
    }

    #[inline]
    fn get(&self, cursor: usize) -> &T {
        &self.nodes[cursor].value
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }

        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (left, right) = self.nodes.split_at_mut(hi);
        mem::swap(&mut left[lo].value, &mut right[0].value);
    }
}

/// Iterator over the values of a [`List`], see [`List::iter`].
pub struct Iter<'a, T> {
    list: &'a List<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }

        let node = &self.list.nodes[self.front];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }

        let node = &self.list.nodes[self.back];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
