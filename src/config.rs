//! Tuning constants shared by the scanners and the fallback sorters.

/// Inputs shorter than this skip run scanning and go straight to the fallback sorter, the scan
/// would not pay for itself.
pub const SMALL_SORT_THRESHOLD: usize = 80;

/// Partitions shorter than this are sorted with insertion sort by pdqsort.
pub const INSERTION_SORT_THRESHOLD: usize = 24;

/// Partitions of at least this length pick their pivot as pseudo-median of nine instead of median
/// of three.
pub const NINTHER_THRESHOLD: usize = 80;

/// Number of elements traced per side in one step of the block partition. Offsets are stored as
/// `u8`, so this must not exceed 256.
pub const BLOCK_SIZE: usize = 64;

/// Number of element moves after which the partial insertion sort gives up.
pub const PARTIAL_INSERTION_SORT_LIMIT: usize = 8;

/// Ranges shorter than this are insertion sorted by the bidirectional quicksort.
pub const BIDIRECTIONAL_INSERTION_SORT_THRESHOLD: usize = 42;

/// Minimum length a run needs to be kept and merged instead of re-sorted:
/// `len / floor(log2(len))`.
///
/// Only meaningful for `len >= 2`.
#[inline]
pub const fn qualification_threshold(len: usize) -> usize {
    len / (len.ilog2() as usize)
}

const _: () = assert!(BLOCK_SIZE <= u8::MAX as usize + 1);
