//! Contiguous partitioning of index ranges.
//!
//! ## Purpose
//!
//! This module splits an array of length `n` into `P` contiguous, near-equal
//! index ranges for partitioned execution.
//!
//! ## Design notes
//!
//! * **Clamped**: `P = min(requested, n)`, so no range is ever empty.
//! * **Remainder**: Every range has `n / P` elements except the final one,
//!   which absorbs the remainder.
//!
//! ## Invariants
//!
//! * Ranges are ordered, disjoint, and cover `0..n` exactly.
//! * An empty array yields no ranges.
//!
//! ## Non-goals
//!
//! * This module does not schedule work; it only computes the layout.

// External dependencies
use core::ops::Range;

// ============================================================================
// Partitioning
// ============================================================================

/// Effective partition count for an array of `len` elements.
///
/// A request of zero is treated as one worker.
#[inline]
pub fn partition_count(len: usize, requested: usize) -> usize {
    len.min(requested.max(1))
}

/// Split `0..len` into at most `requested` contiguous ranges.
pub fn partition(len: usize, requested: usize) -> Vec<Range<usize>> {
    let parts = partition_count(len, requested);
    if parts == 0 {
        return Vec::new();
    }

    let step = len / parts;
    let mut ranges = Vec::with_capacity(parts);
    for i in 0..parts {
        let start = i * step;
        let end = if i + 1 == parts { len } else { start + step };
        ranges.push(start..end);
    }
    ranges
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_covers_range() {
        let ranges = partition(10, 3);
        assert_eq!(ranges, vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn test_partition_clamps_to_len() {
        let ranges = partition(2, 8);
        assert_eq!(ranges, vec![0..1, 1..2]);
        assert!(partition(0, 4).is_empty());
        assert_eq!(partition(5, 0), vec![0..5]);
    }
}
