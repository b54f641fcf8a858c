//! Searching sorted target sets.
//!
//! ## Purpose
//!
//! This module provides the lookup structures used by value-addressed
//! operations: a sorted, distinct set of targets and a step search that
//! gallops through large target sets before finishing with a binary search.
//!
//! ## Design notes
//!
//! * **Comparator-driven**: All lookups take the element ordering as a closure.
//! * **Step search**: Probes every `step`-th target until it passes the value,
//!   then binary searches the final window. Small sets use plain binary search.
//!
//! ## Invariants
//!
//! * A [`TargetSet`] is sorted ascending and contains no two equal values.
//! * Search results follow `slice::binary_search` conventions
//!   (`Ok(position)` on hit, `Err(insertion_point)` on miss).
//!
//! ## Non-goals
//!
//! * This module does not define equality; callers supply the ordering.

// External dependencies
use core::cmp::Ordering;

// Internal dependencies
use crate::primitives::distinct::sorted_distinct_by;

/// Target sets smaller than this are searched with a plain binary search.
const STEP_SEARCH_THRESHOLD: usize = 64;

// ============================================================================
// Search Functions
// ============================================================================

/// Search a sorted slice by probing every `step`-th element, then binary
/// searching the window that must contain `value`.
pub fn step_search_by<T, F>(sorted: &[T], value: &T, step: usize, cmp: F) -> Result<usize, usize>
where
    F: Fn(&T, &T) -> Ordering,
{
    let step = step.max(1);
    let mut lo = 0;
    let mut hi = step;

    while hi < sorted.len() && cmp(&sorted[hi], value) == Ordering::Less {
        lo = hi;
        hi += step;
    }

    // `sorted[hi]` may equal `value`, so the window includes it.
    let hi = (hi + 1).min(sorted.len());
    sorted[lo..hi]
        .binary_search_by(|candidate| cmp(candidate, value))
        .map(|i| lo + i)
        .map_err(|i| lo + i)
}

// ============================================================================
// Target Set
// ============================================================================

/// Sorted, distinct set of target values with fast membership queries.
#[derive(Debug, Clone)]
pub struct TargetSet<T> {
    values: Vec<T>,
    step: usize,
}

impl<T: Clone> TargetSet<T> {
    /// Build a target set from arbitrary values under the given ordering.
    pub fn new<F>(values: &[T], cmp: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering,
    {
        let values = sorted_distinct_by(values, cmp);
        let step = (values.len() / 16).max(1);
        Self { values, step }
    }

    /// Position of `value` in the set, if present.
    pub fn position<F>(&self, value: &T, cmp: F) -> Option<usize>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        let found = if self.values.len() < STEP_SEARCH_THRESHOLD {
            self.values.binary_search_by(|candidate| cmp(candidate, value))
        } else {
            step_search_by(&self.values, value, self.step, cmp)
        };
        found.ok()
    }

    /// Whether `value` is in the set.
    #[inline]
    pub fn contains<F>(&self, value: &T, cmp: F) -> bool
    where
        F: Fn(&T, &T) -> Ordering,
    {
        self.position(value, cmp).is_some()
    }

    /// Number of distinct targets.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set has no targets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sorted distinct targets.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_search_matches_binary_search() {
        let sorted: Vec<i32> = (0..200).map(|i| i * 2).collect();
        for value in -3..405 {
            for step in [1, 2, 3, 16, 199, 200, 500] {
                assert_eq!(
                    step_search_by(&sorted, &value, step, i32::cmp),
                    sorted.binary_search(&value),
                    "value {value} step {step}"
                );
            }
        }
    }

    #[test]
    fn test_target_set_dedups() {
        let set = TargetSet::new(&[5, 1, 5, 3, 1], i32::cmp);
        assert_eq!(set.values(), &[1, 3, 5]);
        assert_eq!(set.position(&5, i32::cmp), Some(2));
        assert!(!set.contains(&4, i32::cmp));
    }

    #[test]
    fn test_step_search_hits_step_boundaries() {
        let sorted: Vec<i32> = (0..64).collect();
        for step in [1, 4, 8] {
            for value in (0..64).step_by(step) {
                assert_eq!(step_search_by(&sorted, &value, step, i32::cmp), Ok(value as usize));
            }
        }
        assert_eq!(step_search_by(&sorted, &64, 4, i32::cmp), Err(64));
    }

    #[test]
    fn test_target_set_around_step_threshold() {
        for size in [63, 64, 65] {
            let values: Vec<i32> = (0..size).collect();
            let set = TargetSet::new(&values, i32::cmp);
            for value in &values {
                assert_eq!(set.position(value, i32::cmp), Some(*value as usize), "size {size}");
            }
            assert!(!set.contains(&size, i32::cmp));
            assert!(!set.contains(&-1, i32::cmp));
        }
    }
}
