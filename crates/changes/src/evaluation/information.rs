//! Read-only queries over materialized arrays.
//!
//! ## Purpose
//!
//! This module answers questions about an array without producing a new
//! chain: where target values first occur, every index matching a target,
//! elements at indices or matching a predicate, and per-target counts.
//!
//! ## Design notes
//!
//! * **Sorted lookups**: Targets are deduplicated and sorted once, then every
//!   element is binary searched, giving `O(n log k)` for `k` targets.
//! * **Caller order**: Per-target results are returned in the order the
//!   caller listed the targets.
//!
//! ## Non-goals
//!
//! * This module does not materialize chains; callers pass arrays.

// Internal dependencies
use crate::algorithms::retain::locate_first_targets;
use crate::math::element::{element_cmp, Element};
use crate::primitives::errors::{ChangeError, ChangeResult};
use crate::primitives::search::TargetSet;

// ============================================================================
// Index Queries
// ============================================================================

/// Earliest index of each target, in the caller's target order.
pub fn find_first<T: Element>(values: &[T], targets: &[T]) -> Vec<Option<usize>> {
    let set = TargetSet::new(targets, element_cmp::<T>);
    let found = locate_first_targets(values, &set, 0..values.len());

    targets
        .iter()
        .map(|t| set.position(t, element_cmp::<T>).and_then(|slot| found[slot]))
        .collect()
}

/// Every index holding any of the targets, ascending.
pub fn find_all<T: Element>(values: &[T], targets: &[T]) -> Vec<usize> {
    let set = TargetSet::new(targets, element_cmp::<T>);
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| set.contains(v, element_cmp::<T>))
        .map(|(i, _)| i)
        .collect()
}

// ============================================================================
// Element Queries
// ============================================================================

/// Elements at the given indices, in the order requested.
pub fn get_at<T: Clone>(values: &[T], indices: &[usize]) -> ChangeResult<Vec<T>> {
    indices
        .iter()
        .map(|&index| {
            values
                .get(index)
                .cloned()
                .ok_or(ChangeError::IndexOutOfBounds {
                    index,
                    len: values.len(),
                })
        })
        .collect()
}

/// First element satisfying `predicate`.
pub fn get_first<T: Clone, P>(values: &[T], predicate: P) -> Option<T>
where
    P: Fn(&T) -> bool,
{
    values.iter().find(|v| predicate(*v)).cloned()
}

/// Every element satisfying `predicate`, in order.
pub fn get_all<T: Clone, P>(values: &[T], predicate: P) -> Vec<T>
where
    P: Fn(&T) -> bool,
{
    values.iter().filter(|v| predicate(*v)).cloned().collect()
}

// ============================================================================
// Counting
// ============================================================================

/// Number of instances of each target, in the caller's target order.
pub fn count_of<T: Element>(values: &[T], targets: &[T]) -> Vec<usize> {
    let set = TargetSet::new(targets, element_cmp::<T>);
    let mut counts = vec![0; set.len()];
    for value in values {
        if let Some(slot) = set.position(value, element_cmp::<T>) {
            counts[slot] += 1;
        }
    }

    targets
        .iter()
        .map(|t| set.position(t, element_cmp::<T>).map_or(0, |slot| counts[slot]))
        .collect()
}

/// Number of elements satisfying `predicate`.
pub fn count_where<T, P>(values: &[T], predicate: P) -> usize
where
    P: Fn(&T) -> bool,
{
    values.iter().filter(|v| predicate(*v)).count()
}

/// Whether every target occurs at least once.
pub fn contains_all<T: Element>(values: &[T], targets: &[T]) -> bool {
    find_first(values, targets).iter().all(Option::is_some)
}
