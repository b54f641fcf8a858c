//! Value- and predicate-based retention.
//!
//! ## Purpose
//!
//! This module keeps elements instead of dropping them: every instance of a
//! target value, only the first instance of each target value, or elements
//! satisfying every predicate of a fused run.
//!
//! ## Invariants
//!
//! * Kept elements preserve their relative order.
//! * Retaining "first" keeps at most one element per distinct target.

// External dependencies
use core::ops::Range;

// Internal dependencies
use crate::algorithms::remove::Occurrence;
use crate::math::element::{element_cmp, Element};
use crate::primitives::functions::Predicate;
use crate::primitives::search::TargetSet;

// ============================================================================
// Value Retention
// ============================================================================

/// Earliest index (absolute) of each target within `range`, by target slot.
pub fn locate_first_targets<T: Element>(
    values: &[T],
    targets: &TargetSet<T>,
    range: Range<usize>,
) -> Vec<Option<usize>> {
    let mut found = vec![None; targets.len()];
    let mut pending = targets.len();

    for i in range {
        if pending == 0 {
            break;
        }
        if let Some(slot) = targets.position(&values[i], element_cmp::<T>) {
            if found[slot].is_none() {
                found[slot] = Some(i);
                pending -= 1;
            }
        }
    }
    found
}

/// Keep elements matching `targets`, every instance or only the first.
pub fn retain_values<T: Element>(
    values: Vec<T>,
    targets: &TargetSet<T>,
    mode: Occurrence,
) -> Vec<T> {
    match mode {
        Occurrence::All => {
            let mut values = values;
            values.retain(|v| targets.contains(v, element_cmp::<T>));
            values
        }
        Occurrence::First => {
            let mut keep: Vec<usize> = locate_first_targets(&values, targets, 0..values.len())
                .into_iter()
                .flatten()
                .collect();
            keep.sort_unstable();
            retain_at(values, &keep)
        }
    }
}

/// Keep only the elements at the listed (sorted) indices.
pub fn retain_at<T>(values: Vec<T>, sorted_indices: &[usize]) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter(|(i, _)| sorted_indices.binary_search(i).is_ok())
        .map(|(_, v)| v)
        .collect()
}

// ============================================================================
// Predicate Retention
// ============================================================================

/// Whether `value` satisfies every predicate.
#[inline]
pub fn satisfies_all<T>(value: &T, predicates: &[Predicate<T>]) -> bool {
    predicates.iter().all(|p| p(value))
}

/// Keep elements satisfying every predicate.
pub fn retain_where<T>(mut values: Vec<T>, predicates: &[Predicate<T>]) -> Vec<T> {
    values.retain(|v| satisfies_all(v, predicates));
    values
}
