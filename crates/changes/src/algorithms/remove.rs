//! Value-, index- and predicate-based removal.
//!
//! ## Purpose
//!
//! This module implements the removal family: dropping every or only the
//! first occurrences of target values, dropping elements at given indices,
//! and dropping elements that satisfy a predicate. It also provides the
//! fused [`RemovePlan`] that applies any run of value removals in one pass.
//!
//! ## Design notes
//!
//! * **Fused plan**: All "all" targets form one sorted-distinct set; "first"
//!   targets carry a quota counting how many removal calls named them.
//! * **Priority**: A value named by both an "all" and a "first" removal is
//!   treated as "all" and every instance is removed.
//! * **Two-phase form**: Besides the one-pass sequential kernel, the plan can
//!   locate "first" candidates per index range and merge them, which the
//!   parallel extension uses to get exactly the sequential result.
//!
//! ## Key concepts
//!
//! * **Occurrence**: Whether a removal targets every instance or the first one.
//! * **Quota**: Number of leading instances of a value that "first" removals drop.
//!
//! ## Invariants
//!
//! * Surviving elements keep their relative order.
//! * Applying a plan equals applying its member removals one after another.
//!
//! ## Non-goals
//!
//! * This module does not partition work; see the parallel extension crate.

// External dependencies
use core::ops::Range;

// Internal dependencies
use crate::math::element::{element_cmp, Element};
use crate::primitives::distinct::sorted_distinct_by;
use crate::primitives::errors::{ChangeError, ChangeResult};
use crate::primitives::functions::Predicate;
use crate::primitives::search::TargetSet;

// ============================================================================
// Occurrence Mode
// ============================================================================

/// Which instances of a target value an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occurrence {
    /// Every instance.
    All,
    /// Only the first instance.
    First,
}

// ============================================================================
// Remove Plan
// ============================================================================

/// Combined removal of one or more value-removal operations.
#[derive(Debug, Clone)]
pub struct RemovePlan<T> {
    all: TargetSet<T>,
    first: TargetSet<T>,
    quota: Vec<usize>,
}

impl<T: Element> RemovePlan<T> {
    /// Build a plan from removal members in application order.
    pub fn from_members<'a, I>(members: I) -> Self
    where
        I: IntoIterator<Item = (&'a [T], Occurrence)>,
    {
        let mut all_targets = Vec::new();
        let mut first_targets = Vec::new();

        for (targets, mode) in members {
            match mode {
                Occurrence::All => all_targets.extend_from_slice(targets),
                // Each call drops at most one instance per distinct target.
                Occurrence::First => {
                    first_targets.extend(sorted_distinct_by(targets, element_cmp::<T>))
                }
            }
        }

        let all = TargetSet::new(&all_targets, element_cmp::<T>);
        first_targets.retain(|v| !all.contains(v, element_cmp::<T>));
        first_targets.sort_by(element_cmp::<T>);

        let first = TargetSet::new(&first_targets, element_cmp::<T>);
        let mut quota = vec![0; first.len()];
        for value in &first_targets {
            if let Some(slot) = first.position(value, element_cmp::<T>) {
                quota[slot] += 1;
            }
        }

        Self { all, first, quota }
    }

    /// Plan for a single removal.
    pub fn single(targets: &[T], mode: Occurrence) -> Self {
        Self::from_members([(targets, mode)])
    }

    /// Targets removed at every instance.
    pub fn all_targets(&self) -> &TargetSet<T> {
        &self.all
    }

    /// Targets removed only at their leading instances.
    pub fn first_targets(&self) -> &TargetSet<T> {
        &self.first
    }

    /// Number of leading instances removed for the `slot`-th first target.
    pub fn quota(&self, slot: usize) -> usize {
        self.quota[slot]
    }

    /// Whether `value` is removed at every instance.
    #[inline]
    pub fn removes_all(&self, value: &T) -> bool {
        self.all.contains(value, element_cmp::<T>)
    }

    // ========================================================================
    // Two-phase form
    // ========================================================================

    /// Leading indices (absolute) of every first target within `range`, at
    /// most `quota` per target.
    pub fn locate_first(&self, values: &[T], range: Range<usize>) -> Vec<Vec<usize>> {
        let mut found: Vec<Vec<usize>> = vec![Vec::new(); self.first.len()];
        if self.first.is_empty() {
            return found;
        }

        let mut pending: usize = self.quota.iter().sum();
        for i in range {
            if pending == 0 {
                break;
            }
            if let Some(slot) = self.first.position(&values[i], element_cmp::<T>) {
                if found[slot].len() < self.quota[slot] {
                    found[slot].push(i);
                    pending -= 1;
                }
            }
        }
        found
    }

    /// Merge per-range candidates (in ascending range order) into the sorted
    /// list of indices dropped by first targets.
    pub fn resolve_first(&self, per_range: Vec<Vec<Vec<usize>>>) -> Vec<usize> {
        let mut merged: Vec<Vec<usize>> = vec![Vec::new(); self.first.len()];
        for local in per_range {
            for (slot, indices) in local.into_iter().enumerate() {
                let room = self.quota[slot].saturating_sub(merged[slot].len());
                merged[slot].extend(indices.into_iter().take(room));
            }
        }

        let mut drops: Vec<usize> = merged.into_iter().flatten().collect();
        drops.sort_unstable();
        drops
    }
}

// ============================================================================
// Sequential Kernels
// ============================================================================

/// Apply a removal plan in one pass.
pub fn remove_with_plan<T: Element>(values: Vec<T>, plan: &RemovePlan<T>) -> Vec<T> {
    let mut remaining = plan.quota.clone();
    let mut kept = Vec::with_capacity(values.len());

    for value in values {
        if plan.removes_all(&value) {
            continue;
        }
        if let Some(slot) = plan.first.position(&value, element_cmp::<T>) {
            if remaining[slot] > 0 {
                remaining[slot] -= 1;
                continue;
            }
        }
        kept.push(value);
    }

    kept
}

/// Sorted, distinct, bounds-checked index list.
pub fn checked_indices(indices: &[usize], len: usize) -> ChangeResult<Vec<usize>> {
    if let Some(&index) = indices.iter().find(|&&i| i >= len) {
        return Err(ChangeError::IndexOutOfBounds { index, len });
    }
    Ok(sorted_distinct_by(indices, usize::cmp))
}

/// Whether a sorted index list contains `index`.
#[inline]
pub fn index_listed(sorted: &[usize], index: usize) -> bool {
    sorted.binary_search(&index).is_ok()
}

/// Drop every element whose index is listed.
pub fn remove_indices<T>(values: Vec<T>, indices: &[usize]) -> ChangeResult<Vec<T>> {
    let drops = checked_indices(indices, values.len())?;
    if drops.is_empty() {
        return Ok(values);
    }

    Ok(values
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !index_listed(&drops, *i))
        .map(|(_, v)| v)
        .collect())
}

/// Drop every element satisfying `predicate`.
pub fn remove_where<T>(mut values: Vec<T>, predicate: &Predicate<T>) -> Vec<T> {
    values.retain(|v| !predicate(v));
    values
}
