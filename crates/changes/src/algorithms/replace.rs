//! Index-, value- and predicate-based replacement.
//!
//! ## Purpose
//!
//! This module implements the replacement family: writing values at given
//! indices (fusable through [`ReplaceAtPlan`]), substituting values through
//! an old-to-new [`ValueMap`], replacing only the earliest or latest
//! instance of each old value, and replacing elements matched by a predicate.
//!
//! ## Design notes
//!
//! * **Most recent wins**: A replace-at plan lists pairs most recent first and
//!   keeps the first pair per index.
//! * **Later pair wins**: Within one value map, a repeated old value maps to
//!   the value given by its last pair.
//! * **Two passes**: First/last replacement locates one index per old value,
//!   then writes exactly those indices. The location step works per index
//!   range and candidates merge by strict minimum (first) or maximum (last).
//!
//! ## Invariants
//!
//! * Replacement never changes the array length.
//!
//! ## Non-goals
//!
//! * This module does not validate flattened pair arity; the API does.

// External dependencies
use core::cmp::Ordering;
use core::ops::Range;

// Internal dependencies
use crate::math::element::{element_cmp, Element};
use crate::primitives::errors::{ChangeError, ChangeResult};
use crate::primitives::functions::Predicate;

// ============================================================================
// Selection Modes
// ============================================================================

/// Which single instance a first/last replacement addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// The earliest instance.
    First,
    /// The latest instance.
    Last,
}

/// Which matches a predicate replacement addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    /// The earliest match.
    First,
    /// The latest match.
    Last,
    /// Every match.
    All,
}

// ============================================================================
// Replace-at Plan
// ============================================================================

/// Combined index writes of one or more replace-at operations.
#[derive(Debug, Clone)]
pub struct ReplaceAtPlan<T> {
    writes: Vec<(usize, T)>,
    limits: Vec<usize>,
}

impl<T: Clone> ReplaceAtPlan<T> {
    /// Build a plan from members given in application order.
    pub fn from_members<'a, I>(members: I) -> Self
    where
        I: IntoIterator<Item = &'a [(usize, T)]>,
        T: 'a,
    {
        let members: Vec<&[(usize, T)]> = members.into_iter().collect();

        // Highest index of each member, in application order.
        let limits = members
            .iter()
            .filter_map(|pairs| pairs.iter().map(|(index, _)| *index).max())
            .collect();

        // Most recent operation first, later pairs of one call before earlier ones.
        let mut writes: Vec<(usize, T)> = members
            .iter()
            .rev()
            .flat_map(|pairs| pairs.iter().rev().cloned())
            .collect();

        writes.sort_by_key(|(index, _)| *index);
        writes.dedup_by_key(|(index, _)| *index);

        Self { writes, limits }
    }

    /// Plan for a single replace-at call.
    pub fn single(pairs: &[(usize, T)]) -> Self {
        Self::from_members([pairs])
    }

    /// Index-sorted writes, one per index.
    pub fn writes(&self) -> &[(usize, T)] {
        &self.writes
    }

    /// Fail if any write falls outside an array of `len` elements.
    ///
    /// Reports the highest index of the earliest offending member, which is
    /// what applying the members one by one would report.
    pub fn check_bounds(&self, len: usize) -> ChangeResult<()> {
        match self.limits.iter().find(|&&index| index >= len) {
            Some(&index) => Err(ChangeError::IndexOutOfBounds { index, len }),
            None => Ok(()),
        }
    }
}

/// Apply a replace-at plan in one pass.
pub fn replace_at<T: Clone>(mut values: Vec<T>, plan: &ReplaceAtPlan<T>) -> ChangeResult<Vec<T>> {
    plan.check_bounds(values.len())?;
    for (index, value) in &plan.writes {
        values[*index] = value.clone();
    }
    Ok(values)
}

// ============================================================================
// Value Map
// ============================================================================

/// Sorted old-to-new value map with one entry per distinct old value.
#[derive(Debug, Clone)]
pub struct ValueMap<T> {
    entries: Vec<(T, T)>,
}

impl<T: Element> ValueMap<T> {
    /// Build a map from `(old, new)` pairs; a repeated old value keeps its last pair.
    pub fn new(pairs: &[(T, T)]) -> Self {
        let mut entries: Vec<(T, T)> = pairs.iter().rev().cloned().collect();
        entries.sort_by(|a, b| a.0.compare(&b.0));
        entries.dedup_by(|current, previous| current.0.same(&previous.0));
        Self { entries }
    }

    /// Slot and replacement for `value`, if mapped.
    #[inline]
    pub fn lookup(&self, value: &T) -> Option<(usize, &T)> {
        self.entries
            .binary_search_by(|(old, _)| element_cmp(old, value))
            .ok()
            .map(|slot| (slot, &self.entries[slot].1))
    }

    /// Number of distinct old values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replacement value of the `slot`-th entry.
    pub fn replacement(&self, slot: usize) -> &T {
        &self.entries[slot].1
    }
}

/// Substitute every mapped element.
pub fn replace_values<T: Element>(mut values: Vec<T>, map: &ValueMap<T>) -> Vec<T> {
    for value in values.iter_mut() {
        if let Some((_, new)) = map.lookup(value) {
            *value = new.clone();
        }
    }
    values
}

// ============================================================================
// First / Last Replacement
// ============================================================================

/// Earliest or latest index (absolute) of every mapped value within `range`.
pub fn locate_targets<T: Element>(
    values: &[T],
    map: &ValueMap<T>,
    which: Position,
    range: Range<usize>,
) -> Vec<Option<usize>> {
    let mut found = vec![None; map.len()];
    let mut pending = map.len();

    let mut visit = |i: usize| {
        if let Some((slot, _)) = map.lookup(&values[i]) {
            if found[slot].is_none() {
                found[slot] = Some(i);
                pending -= 1;
            }
        }
        pending == 0
    };

    match which {
        Position::First => {
            for i in range {
                if visit(i) {
                    break;
                }
            }
        }
        Position::Last => {
            for i in range.rev() {
                if visit(i) {
                    break;
                }
            }
        }
    }
    found
}

/// Pick the strict global earliest or latest candidate per slot.
pub fn merge_candidates(per_range: Vec<Vec<Option<usize>>>, which: Position) -> Vec<Option<usize>> {
    let mut merged: Vec<Option<usize>> = Vec::new();
    for local in per_range {
        if merged.is_empty() {
            merged = local;
            continue;
        }
        for (slot, candidate) in local.into_iter().enumerate() {
            merged[slot] = match (merged[slot], candidate) {
                (Some(a), Some(b)) => Some(match (which, a.cmp(&b)) {
                    (Position::First, Ordering::Greater) | (Position::Last, Ordering::Less) => b,
                    _ => a,
                }),
                (a, b) => a.or(b),
            };
        }
    }
    merged
}

/// Write the replacement of every slot at its resolved index.
pub fn apply_positions<T: Element>(
    mut values: Vec<T>,
    map: &ValueMap<T>,
    positions: &[Option<usize>],
) -> Vec<T> {
    for (slot, position) in positions.iter().enumerate() {
        if let Some(i) = position {
            values[*i] = map.replacement(slot).clone();
        }
    }
    values
}

/// Replace the earliest or latest instance of every mapped value.
pub fn replace_first_or_last<T: Element>(values: Vec<T>, map: &ValueMap<T>, which: Position) -> Vec<T> {
    let positions = locate_targets(&values, map, which, 0..values.len());
    apply_positions(values, map, &positions)
}

// ============================================================================
// Predicate Replacement
// ============================================================================

/// Replace the first, last or every element satisfying `predicate`.
pub fn replace_where<T: Clone>(
    mut values: Vec<T>,
    predicate: &Predicate<T>,
    replacement: &T,
    which: Selection,
) -> Vec<T> {
    match which {
        Selection::All => {
            for value in values.iter_mut() {
                if predicate(&*value) {
                    *value = replacement.clone();
                }
            }
        }
        Selection::First => {
            if let Some(i) = values.iter().position(|v| predicate(v)) {
                values[i] = replacement.clone();
            }
        }
        Selection::Last => {
            if let Some(i) = values.iter().rposition(|v| predicate(v)) {
                values[i] = replacement.clone();
            }
        }
    }
    values
}
