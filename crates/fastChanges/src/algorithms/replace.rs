//! Partitioned replacement kernels.
//!
//! ## Purpose
//!
//! This module runs the replacement family over disjoint mutable chunks of
//! the array: index writes, value substitution, first/last substitution and
//! predicate replacement.
//!
//! ## Design notes
//!
//! * **In place**: Replacement keeps the length, so every partition writes
//!   into its own `&mut` chunk and nothing is reallocated.
//! * **Sorted writes**: Each chunk finds its slice of the index-sorted write
//!   list by two partition-point searches.
//! * **Global selection**: First/last targets are located per partition and
//!   merged by strict minimum or maximum before any write happens.
//!   The resulting writes (at most one per distinct target) run on the
//!   calling thread.
//!
//! ## Invariants
//!
//! * Every kernel returns exactly the sequential result.

// External dependencies
use core::ops::Range;

// Export dependencies from changes crate
use changes::internals::algorithms::replace::{
    apply_positions, locate_targets, merge_candidates, Position, ReplaceAtPlan, Selection,
    ValueMap,
};
use changes::internals::math::element::Element;
use changes::internals::primitives::errors::ChangeResult;
use changes::internals::primitives::functions::Predicate;

// Internal dependencies
use crate::engine::workers::WorkerPool;

// ============================================================================
// Index Writes
// ============================================================================

/// Apply a (possibly fused) replace-at plan across chunks.
pub fn replace_at_parallel<T: Element>(
    workers: &WorkerPool,
    mut values: Vec<T>,
    plan: &ReplaceAtPlan<T>,
) -> ChangeResult<Vec<T>> {
    plan.check_bounds(values.len())?;
    let writes = plan.writes();
    if writes.is_empty() {
        return Ok(values);
    }

    workers.for_chunks_mut(&mut values, |offset, chunk| {
        let start = writes.partition_point(|(i, _)| *i < offset);
        let end = writes.partition_point(|(i, _)| *i < offset + chunk.len());
        for (index, value) in &writes[start..end] {
            chunk[index - offset] = value.clone();
        }
    })?;
    Ok(values)
}

// ============================================================================
// Value Substitution
// ============================================================================

/// Substitute every mapped element across chunks.
pub fn replace_values_parallel<T: Element>(
    workers: &WorkerPool,
    mut values: Vec<T>,
    map: &ValueMap<T>,
) -> ChangeResult<Vec<T>> {
    workers.for_chunks_mut(&mut values, |_, chunk| {
        for value in chunk.iter_mut() {
            if let Some((_, new)) = map.lookup(value) {
                *value = new.clone();
            }
        }
    })?;
    Ok(values)
}

/// Replace the globally earliest or latest instance of every mapped value.
pub fn replace_first_or_last_parallel<T: Element>(
    workers: &WorkerPool,
    values: Vec<T>,
    map: &ValueMap<T>,
    which: Position,
) -> ChangeResult<Vec<T>> {
    let per_range =
        workers.map_partitions(values.len(), |_, range| locate_targets(&values, map, which, range))?;
    let positions = merge_candidates(per_range, which);

    // At most one write per distinct old value.
    Ok(apply_positions(values, map, &positions))
}

// ============================================================================
// Predicate Replacement
// ============================================================================

/// Replace the first, last or every element satisfying `predicate`.
pub fn replace_where_parallel<T: Element>(
    workers: &WorkerPool,
    mut values: Vec<T>,
    predicate: &Predicate<T>,
    replacement: &T,
    which: Selection,
) -> ChangeResult<Vec<T>> {
    let target = match which {
        Selection::All => {
            workers.for_chunks_mut(&mut values, |_, chunk| {
                for value in chunk.iter_mut() {
                    if predicate(&*value) {
                        *value = replacement.clone();
                    }
                }
            })?;
            return Ok(values);
        }
        Selection::First => {
            let hits = workers.map_partitions(values.len(), |_, range| {
                first_match(&values, predicate, range)
            })?;
            hits.into_iter().flatten().next()
        }
        Selection::Last => {
            let hits = workers.map_partitions(values.len(), |_, range| {
                last_match(&values, predicate, range)
            })?;
            hits.into_iter().flatten().last()
        }
    };

    if let Some(i) = target {
        values[i] = replacement.clone();
    }
    Ok(values)
}

fn first_match<T>(values: &[T], predicate: &Predicate<T>, range: Range<usize>) -> Option<usize> {
    let offset = range.start;
    values[range].iter().position(|v| predicate(v)).map(|i| offset + i)
}

fn last_match<T>(values: &[T], predicate: &Predicate<T>, range: Range<usize>) -> Option<usize> {
    let offset = range.start;
    values[range].iter().rposition(|v| predicate(v)).map(|i| offset + i)
}
