//! Partitioned removal and retention kernels.
//!
//! ## Purpose
//!
//! This module runs the filter families (value, index and predicate removal
//! plus value and predicate retention) over partitions of the array.
//!
//! ## Design notes
//!
//! * **Two phases for "first"**: Each partition locates its leading
//!   candidates, the candidates merge in partition order under the plan's
//!   quotas, and only then is any element dropped.
//! * **Owned filtering**: Survivors are moved, never cloned.
//!
//! ## Invariants
//!
//! * Every kernel returns exactly the sequential result.

// Export dependencies from changes crate
use changes::internals::algorithms::remove::{checked_indices, index_listed, Occurrence, RemovePlan};
use changes::internals::algorithms::replace::{merge_candidates, Position};
use changes::internals::algorithms::retain::{locate_first_targets, satisfies_all};
use changes::internals::math::element::{element_cmp, Element};
use changes::internals::primitives::errors::ChangeResult;
use changes::internals::primitives::functions::Predicate;
use changes::internals::primitives::search::TargetSet;

// Internal dependencies
use crate::engine::workers::WorkerPool;

// ============================================================================
// Removal
// ============================================================================

/// Apply a (possibly fused) removal plan across partitions.
pub fn remove_values_parallel<T: Element>(
    workers: &WorkerPool,
    values: Vec<T>,
    plan: &RemovePlan<T>,
) -> ChangeResult<Vec<T>> {
    let drops = if plan.first_targets().is_empty() {
        Vec::new()
    } else {
        let per_range =
            workers.map_partitions(values.len(), |_, range| plan.locate_first(&values, range))?;
        plan.resolve_first(per_range)
    };

    workers.filter_owned(values, |offset, part| {
        part.into_iter()
            .enumerate()
            .filter(|(i, v)| !plan.removes_all(v) && !index_listed(&drops, offset + i))
            .map(|(_, v)| v)
            .collect()
    })
}

/// Drop every listed index across partitions.
pub fn remove_indices_parallel<T: Element>(
    workers: &WorkerPool,
    values: Vec<T>,
    indices: &[usize],
) -> ChangeResult<Vec<T>> {
    let drops = checked_indices(indices, values.len())?;
    if drops.is_empty() {
        return Ok(values);
    }

    workers.filter_owned(values, |offset, part| {
        part.into_iter()
            .enumerate()
            .filter(|(i, _)| !index_listed(&drops, offset + i))
            .map(|(_, v)| v)
            .collect()
    })
}

/// Drop elements satisfying `predicate` across partitions.
pub fn remove_where_parallel<T: Element>(
    workers: &WorkerPool,
    values: Vec<T>,
    predicate: &Predicate<T>,
) -> ChangeResult<Vec<T>> {
    workers.filter_owned(values, |_, mut part| {
        part.retain(|v| !predicate(v));
        part
    })
}

// ============================================================================
// Retention
// ============================================================================

/// Keep target values (every instance, or the first of each) across partitions.
pub fn retain_values_parallel<T: Element>(
    workers: &WorkerPool,
    values: Vec<T>,
    targets: &TargetSet<T>,
    mode: Occurrence,
) -> ChangeResult<Vec<T>> {
    match mode {
        Occurrence::All => workers.filter_owned(values, |_, mut part| {
            part.retain(|v| targets.contains(v, element_cmp::<T>));
            part
        }),
        Occurrence::First => {
            let per_range = workers
                .map_partitions(values.len(), |_, range| {
                    locate_first_targets(&values, targets, range)
                })?;

            let mut keep: Vec<usize> = merge_candidates(per_range, Position::First)
                .into_iter()
                .flatten()
                .collect();
            keep.sort_unstable();

            workers.filter_owned(values, |offset, part| {
                part.into_iter()
                    .enumerate()
                    .filter(|(i, _)| index_listed(&keep, offset + i))
                    .map(|(_, v)| v)
                    .collect()
            })
        }
    }
}

/// Keep elements satisfying every predicate across partitions.
pub fn retain_where_parallel<T: Element>(
    workers: &WorkerPool,
    values: Vec<T>,
    predicates: &[Predicate<T>],
) -> ChangeResult<Vec<T>> {
    workers.filter_owned(values, |_, mut part| {
        part.retain(|v| satisfies_all(v, predicates));
        part
    })
}
