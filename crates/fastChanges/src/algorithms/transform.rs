//! Partitioned whole-array transforms.
//!
//! ## Purpose
//!
//! This module runs sort, dedup and map on the worker pool. Clear and custom
//! transforms have no partitioned form and run sequentially.
//!
//! ## Design notes
//!
//! * **Sort**: `rayon`'s stable parallel merge sort.
//! * **Dedup**: Wrap with original indices, parallel stable sort by value,
//!   keep each position whose global predecessor differs, restore index order.
//!   Partition boundaries compare against the previous partition's last
//!   element, so a run of equal values split across partitions keeps only
//!   its first member.
//! * **Map**: Elementwise over disjoint mutable chunks.
//!
//! ## Invariants
//!
//! * Every kernel returns exactly the sequential result.

// External dependencies
use core::cmp::Ordering;
use rayon::prelude::*;

// Export dependencies from changes crate
use changes::internals::algorithms::transform::{apply, Transform};
use changes::internals::math::element::{element_cmp, Element};
use changes::internals::primitives::distinct::{wrap, Indexed};
use changes::internals::primitives::errors::ChangeResult;
use changes::internals::primitives::functions::{Comparator, Mapper};

// Internal dependencies
use crate::engine::workers::WorkerPool;

// ============================================================================
// Sort
// ============================================================================

/// Stable parallel sort by `cmp`, or by the element ordering when absent.
pub fn sort_parallel<T: Element>(
    workers: &WorkerPool,
    mut values: Vec<T>,
    cmp: Option<&Comparator<T>>,
) -> ChangeResult<Vec<T>> {
    workers.run(move || {
        match cmp {
            Some(cmp) => values.par_sort_by(|a, b| cmp(a, b)),
            None => values.par_sort_by(element_cmp::<T>),
        }
        values
    })
}

// ============================================================================
// Dedup
// ============================================================================

/// First occurrence of every equality class, in original order.
pub fn dedup_parallel<T: Element>(
    workers: &WorkerPool,
    values: Vec<T>,
    cmp: Option<&Comparator<T>>,
) -> ChangeResult<Vec<T>> {
    match cmp {
        Some(cmp) => distinct_parallel(workers, values, |a, b| cmp(a, b)),
        None => distinct_parallel(workers, values, element_cmp::<T>),
    }
}

fn distinct_parallel<T, F>(workers: &WorkerPool, values: Vec<T>, cmp: F) -> ChangeResult<Vec<T>>
where
    T: Element,
    F: Fn(&T, &T) -> Ordering + Send + Sync,
{
    if values.len() < 2 {
        return Ok(values);
    }

    let mut wrapped = wrap(&values);
    drop(values);

    let cmp = &cmp;
    wrapped = workers.run(move || {
        wrapped.par_sort_by(|a, b| cmp(&a.value, &b.value).then(a.index.cmp(&b.index)));
        wrapped
    })?;

    let keep: Vec<bool> = workers
        .map_partitions(wrapped.len(), |_, range| {
            range
                .map(|i| i == 0 || cmp(&wrapped[i - 1].value, &wrapped[i].value) != Ordering::Equal)
                .collect::<Vec<bool>>()
        })?
        .concat();

    let mut kept: Vec<Indexed<T>> = workers.filter_owned(wrapped, |offset, part| {
        part.into_iter()
            .enumerate()
            .filter(|(i, _)| keep[offset + i])
            .map(|(_, w)| w)
            .collect()
    })?;

    kept = workers.run(move || {
        kept.par_sort_unstable_by_key(|w| w.index);
        kept
    })?;

    Ok(kept.into_iter().map(|w| w.value).collect())
}

// ============================================================================
// Map
// ============================================================================

/// Apply `mapper` to every element across chunks.
pub fn map_parallel<T: Element>(
    workers: &WorkerPool,
    mut values: Vec<T>,
    mapper: &Mapper<T>,
) -> ChangeResult<Vec<T>> {
    workers.for_chunks_mut(&mut values, |_, chunk| {
        for value in chunk.iter_mut() {
            *value = mapper(&*value);
        }
    })?;
    Ok(values)
}

// ============================================================================
// Dispatch
// ============================================================================

/// Apply any transform, partitioned where a partitioned form exists.
pub fn transform_parallel<T: Element>(
    workers: &WorkerPool,
    values: Vec<T>,
    transform: &Transform<T>,
) -> ChangeResult<Vec<T>> {
    match transform {
        Transform::Sort(cmp) => sort_parallel(workers, values, cmp.as_ref()),
        Transform::Dedup(cmp) => dedup_parallel(workers, values, cmp.as_ref()),
        Transform::Map(mapper) => map_parallel(workers, values, mapper),
        Transform::Clear | Transform::Custom(_) => workers.run(move || apply(values, transform)),
    }
}
