//! Parallel executor for change-chain resolution.
//!
//! ## Purpose
//!
//! This module provides [`ParallelExecutor`], an implementation of the core
//! crate's `Executor` trait that runs each resolved step over contiguous
//! partitions of the array on a bounded `rayon` pool.
//!
//! ## Design notes
//!
//! * **Drop-in**: The resolver, fusion planning and chain model are reused
//!   unchanged; only step execution differs.
//! * **Serial fallback**: When the array yields at most one partition, the
//!   sequential kernel runs as one guarded task.
//! * **Sequential-only steps**: Appending, clearing and custom transforms
//!   have no partitioned form and keep their sequential kernels, also guarded.
//!
//! ## Invariants
//!
//! * Every step produces exactly the sequential result for any thread count.
//! * A panicking step aborts with `WorkerFailure` whatever the partition
//!   count, including one.

// Export dependencies from changes crate
use changes::internals::algorithms::remove::{Occurrence, RemovePlan};
use changes::internals::algorithms::replace::{Position, ReplaceAtPlan, Selection, ValueMap};
use changes::internals::algorithms::transform::Transform;
use changes::internals::engine::executor::{Executor, SequentialExecutor};
use changes::internals::math::element::Element;
use changes::internals::primitives::errors::ChangeResult;
use changes::internals::primitives::functions::Predicate;
use changes::internals::primitives::partition::partition_count;
use changes::internals::primitives::search::TargetSet;

// Internal dependencies
use crate::algorithms::filter::{
    remove_indices_parallel, remove_values_parallel, remove_where_parallel,
    retain_values_parallel, retain_where_parallel,
};
use crate::algorithms::replace::{
    replace_at_parallel, replace_first_or_last_parallel, replace_values_parallel,
    replace_where_parallel,
};
use crate::algorithms::transform::transform_parallel;
use crate::engine::workers::WorkerPool;

// ============================================================================
// Parallel Executor
// ============================================================================

/// Runs resolved steps over partitions on a worker pool.
#[derive(Debug, Clone, Default)]
pub struct ParallelExecutor {
    workers: WorkerPool,
}

impl ParallelExecutor {
    /// Executor over the given pool.
    pub fn new(workers: WorkerPool) -> Self {
        Self { workers }
    }

    /// Pool used by this executor.
    pub fn workers(&self) -> &WorkerPool {
        &self.workers
    }

    #[inline]
    fn serial(&self, len: usize) -> bool {
        partition_count(len, self.workers.threads()) <= 1
    }

    /// Run a sequential kernel as a single guarded task.
    fn sequential<T, F>(&self, step: F) -> ChangeResult<Vec<T>>
    where
        T: Send,
        F: FnOnce() -> ChangeResult<Vec<T>> + Send,
    {
        self.workers.run(step)?
    }
}

impl<T: Element> Executor<T> for ParallelExecutor {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn add(&self, values: Vec<T>, extra: &[T]) -> ChangeResult<Vec<T>> {
        self.sequential(move || SequentialExecutor.add(values, extra))
    }

    fn remove(&self, values: Vec<T>, plan: &RemovePlan<T>) -> ChangeResult<Vec<T>> {
        if self.serial(values.len()) {
            return self.sequential(move || SequentialExecutor.remove(values, plan));
        }
        remove_values_parallel(&self.workers, values, plan)
    }

    fn remove_indices(&self, values: Vec<T>, indices: &[usize]) -> ChangeResult<Vec<T>> {
        if self.serial(values.len()) {
            return self.sequential(move || SequentialExecutor.remove_indices(values, indices));
        }
        remove_indices_parallel(&self.workers, values, indices)
    }

    fn remove_where(&self, values: Vec<T>, predicate: &Predicate<T>) -> ChangeResult<Vec<T>> {
        if self.serial(values.len()) {
            return self.sequential(move || SequentialExecutor.remove_where(values, predicate));
        }
        remove_where_parallel(&self.workers, values, predicate)
    }

    fn replace_at(&self, values: Vec<T>, plan: &ReplaceAtPlan<T>) -> ChangeResult<Vec<T>> {
        if self.serial(values.len()) {
            return self.sequential(move || SequentialExecutor.replace_at(values, plan));
        }
        replace_at_parallel(&self.workers, values, plan)
    }

    fn replace_values(&self, values: Vec<T>, map: &ValueMap<T>) -> ChangeResult<Vec<T>> {
        if self.serial(values.len()) {
            return self.sequential(move || SequentialExecutor.replace_values(values, map));
        }
        replace_values_parallel(&self.workers, values, map)
    }

    fn replace_first_or_last(
        &self,
        values: Vec<T>,
        map: &ValueMap<T>,
        which: Position,
    ) -> ChangeResult<Vec<T>> {
        if self.serial(values.len()) {
            return self.sequential(move || {
                SequentialExecutor.replace_first_or_last(values, map, which)
            });
        }
        replace_first_or_last_parallel(&self.workers, values, map, which)
    }

    fn replace_where(
        &self,
        values: Vec<T>,
        predicate: &Predicate<T>,
        replacement: &T,
        which: Selection,
    ) -> ChangeResult<Vec<T>> {
        if self.serial(values.len()) {
            return self.sequential(move || {
                SequentialExecutor.replace_where(values, predicate, replacement, which)
            });
        }
        replace_where_parallel(&self.workers, values, predicate, replacement, which)
    }

    fn retain_values(
        &self,
        values: Vec<T>,
        targets: &TargetSet<T>,
        mode: Occurrence,
    ) -> ChangeResult<Vec<T>> {
        if self.serial(values.len()) {
            return self.sequential(move || SequentialExecutor.retain_values(values, targets, mode));
        }
        retain_values_parallel(&self.workers, values, targets, mode)
    }

    fn retain_where(&self, values: Vec<T>, predicates: &[Predicate<T>]) -> ChangeResult<Vec<T>> {
        if self.serial(values.len()) {
            return self.sequential(move || SequentialExecutor.retain_where(values, predicates));
        }
        retain_where_parallel(&self.workers, values, predicates)
    }

    fn transform(&self, values: Vec<T>, transform: &Transform<T>) -> ChangeResult<Vec<T>> {
        if self.serial(values.len()) {
            return self.sequential(move || SequentialExecutor.transform(values, transform));
        }
        transform_parallel(&self.workers, values, transform)
    }
}
