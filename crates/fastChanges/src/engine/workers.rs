//! Partitioned fork-join on a bounded worker pool.
//!
//! ## Purpose
//!
//! This module fans work out over the contiguous partitions of an array and
//! joins the per-partition results in partition order. It is the only place
//! in the crate that touches the thread pool.
//!
//! ## Design notes
//!
//! * **Bounded pool**: Tasks run on the global `rayon` pool, or on a dedicated
//!   pool shared by every call of one resolver; no threads are spawned per call.
//! * **Guarded tasks**: Each partition task runs under `catch_unwind`; a panic
//!   (including one raised by a user closure) becomes a `WorkerFailure`.
//! * **Short-circuit**: Results are collected into `Result<Vec<_>, _>`, so the
//!   first failure reported stops the remaining work and is returned.
//! * **Disjoint writes**: In-place kernels receive disjoint `&mut` chunks.
//!
//! ## Key concepts
//!
//! * **Partition plan**: `P = min(threads, len)` ranges, the last absorbing
//!   the remainder.
//! * **Owned split**: Filter kernels take ownership of their partition's
//!   elements, so surviving elements are moved rather than cloned.
//!
//! ## Invariants
//!
//! * Outputs are returned in ascending partition order.
//! * No partial result is returned when any partition fails.
//!
//! ## Non-goals
//!
//! * This module does not know about operations; kernels supply closures.

// External dependencies
use core::ops::Range;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

// Export dependencies from changes crate
use changes::internals::engine::validator::Validator;
use changes::internals::primitives::errors::{ChangeError, ChangeResult};
use changes::internals::primitives::partition::partition;

// ============================================================================
// Worker Pool
// ============================================================================

/// Pool handle plus the requested partition count.
#[derive(Clone)]
pub struct WorkerPool {
    pool: Option<Arc<ThreadPool>>,
    threads: usize,
}

impl core::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("dedicated", &self.pool.is_some())
            .field("threads", &self.threads)
            .finish()
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self {
            pool: None,
            threads: rayon::current_num_threads(),
        }
    }
}

impl WorkerPool {
    /// Global pool split into `threads` partitions.
    pub fn global(threads: usize) -> ChangeResult<Self> {
        Validator::validate_threads(threads)?;
        Ok(Self {
            pool: None,
            threads,
        })
    }

    /// Dedicated pool of `size` workers split into `threads` partitions.
    pub fn dedicated(size: usize, threads: usize) -> ChangeResult<Self> {
        Validator::validate_threads(size)?;
        Validator::validate_threads(threads)?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(size)
            .thread_name(|i| format!("changes-worker-{i}"))
            .build()
            .map_err(|e| ChangeError::PoolCreation(e.to_string()))?;

        Ok(Self {
            pool: Some(Arc::new(pool)),
            threads,
        })
    }

    /// Requested partition count.
    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Index ranges for an array of `len` elements.
    pub fn plan(&self, len: usize) -> Vec<Range<usize>> {
        let ranges = partition(len, self.threads);
        debug!(len, partitions = ranges.len(), "partition plan");
        ranges
    }

    /// Run `op` inside this pool.
    pub fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    // ========================================================================
    // Fan-out helpers
    // ========================================================================

    /// Run `task` once per partition of `0..len`, read-only.
    pub fn map_partitions<R, F>(&self, len: usize, task: F) -> ChangeResult<Vec<R>>
    where
        R: Send,
        F: Fn(usize, Range<usize>) -> R + Send + Sync,
    {
        let ranges = self.plan(len);
        self.install(|| {
            ranges
                .into_par_iter()
                .enumerate()
                .map(|(i, range)| guarded(i, || task(i, range)))
                .collect()
        })
    }

    /// Move each partition's elements into `task` and concatenate the outputs.
    pub fn filter_owned<T, F>(&self, values: Vec<T>, task: F) -> ChangeResult<Vec<T>>
    where
        T: Send,
        F: Fn(usize, Vec<T>) -> Vec<T> + Send + Sync,
    {
        let ranges = self.plan(values.len());
        let parts = split_owned(values, &ranges);

        let outputs: Vec<Vec<T>> = self.install(|| {
            parts
                .into_par_iter()
                .zip(ranges.into_par_iter())
                .enumerate()
                .map(|(i, (part, range))| guarded(i, || task(range.start, part)))
                .collect::<ChangeResult<Vec<Vec<T>>>>()
        })?;

        Ok(outputs.into_iter().flatten().collect())
    }

    /// Run `task` over disjoint mutable chunks; `task` receives the chunk's
    /// absolute offset.
    pub fn for_chunks_mut<T, F>(&self, values: &mut [T], task: F) -> ChangeResult<()>
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        let ranges = self.plan(values.len());
        let chunks = split_mut(values, &ranges);

        self.install(|| {
            chunks
                .into_par_iter()
                .enumerate()
                .map(|(i, (offset, chunk))| guarded(i, || task(offset, chunk)))
                .collect::<ChangeResult<Vec<()>>>()
        })?;
        Ok(())
    }

    /// Run a whole-array task (for example a parallel sort) inside the pool.
    pub fn run<R, F>(&self, task: F) -> ChangeResult<R>
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        guarded(0, || self.install(task))
    }
}

// ============================================================================
// Splitting
// ============================================================================

/// Split an owned vector along `ranges` (which must tile it in order).
fn split_owned<T>(mut values: Vec<T>, ranges: &[Range<usize>]) -> Vec<Vec<T>> {
    let mut parts: Vec<Vec<T>> = Vec::with_capacity(ranges.len());
    for range in ranges.iter().rev() {
        parts.push(values.split_off(range.start));
    }
    parts.reverse();
    parts
}

/// Split a slice into disjoint mutable chunks along `ranges`.
fn split_mut<'a, T>(mut values: &'a mut [T], ranges: &[Range<usize>]) -> Vec<(usize, &'a mut [T])> {
    let mut chunks = Vec::with_capacity(ranges.len());
    for range in ranges {
        let (head, tail) = core::mem::take(&mut values).split_at_mut(range.len());
        chunks.push((range.start, head));
        values = tail;
    }
    chunks
}

// ============================================================================
// Failure Capture
// ============================================================================

/// Run one partition task, turning a panic into a `WorkerFailure`.
fn guarded<R, F>(partition: usize, task: F) -> ChangeResult<R>
where
    F: FnOnce() -> R,
{
    catch_unwind(AssertUnwindSafe(task)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        warn!(partition, %message, "partition task failed");
        ChangeError::WorkerFailure { partition, message }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
