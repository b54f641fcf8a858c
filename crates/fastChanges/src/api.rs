//! High-level API for change chains with parallel execution support.
//!
//! ## Purpose
//!
//! This module extends the `changes` API with a parallel resolver builder and
//! with convenience methods on `Change` that resolve chains on a worker pool.
//!
//! ## Design notes
//!
//! * **Fluent Integration**: Re-uses the base `ResolverBuilder`; the
//!   [`Parallel`] marker converts it into a [`ParallelResolverBuilder`].
//! * **Parallel-First**: The parallel builder defaults to partitioned
//!   execution on the global pool with one partition per worker.
//! * **Bounded**: A dedicated pool is built once per resolver, never per call.
//!
//! ### Configuration Flow
//!
//! 1. Create a `ResolverBuilder` via `ResolverBuilder::new()`.
//! 2. Select the adapter via `.adapter(Parallel)`.
//! 3. Chain configuration methods (`.threads()`, `.pool_size()`, `.fusion()`).
//! 4. Call `.build()` and pass the resolver to `materialize_with`.

// External dependencies
use std::sync::Arc;
use tracing::debug;

// Export dependencies from changes crate
use changes::internals::engine::resolver::Resolver;
use changes::internals::engine::validator::Validator;
use changes::internals::math::element::Element;

// Internal dependencies
use crate::engine::executor::ParallelExecutor;
use crate::engine::workers::WorkerPool;
use crate::input::ChangeInput;

// Publicly re-exported types
pub use changes::internals::api::{Change, ResolverAdapter, ResolverBuilder, Sequential};
pub use changes::internals::primitives::errors::{ChangeError, ChangeResult};

// ============================================================================
// Adapter Marker
// ============================================================================

/// Marker for partitioned resolution on a worker pool.
#[derive(Debug, Clone, Copy)]
pub struct Parallel;

impl<T: Element> ResolverAdapter<T> for Parallel {
    type Output = ParallelResolverBuilder<T>;

    fn convert(builder: ResolverBuilder<T>) -> Self::Output {
        ParallelResolverBuilder {
            base: builder,
            parallel: None,
            threads: None,
            pool_size: None,
            duplicate_param: None,
        }
    }
}

// ============================================================================
// Parallel Resolver Builder
// ============================================================================

/// Builder for a resolver with partitioned execution.
pub struct ParallelResolverBuilder<T: Element> {
    /// Base builder from the changes crate.
    pub base: ResolverBuilder<T>,

    /// Whether steps run partitioned (default: true).
    pub parallel: Option<bool>,

    /// Number of partitions per step (default: pool width).
    pub threads: Option<usize>,

    /// Size of a dedicated pool (default: use the global pool).
    pub pool_size: Option<usize>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Element> Default for ParallelResolverBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> ParallelResolverBuilder<T> {
    /// Create a new parallel builder with default settings.
    pub fn new() -> Self {
        ResolverBuilder::new().adapter(Parallel)
    }

    /// Enable or disable partitioned execution.
    pub fn parallel(mut self, enabled: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(enabled);
        self
    }

    /// Set the number of partitions per step.
    pub fn threads(mut self, threads: usize) -> Self {
        if self.threads.is_some() {
            self.duplicate_param = Some("threads");
        }
        self.threads = Some(threads);
        self
    }

    /// Run on a dedicated pool of `size` workers instead of the global pool.
    pub fn pool_size(mut self, size: usize) -> Self {
        if self.pool_size.is_some() {
            self.duplicate_param = Some("pool_size");
        }
        self.pool_size = Some(size);
        self
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Enable or disable fusion of adjacent compatible operations.
    pub fn fusion(mut self, enabled: bool) -> Self {
        self.base = self.base.fusion(enabled);
        self
    }

    /// Validate the configuration and build the resolver.
    ///
    /// With partitioned execution enabled, an executor set on the base
    /// builder is rejected with `UnsupportedFeature`.
    pub fn build(self) -> ChangeResult<Resolver<T>> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        if let Some(threads) = self.threads {
            Validator::validate_threads(threads)?;
        }

        if !self.parallel.unwrap_or(true) {
            return self.base.build();
        }
        if self.base.executor.is_some() {
            return Err(ChangeError::UnsupportedFeature {
                adapter: "Parallel",
                feature: "a custom executor",
            });
        }

        let threads = match (self.threads, self.pool_size) {
            (Some(threads), _) => threads,
            (None, Some(size)) => size,
            (None, None) => rayon::current_num_threads(),
        };
        let workers = match self.pool_size {
            Some(size) => WorkerPool::dedicated(size, threads)?,
            None => WorkerPool::global(threads)?,
        };
        debug!(?workers, "building parallel resolver");

        self.base
            .executor(Arc::new(ParallelExecutor::new(workers)))
            .build()
    }
}

// ============================================================================
// Change Extension
// ============================================================================

/// Parallel resolution shortcuts for [`Change`].
pub trait ParallelChangeExt<T: Element> {
    /// Resolve on the global pool with one partition per worker.
    fn materialize_parallel(&self) -> ChangeResult<Vec<T>>;

    /// Resolve on the global pool with `threads` partitions per step.
    fn materialize_with_threads(&self, threads: usize) -> ChangeResult<Vec<T>>;

    /// Resolve the chain's operations against any supported input, in parallel.
    fn apply_to_input<I>(&self, input: &I) -> ChangeResult<Vec<T>>
    where
        I: ChangeInput<T> + ?Sized;
}

impl<T: Element> ParallelChangeExt<T> for Change<T> {
    fn materialize_parallel(&self) -> ChangeResult<Vec<T>> {
        let resolver = ParallelResolverBuilder::new().build()?;
        self.materialize_with(&resolver)
    }

    fn materialize_with_threads(&self, threads: usize) -> ChangeResult<Vec<T>> {
        let resolver = ParallelResolverBuilder::new().threads(threads).build()?;
        self.materialize_with(&resolver)
    }

    fn apply_to_input<I>(&self, input: &I) -> ChangeResult<Vec<T>>
    where
        I: ChangeInput<T> + ?Sized,
    {
        let values = input.as_change_slice()?.to_vec();
        let resolver = ParallelResolverBuilder::new().build()?;
        self.apply_to_with(&resolver, values)
    }
}
