//! Layer 5: Engine
//!
//! This layer provides the parallel execution engine for change chains.
//! It partitions arrays over a bounded worker pool and plugs the partitioned
//! kernels into the core resolver through the `Executor` trait.

// Bounded worker pool and partitioned fork-join
pub mod workers;

// Parallel executor using CPU threads
pub mod executor;
