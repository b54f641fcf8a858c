//! Layer 3: Algorithms
//!
//! This layer provides the partitioned counterparts of the core kernels.
//! Each kernel produces exactly the sequential result; operations whose
//! semantics depend on a global position locate candidates per partition
//! and merge them before writing.

// Removal and retention
pub mod filter;

// Index, value and predicate replacement
pub mod replace;

// Sort, dedup and map
pub mod transform;
