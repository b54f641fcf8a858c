//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides one sequential kernel per operation family, plus the
//! fused plan types that let a run of compatible operations execute as a
//! single pass.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Appending values.
pub mod add;

/// Removal by value, index or predicate.
pub mod remove;

/// Replacement by index, value or predicate.
pub mod replace;

/// Retention by value or predicate.
pub mod retain;

/// Sort, dedup, map, clear and custom transforms.
pub mod transform;
