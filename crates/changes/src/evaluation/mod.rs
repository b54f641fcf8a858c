//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer provides read-only evaluation of materialized arrays: queries
//! (find, get, count) and numeric reductions.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Find, get and count queries.
pub mod information;

/// Sum, difference, product and quotient.
pub mod reduction;
