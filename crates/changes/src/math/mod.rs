//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the element capability bound and the type-generic
//! arithmetic used by reductions: operator tables, the fallback registry,
//! and the dispatch that picks between them.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Element capability bound.
pub mod element;

/// Operator tables.
pub mod operator;

/// Type-keyed fallback registry.
pub mod registry;

/// Reduction dispatch.
pub mod dispatch;
