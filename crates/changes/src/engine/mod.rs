//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer holds the change-chain model and its resolution: immutable
//! nodes, operation payloads, fusion planning, the executor seam, the
//! resolver and argument validation.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Operation payloads and fusability.
pub mod operation;

/// Immutable chain nodes.
pub mod node;

/// Run grouping and fused steps.
pub mod fusion;

/// Executor trait and sequential executor.
pub mod executor;

/// Chain resolution.
pub mod resolver;

/// Argument and configuration validation.
pub mod validator;
