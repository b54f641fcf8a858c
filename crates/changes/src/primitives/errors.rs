//! Error types for change-chain operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while building,
//! configuring, and resolving change chains, including argument validation,
//! arithmetic dispatch failures, and worker failures in partitioned execution.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending values (index and length, arity, type name).
//! * **Deferred**: Chains are lazy, so most errors surface at materialization.
//! * **Derived**: `Display` and `std::error::Error` are derived through `thiserror`.
//!
//! ## Key concepts
//!
//! 1. **Argument validation**: Odd-length flattened pairs, mismatched index/value lists.
//! 2. **Resolution failures**: Chains with no base array, indices outside the array.
//! 3. **Arithmetic dispatch**: Element types with no operator, overflow, division by zero.
//! 4. **Parallel execution**: Worker panics and pool construction failures.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Errors are `Clone + PartialEq` so tests can match them exactly.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or retries.

// External dependencies
use thiserror::Error;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for change-chain operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeError {
    /// The element type has neither a built-in arithmetic capability nor a
    /// registered operator table supporting the requested operation.
    #[error("Unsupported operation: {operation} is not available for type {type_name}")]
    UnsupportedOperation {
        /// Name of the requested arithmetic operation.
        operation: &'static str,
        /// Name of the element type.
        type_name: &'static str,
    },

    /// Materialization requested on a chain whose root owns no base array.
    #[error("Missing base array: detached chains can only be applied to an external array")]
    MissingBaseArray,

    /// A flattened pair list must contain an even number of values.
    #[error("Argument arity: expected a multiple of {expected_multiple} values, got {got}")]
    ArgumentArity {
        /// Required multiple.
        expected_multiple: usize,
        /// Number of values provided.
        got: usize,
    },

    /// Index and value lists passed together must have the same length.
    #[error("Mismatched lengths: {indices} indices but {values} values")]
    MismatchedLengths {
        /// Number of indices.
        indices: usize,
        /// Number of values.
        values: usize,
    },

    /// An index-addressed operation referenced a position outside the array.
    #[error("Index out of bounds: index {index} for array of length {len}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Length of the array at the time the operation was applied.
        len: usize,
    },

    /// Generic invalid input error with a descriptive message.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Arithmetic failed inside an operator table (overflow, division by zero).
    #[error("Arithmetic failure: {0}")]
    ArithmeticFailure(String),

    /// A partition task failed during parallel execution.
    #[error("Worker failure in partition {partition}: {message}")]
    WorkerFailure {
        /// Index of the failing partition.
        partition: usize,
        /// Panic payload or error description.
        message: String,
    },

    /// Requested worker count must be in `1..=4096`.
    #[error("Invalid thread count: {0} (must be between 1 and 4096)")]
    InvalidThreadCount(usize),

    /// A dedicated worker pool could not be constructed.
    #[error("Pool creation failed: {0}")]
    PoolCreation(String),

    /// The selected adapter does not support a configured feature.
    #[error("Unsupported feature: {adapter} resolvers do not support {feature}")]
    UnsupportedFeature {
        /// Name of the adapter.
        adapter: &'static str,
        /// Name of the unsupported feature.
        feature: &'static str,
    },

    /// A builder parameter was set more than once.
    #[error("Parameter '{parameter}' was set multiple times. Each parameter can only be configured once.")]
    DuplicateParameter {
        /// Name of the duplicated parameter.
        parameter: &'static str,
    },
}

/// Shorthand result type used across the crate.
pub type ChangeResult<T> = Result<T, ChangeError>;
