//! Argument and configuration validation.
//!
//! ## Purpose
//!
//! This module checks the arguments of builder calls (flattened pair arity,
//! matching index/value lists) and resolver configuration (worker counts).
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first violation.
//! * **Stateless**: All checks are associated functions of [`Validator`].
//!
//! ## Invariants
//!
//! * Validation is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * Index bounds depend on the array at resolution time and are checked by
//!   the kernels, not here.

// Internal dependencies
use crate::primitives::errors::{ChangeError, ChangeResult};

/// Upper bound on requested worker counts.
pub const MAX_THREADS: usize = 4096;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for builder arguments and configuration.
pub struct Validator;

impl Validator {
    /// Flattened pair lists must have an even length.
    pub fn validate_flat_pairs(len: usize) -> ChangeResult<()> {
        if len % 2 != 0 {
            return Err(ChangeError::ArgumentArity {
                expected_multiple: 2,
                got: len,
            });
        }
        Ok(())
    }

    /// Parallel index and value lists must have the same length.
    pub fn validate_parallel_lists(indices: usize, values: usize) -> ChangeResult<()> {
        if indices != values {
            return Err(ChangeError::MismatchedLengths { indices, values });
        }
        Ok(())
    }

    /// Worker counts must be in `1..=MAX_THREADS`.
    pub fn validate_threads(threads: usize) -> ChangeResult<()> {
        if threads == 0 || threads > MAX_THREADS {
            return Err(ChangeError::InvalidThreadCount(threads));
        }
        Ok(())
    }

    /// Report a parameter that was configured twice.
    pub fn validate_no_duplicates(duplicate: Option<&'static str>) -> ChangeResult<()> {
        match duplicate {
            Some(parameter) => Err(ChangeError::DuplicateParameter { parameter }),
            None => Ok(()),
        }
    }
}
