//! Capability-or-table dispatch for numeric reductions.
//!
//! ## Purpose
//!
//! This module resolves which operator table serves an arithmetic request
//! for an element type, and folds an array through that table.
//!
//! ## Design notes
//!
//! * **Lookup order**: The element's built-in capability first, then the
//!   global registry, then `UnsupportedOperation`.
//! * **Per operation**: A table is only chosen if it supports the requested
//!   operation, so a built-in table lacking division still lets a registered
//!   table provide it.
//! * **Left fold**: `((a0 op a1) op a2) ...`; an empty array yields `None`.
//!
//! ## Invariants
//!
//! * A fold over one element returns that element unchanged.
//!
//! ## Non-goals
//!
//! * This module does not materialize chains; callers pass concrete arrays.

// External dependencies
use std::sync::Arc;

// Internal dependencies
use crate::math::element::Element;
use crate::math::operator::{unsupported, Arithmetic, Operator};
use crate::math::registry::global_registry;
use crate::primitives::errors::ChangeResult;

// ============================================================================
// Resolution
// ============================================================================

/// Find the operator table serving `operation` for `T`.
pub fn resolve_operator<T: Element>(operation: Arithmetic) -> ChangeResult<Arc<dyn Operator<T>>> {
    if let Some(native) = T::native_operator() {
        if native.supports(operation) {
            return Ok(native);
        }
    }

    match global_registry().get::<T>() {
        Some(table) if table.supports(operation) => Ok(table),
        _ => Err(unsupported::<T>(operation)),
    }
}

// ============================================================================
// Folding
// ============================================================================

/// Left fold of `values` through `operator`.
pub fn fold_with<T: Clone>(
    values: &[T],
    operator: &dyn Operator<T>,
    operation: Arithmetic,
) -> ChangeResult<Option<T>> {
    let Some((first, rest)) = values.split_first() else {
        return Ok(None);
    };

    let mut acc = first.clone();
    for value in rest {
        acc = operator.apply(operation, &acc, value)?;
    }
    Ok(Some(acc))
}

/// Left fold of `values` through the table resolved for `T`.
pub fn fold<T: Element>(values: &[T], operation: Arithmetic) -> ChangeResult<Option<T>> {
    let operator = resolve_operator::<T>(operation)?;
    fold_with(values, operator.as_ref(), operation)
}
