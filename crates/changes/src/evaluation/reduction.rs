//! Numeric reductions: sum, difference, product and quotient.
//!
//! Each reduction is a left fold from the first element. The plain forms
//! resolve an operator table for the element type (built-in capability, then
//! the global registry); the `_with` forms use only the supplied table. An
//! empty array reduces to `None`.

// Internal dependencies
use crate::math::dispatch::{fold, fold_with};
use crate::math::element::Element;
use crate::math::operator::{Arithmetic, Operator};
use crate::primitives::errors::ChangeResult;

/// `a0 + a1 + ...`
pub fn sum<T: Element>(values: &[T]) -> ChangeResult<Option<T>> {
    fold(values, Arithmetic::Add)
}

/// `a0 - a1 - ...`
pub fn difference<T: Element>(values: &[T]) -> ChangeResult<Option<T>> {
    fold(values, Arithmetic::Subtract)
}

/// `a0 * a1 * ...`
pub fn product<T: Element>(values: &[T]) -> ChangeResult<Option<T>> {
    fold(values, Arithmetic::Multiply)
}

/// `a0 / a1 / ...`
pub fn quotient<T: Element>(values: &[T]) -> ChangeResult<Option<T>> {
    fold(values, Arithmetic::Divide)
}

/// Reduce through an explicit table.
pub fn reduce_with<T: Clone>(
    values: &[T],
    operator: &dyn Operator<T>,
    operation: Arithmetic,
) -> ChangeResult<Option<T>> {
    fold_with(values, operator, operation)
}
