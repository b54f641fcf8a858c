//! Input abstractions for change chains.
//!
//! ## Purpose
//!
//! This module lets chains start from, or be applied to, several container
//! types (slices, vectors, one-dimensional `ndarray` arrays) through a
//! single trait.
//!
//! ## Design notes
//!
//! * **Borrowed view**: Inputs expose a contiguous slice; the chain copies it
//!   once when it needs ownership.
//! * **Fail-fast**: Non-contiguous `ndarray` views are rejected instead of
//!   being gathered silently.
//!
//! ## Invariants
//!
//! * Returned slices cover every element of the input, in order.

// External dependencies
use ndarray::{ArrayBase, Data, Ix1};

// Export dependencies from changes crate
use changes::internals::api::Change;
use changes::internals::math::element::Element;
use changes::internals::primitives::errors::{ChangeError, ChangeResult};

/// Containers usable as the base array of a chain.
pub trait ChangeInput<T: Element> {
    /// Contiguous view of the elements.
    fn as_change_slice(&self) -> ChangeResult<&[T]>;
}

impl<T: Element> ChangeInput<T> for [T] {
    fn as_change_slice(&self) -> ChangeResult<&[T]> {
        Ok(self)
    }
}

impl<T: Element> ChangeInput<T> for Vec<T> {
    fn as_change_slice(&self) -> ChangeResult<&[T]> {
        Ok(self.as_slice())
    }
}

impl<T: Element, S> ChangeInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn as_change_slice(&self) -> ChangeResult<&[T]> {
        self.as_slice().ok_or_else(|| {
            ChangeError::InvalidInput("ndarray input must be contiguous in memory".to_string())
        })
    }
}

/// Generation-0 chain over a copy of `input`.
pub fn from_input<T, I>(input: &I) -> ChangeResult<Change<T>>
where
    T: Element,
    I: ChangeInput<T> + ?Sized,
{
    Ok(Change::from_slice(input.as_change_slice()?))
}
