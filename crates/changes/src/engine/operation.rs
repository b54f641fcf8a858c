//! Operation payloads carried by chain nodes.
//!
//! ## Purpose
//!
//! This module defines [`Operation`], the closed set of deferred edits a
//! chain node can record, together with the compatibility table that decides
//! which adjacent operations may be fused into one pass.
//!
//! ## Design notes
//!
//! * **Closed enum**: Dispatch is by pattern matching; no runtime casts.
//! * **Typed closures**: Predicates and mappers are bound to the element type
//!   when the operation is recorded.
//! * **Fusability**: Value removals (all and first) fuse together, replace-at
//!   fuses with itself, predicate retention fuses with itself; everything else
//!   fuses with nothing, including itself.
//!
//! ## Invariants
//!
//! * `fuses_with` is symmetric.
//! * Operations are immutable once recorded.

// External dependencies
use core::fmt::{Debug, Formatter, Result as FmtResult};

// Internal dependencies
use crate::algorithms::remove::Occurrence;
use crate::algorithms::replace::{Position, Selection};
use crate::algorithms::transform::Transform;
use crate::primitives::functions::Predicate;

// ============================================================================
// Operation
// ============================================================================

/// A deferred edit recorded by one chain node.
#[derive(Clone)]
pub enum Operation<T> {
    /// Append values at the end.
    AddValues(Vec<T>),

    /// Remove every or only the first instance of each target.
    RemoveValues {
        /// Values to remove.
        targets: Vec<T>,
        /// Instances addressed.
        mode: Occurrence,
    },

    /// Remove elements at the given indices.
    RemoveIndices(Vec<usize>),

    /// Remove elements satisfying a predicate.
    RemoveWhere(Predicate<T>),

    /// Write values at indices; a later pair for the same index wins.
    ReplaceAtIndices(Vec<(usize, T)>),

    /// Substitute every instance of each old value.
    ReplaceValues(Vec<(T, T)>),

    /// Substitute only the earliest or latest instance of each old value.
    ReplaceFirstOrLast {
        /// `(old, new)` pairs.
        pairs: Vec<(T, T)>,
        /// Instance addressed.
        which: Position,
    },

    /// Replace matches of a predicate with a fixed value.
    ReplaceWhere {
        /// Element test.
        predicate: Predicate<T>,
        /// Replacement value.
        value: T,
        /// Matches addressed.
        which: Selection,
    },

    /// Keep every or only the first instance of each target.
    RetainValues {
        /// Values to keep.
        targets: Vec<T>,
        /// Instances addressed.
        mode: Occurrence,
    },

    /// Keep elements satisfying a predicate.
    RetainWhere(Predicate<T>),

    /// Whole-array transform.
    Transform(Transform<T>),
}

/// Fusion family of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Value removals, both modes.
    RemoveValues,
    /// Index writes.
    ReplaceAt,
    /// Predicate retention.
    RetainWhere,
    /// Never fuses.
    Solitary,
}

impl<T> Operation<T> {
    /// Short kind name used in logs and displays.
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::AddValues(_) => "add",
            Operation::RemoveValues {
                mode: Occurrence::All,
                ..
            } => "remove_all",
            Operation::RemoveValues {
                mode: Occurrence::First,
                ..
            } => "remove_first",
            Operation::RemoveIndices(_) => "remove_at",
            Operation::RemoveWhere(_) => "remove_if",
            Operation::ReplaceAtIndices(_) => "replace_at",
            Operation::ReplaceValues(_) => "replace_all",
            Operation::ReplaceFirstOrLast {
                which: Position::First,
                ..
            } => "replace_first",
            Operation::ReplaceFirstOrLast {
                which: Position::Last,
                ..
            } => "replace_last",
            Operation::ReplaceWhere { .. } => "replace_if",
            Operation::RetainValues {
                mode: Occurrence::All,
                ..
            } => "retain_all",
            Operation::RetainValues {
                mode: Occurrence::First,
                ..
            } => "retain_first",
            Operation::RetainWhere(_) => "retain_if",
            Operation::Transform(transform) => transform.name(),
        }
    }

    /// Fusion family.
    pub fn family(&self) -> Family {
        match self {
            Operation::RemoveValues { .. } => Family::RemoveValues,
            Operation::ReplaceAtIndices(_) => Family::ReplaceAt,
            Operation::RetainWhere(_) => Family::RetainWhere,
            _ => Family::Solitary,
        }
    }

    /// Whether this operation and `next` may run as one fused pass.
    #[inline]
    pub fn fuses_with(&self, next: &Operation<T>) -> bool {
        let family = self.family();
        family != Family::Solitary && family == next.family()
    }
}

impl<T: Debug> Debug for Operation<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Operation::AddValues(values) => write!(f, "add{values:?}"),
            Operation::RemoveValues { targets, .. } | Operation::RetainValues { targets, .. } => {
                write!(f, "{}{targets:?}", self.kind())
            }
            Operation::RemoveIndices(indices) => write!(f, "remove_at{indices:?}"),
            Operation::ReplaceAtIndices(pairs) => write!(f, "replace_at{pairs:?}"),
            Operation::ReplaceValues(pairs) | Operation::ReplaceFirstOrLast { pairs, .. } => {
                write!(f, "{}{pairs:?}", self.kind())
            }
            Operation::ReplaceWhere { value, which, .. } => {
                write!(f, "replace_if({which:?} -> {value:?})")
            }
            Operation::RemoveWhere(_) | Operation::RetainWhere(_) => {
                write!(f, "{}(<predicate>)", self.kind())
            }
            Operation::Transform(transform) => write!(f, "{transform:?}"),
        }
    }
}
