//! Whole-array transforms: sort, dedup, map, clear and custom functions.
//!
//! ## Purpose
//!
//! This module defines the [`Transform`] payload and its sequential kernels.
//! Transforms observe the whole array produced by the previous step, so they
//! never fuse with anything.
//!
//! ## Design notes
//!
//! * **Sort**: Stable, by the supplied comparator or the element ordering.
//! * **Dedup**: Wrap-sort-filter-unwrap, keeping first occurrences in order.
//! * **Map**: Elementwise, same length and order.
//!
//! ## Invariants
//!
//! * `dedup(dedup(a)) == dedup(a)`.

// External dependencies
use core::fmt::{Debug, Formatter, Result as FmtResult};

// Internal dependencies
use crate::math::element::{element_cmp, Element};
use crate::primitives::distinct::retain_distinct_by;
use crate::primitives::functions::{ArrayFn, Comparator, Mapper};

// ============================================================================
// Transform Payload
// ============================================================================

/// Pure array-to-array transformation.
#[derive(Clone)]
pub enum Transform<T> {
    /// Stable sort, by comparator or element ordering.
    Sort(Option<Comparator<T>>),
    /// One representative per equality class, first occurrences in order.
    Dedup(Option<Comparator<T>>),
    /// Empty the array.
    Clear,
    /// Elementwise function.
    Map(Mapper<T>),
    /// Caller-supplied whole-array function.
    Custom(ArrayFn<T>),
}

impl<T> Transform<T> {
    /// Short name used in logs and displays.
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Sort(_) => "sort",
            Transform::Dedup(_) => "dedup",
            Transform::Clear => "clear",
            Transform::Map(_) => "map",
            Transform::Custom(_) => "custom",
        }
    }
}

impl<T> Debug for Transform<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Transform::Sort(cmp) | Transform::Dedup(cmp) => {
                let ordering = if cmp.is_some() { "custom" } else { "natural" };
                write!(f, "{}({ordering})", self.name())
            }
            _ => f.write_str(self.name()),
        }
    }
}

// ============================================================================
// Sequential Kernels
// ============================================================================

/// Stable sort by `cmp`, or by the element ordering when absent.
pub fn sort<T: Element>(mut values: Vec<T>, cmp: Option<&Comparator<T>>) -> Vec<T> {
    match cmp {
        Some(cmp) => values.sort_by(|a, b| cmp(a, b)),
        None => values.sort_by(element_cmp::<T>),
    }
    values
}

/// First occurrence of every equality class, in original order.
pub fn dedup<T: Element>(values: Vec<T>, cmp: Option<&Comparator<T>>) -> Vec<T> {
    match cmp {
        Some(cmp) => retain_distinct_by(&values, |a, b| cmp(a, b)),
        None => retain_distinct_by(&values, element_cmp::<T>),
    }
}

/// Apply `mapper` to every element.
pub fn map<T>(values: Vec<T>, mapper: &Mapper<T>) -> Vec<T> {
    values.iter().map(|v| mapper(v)).collect()
}

/// Apply any transform sequentially.
pub fn apply<T: Element>(values: Vec<T>, transform: &Transform<T>) -> Vec<T> {
    match transform {
        Transform::Sort(cmp) => sort(values, cmp.as_ref()),
        Transform::Dedup(cmp) => dedup(values, cmp.as_ref()),
        Transform::Clear => Vec::new(),
        Transform::Map(mapper) => map(values, mapper),
        Transform::Custom(f) => f(values),
    }
}
