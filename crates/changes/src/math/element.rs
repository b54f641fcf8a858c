//! Element capability bound for change chains.
//!
//! ## Purpose
//!
//! This module defines [`Element`], the bound every array element type must
//! satisfy: cheap sharing across threads, a total ordering used by the
//! search- and sort-based algorithms, and an optional built-in arithmetic
//! capability consulted first by numeric reductions.
//!
//! ## Design notes
//!
//! * **Total order**: Floats use IEEE 754 `total_cmp`, so NaN has a stable place.
//! * **Capability**: `native_operator` replaces runtime capability checks; types
//!   without one fall back to the operator registry.
//!
//! ## Invariants
//!
//! * `compare` is a total order consistent with equality used everywhere
//!   (`a == b` for the engine means `compare(a, b) == Equal`).
//!
//! ## Non-goals
//!
//! * This module does not perform arithmetic; see [`crate::math::operator`].

// External dependencies
use core::cmp::Ordering;
use core::fmt::Debug;
use std::sync::Arc;

// Internal dependencies
use crate::math::operator::{FloatOperator, IntegerOperator, Operator, StringOperator};

// ============================================================================
// Element Trait
// ============================================================================

/// Types that can be stored in a change chain.
pub trait Element: Clone + Debug + Send + Sync + 'static {
    /// Total ordering used for searching, sorting and equality.
    fn compare(&self, other: &Self) -> Ordering;

    /// Equality under [`Element::compare`].
    #[inline]
    fn same(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Built-in arithmetic capability of the type, if any.
    fn native_operator() -> Option<Arc<dyn Operator<Self>>> {
        None
    }
}

/// Free-function form of [`Element::compare`], usable where a comparator
/// closure is expected.
#[inline]
pub fn element_cmp<T: Element>(a: &T, b: &T) -> Ordering {
    a.compare(b)
}

// ============================================================================
// Implementations
// ============================================================================

macro_rules! impl_integer_element {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                #[inline]
                fn compare(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }

                fn native_operator() -> Option<Arc<dyn Operator<Self>>> {
                    Some(Arc::new(IntegerOperator::<$t>::new()))
                }
            }
        )*
    };
}

impl_integer_element!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float_element {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                #[inline]
                fn compare(&self, other: &Self) -> Ordering {
                    self.total_cmp(other)
                }

                fn native_operator() -> Option<Arc<dyn Operator<Self>>> {
                    Some(Arc::new(FloatOperator::<$t>::new()))
                }
            }
        )*
    };
}

impl_float_element!(f32, f64);

impl Element for String {
    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        Ord::cmp(self, other)
    }

    fn native_operator() -> Option<Arc<dyn Operator<Self>>> {
        Some(Arc::new(StringOperator))
    }
}

macro_rules! impl_ordered_element {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                #[inline]
                fn compare(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )*
    };
}

impl_ordered_element!(char, bool, &'static str);
