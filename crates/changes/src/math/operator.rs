//! Arithmetic operator tables for element types.
//!
//! ## Purpose
//!
//! This module defines the [`Operator`] trait, a table of arithmetic
//! operations over an element type, together with the built-in tables for
//! integers, floats, strings and digit characters. Reductions dispatch
//! through these tables instead of native operators, so any element type can
//! take part by providing one.
//!
//! ## Design notes
//!
//! * **Opt-in**: Every method defaults to `UnsupportedOperation`; tables
//!   override only what they support and advertise it through `supported`.
//! * **Checked**: Integer tables use checked arithmetic; overflow and division
//!   by zero become `ArithmeticFailure` rather than panics.
//! * **Scalars**: Scalar forms take an `i64` and convert it into the element
//!   type with `NumCast`, failing if it does not fit.
//!
//! ## Key concepts
//!
//! * **Arithmetic**: The closed set of operations a table may support.
//! * **Built-in tables**: [`IntegerOperator`], [`FloatOperator`],
//!   [`StringOperator`], [`CharOperator`].
//!
//! ## Invariants
//!
//! * An operation listed in `supported` never returns `UnsupportedOperation`.
//!
//! ## Non-goals
//!
//! * This module does not choose a table for a type; see the registry and
//!   dispatch modules.

// External dependencies
use core::any::type_name;
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::marker::PhantomData;
use num_traits::{Float, NumCast, PrimInt};

// Internal dependencies
use crate::primitives::errors::{ChangeError, ChangeResult};
use crate::primitives::search::TargetSet;

// ============================================================================
// Arithmetic Kinds
// ============================================================================

/// Arithmetic operations an operator table may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arithmetic {
    /// `a + b`
    Add,
    /// `a - b`
    Subtract,
    /// `a * b`
    Multiply,
    /// `a * n` for an integer scalar `n`
    MultiplyScalar,
    /// `a / b`
    Divide,
    /// `a / n` for an integer scalar `n`
    DivideScalar,
}

impl Arithmetic {
    /// Human-readable name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Arithmetic::Add => "addition",
            Arithmetic::Subtract => "subtraction",
            Arithmetic::Multiply => "multiplication",
            Arithmetic::MultiplyScalar => "scalar multiplication",
            Arithmetic::Divide => "division",
            Arithmetic::DivideScalar => "scalar division",
        }
    }
}

impl Display for Arithmetic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Error for an operation the table does not provide.
pub fn unsupported<T>(operation: Arithmetic) -> ChangeError {
    ChangeError::UnsupportedOperation {
        operation: operation.name(),
        type_name: type_name::<T>(),
    }
}

// ============================================================================
// Operator Trait
// ============================================================================

/// Arithmetic table over an element type.
pub trait Operator<T>: Send + Sync {
    /// Operations this table implements.
    fn supported(&self) -> &'static [Arithmetic] {
        &[]
    }

    /// Whether the table implements `operation`.
    fn supports(&self, operation: Arithmetic) -> bool {
        self.supported().contains(&operation)
    }

    /// `a + b`
    fn add(&self, _a: &T, _b: &T) -> ChangeResult<T> {
        Err(unsupported::<T>(Arithmetic::Add))
    }

    /// `a - b`
    fn sub(&self, _a: &T, _b: &T) -> ChangeResult<T> {
        Err(unsupported::<T>(Arithmetic::Subtract))
    }

    /// `a * b`
    fn mul(&self, _a: &T, _b: &T) -> ChangeResult<T> {
        Err(unsupported::<T>(Arithmetic::Multiply))
    }

    /// `a * n`
    fn mul_scalar(&self, _a: &T, _n: i64) -> ChangeResult<T> {
        Err(unsupported::<T>(Arithmetic::MultiplyScalar))
    }

    /// `a / b`
    fn div(&self, _a: &T, _b: &T) -> ChangeResult<T> {
        Err(unsupported::<T>(Arithmetic::Divide))
    }

    /// `a / n`
    fn div_scalar(&self, _a: &T, _n: i64) -> ChangeResult<T> {
        Err(unsupported::<T>(Arithmetic::DivideScalar))
    }

    /// Apply a binary operation by kind.
    fn apply(&self, operation: Arithmetic, a: &T, b: &T) -> ChangeResult<T> {
        match operation {
            Arithmetic::Add => self.add(a, b),
            Arithmetic::Subtract => self.sub(a, b),
            Arithmetic::Multiply => self.mul(a, b),
            Arithmetic::Divide => self.div(a, b),
            Arithmetic::MultiplyScalar | Arithmetic::DivideScalar => Err(unsupported::<T>(operation)),
        }
    }
}

const ALL_ARITHMETIC: &[Arithmetic] = &[
    Arithmetic::Add,
    Arithmetic::Subtract,
    Arithmetic::Multiply,
    Arithmetic::MultiplyScalar,
    Arithmetic::Divide,
    Arithmetic::DivideScalar,
];

fn scalar<T: NumCast>(n: i64) -> ChangeResult<T> {
    <T as NumCast>::from(n).ok_or_else(|| {
        ChangeError::ArithmeticFailure(format!(
            "scalar {n} does not fit in {}",
            type_name::<T>()
        ))
    })
}

fn overflow<T>(operation: Arithmetic) -> ChangeError {
    ChangeError::ArithmeticFailure(format!(
        "{operation} overflowed or divided by zero for {}",
        type_name::<T>()
    ))
}

// ============================================================================
// Integer Operator
// ============================================================================

/// Checked arithmetic over primitive integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerOperator<T>(PhantomData<fn() -> T>);

impl<T> IntegerOperator<T> {
    /// Create the table.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: PrimInt + Send + Sync> Operator<T> for IntegerOperator<T> {
    fn supported(&self) -> &'static [Arithmetic] {
        ALL_ARITHMETIC
    }

    fn add(&self, a: &T, b: &T) -> ChangeResult<T> {
        a.checked_add(b).ok_or_else(|| overflow::<T>(Arithmetic::Add))
    }

    fn sub(&self, a: &T, b: &T) -> ChangeResult<T> {
        a.checked_sub(b)
            .ok_or_else(|| overflow::<T>(Arithmetic::Subtract))
    }

    fn mul(&self, a: &T, b: &T) -> ChangeResult<T> {
        a.checked_mul(b)
            .ok_or_else(|| overflow::<T>(Arithmetic::Multiply))
    }

    fn mul_scalar(&self, a: &T, n: i64) -> ChangeResult<T> {
        let n = scalar::<T>(n)?;
        a.checked_mul(&n)
            .ok_or_else(|| overflow::<T>(Arithmetic::MultiplyScalar))
    }

    fn div(&self, a: &T, b: &T) -> ChangeResult<T> {
        a.checked_div(b).ok_or_else(|| overflow::<T>(Arithmetic::Divide))
    }

    fn div_scalar(&self, a: &T, n: i64) -> ChangeResult<T> {
        let n = scalar::<T>(n)?;
        a.checked_div(&n)
            .ok_or_else(|| overflow::<T>(Arithmetic::DivideScalar))
    }
}

// ============================================================================
// Float Operator
// ============================================================================

/// IEEE 754 arithmetic over floating-point types.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatOperator<T>(PhantomData<fn() -> T>);

impl<T> FloatOperator<T> {
    /// Create the table.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Float + Send + Sync> Operator<T> for FloatOperator<T> {
    fn supported(&self) -> &'static [Arithmetic] {
        ALL_ARITHMETIC
    }

    fn add(&self, a: &T, b: &T) -> ChangeResult<T> {
        Ok(*a + *b)
    }

    fn sub(&self, a: &T, b: &T) -> ChangeResult<T> {
        Ok(*a - *b)
    }

    fn mul(&self, a: &T, b: &T) -> ChangeResult<T> {
        Ok(*a * *b)
    }

    fn mul_scalar(&self, a: &T, n: i64) -> ChangeResult<T> {
        Ok(*a * scalar::<T>(n)?)
    }

    fn div(&self, a: &T, b: &T) -> ChangeResult<T> {
        Ok(*a / *b)
    }

    fn div_scalar(&self, a: &T, n: i64) -> ChangeResult<T> {
        Ok(*a / scalar::<T>(n)?)
    }
}

// ============================================================================
// String Operator
// ============================================================================

/// String table: concatenation, character removal and repetition.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringOperator;

impl Operator<String> for StringOperator {
    fn supported(&self) -> &'static [Arithmetic] {
        &[Arithmetic::Add, Arithmetic::Subtract, Arithmetic::MultiplyScalar]
    }

    fn add(&self, a: &String, b: &String) -> ChangeResult<String> {
        let mut out = String::with_capacity(a.len() + b.len());
        out.push_str(a);
        out.push_str(b);
        Ok(out)
    }

    /// Remove every character of `b` from `a`.
    fn sub(&self, a: &String, b: &String) -> ChangeResult<String> {
        let removed: Vec<char> = b.chars().collect();
        let removed = TargetSet::new(&removed, char::cmp);
        Ok(a.chars().filter(|c| !removed.contains(c, char::cmp)).collect())
    }

    fn mul_scalar(&self, a: &String, n: i64) -> ChangeResult<String> {
        let times = usize::try_from(n).map_err(|_| {
            ChangeError::ArithmeticFailure(format!("cannot repeat a string {n} times"))
        })?;
        Ok(a.repeat(times))
    }
}

// ============================================================================
// Char Operator
// ============================================================================

/// Digit arithmetic over base-36 characters (`'0'..='9'`, `'a'..='z'`).
#[derive(Debug, Clone, Copy, Default)]
pub struct CharOperator;

impl CharOperator {
    const RADIX: u32 = 36;

    fn digit(c: &char) -> ChangeResult<i64> {
        c.to_digit(Self::RADIX)
            .map(<i64 as From<u32>>::from)
            .ok_or_else(|| ChangeError::ArithmeticFailure(format!("'{c}' is not a digit")))
    }

    fn from_digit(value: i64) -> ChangeResult<char> {
        u32::try_from(value)
            .ok()
            .and_then(|v| char::from_digit(v, Self::RADIX))
            .ok_or_else(|| {
                ChangeError::ArithmeticFailure(format!("{value} is not a base-36 digit"))
            })
    }
}

impl Operator<char> for CharOperator {
    fn supported(&self) -> &'static [Arithmetic] {
        &[Arithmetic::Add, Arithmetic::Subtract, Arithmetic::MultiplyScalar]
    }

    fn add(&self, a: &char, b: &char) -> ChangeResult<char> {
        Self::from_digit(Self::digit(a)? + Self::digit(b)?)
    }

    fn sub(&self, a: &char, b: &char) -> ChangeResult<char> {
        Self::from_digit(Self::digit(a)? - Self::digit(b)?)
    }

    fn mul_scalar(&self, a: &char, n: i64) -> ChangeResult<char> {
        let product = Self::digit(a)?
            .checked_mul(n)
            .ok_or_else(|| overflow::<char>(Arithmetic::MultiplyScalar))?;
        Self::from_digit(product)
    }
}
