//! Tests for numeric reductions and operator dispatch.
//!
//! Reductions fold the materialized array left to right through the operator
//! table resolved for the element type: the built-in capability first, then
//! a table from the global registry.
//!
//! ## Test Organization
//!
//! 1. **Integers** - Checked arithmetic and failures
//! 2. **Floats** - IEEE arithmetic
//! 3. **Strings and Chars** - Built-in string table, registered char table
//! 4. **Dispatch** - Unsupported types, explicit and registered tables

use approx::assert_relative_eq;
use core::cmp::Ordering;

use changes::internals::math::dispatch::resolve_operator;
use changes::prelude::*;

// ============================================================================
// Integer Tests
// ============================================================================

/// Test the four reductions over integers.
#[test]
fn test_integer_reductions() {
    let chain = Change::of(vec![100, 5, 2]);

    assert_eq!(chain.sum().unwrap(), Some(107));
    assert_eq!(chain.difference().unwrap(), Some(93));
    assert_eq!(chain.product().unwrap(), Some(1000));
    assert_eq!(chain.quotient().unwrap(), Some(10));
}

/// Test that reductions observe the resolved chain.
#[test]
fn test_reduction_after_operations() {
    let chain = Change::of(vec![1, 2, 3, 4]).remove_first([4]).map(|v| v * 10);
    assert_eq!(chain.sum().unwrap(), Some(60));
}

/// Test reductions of empty and single-element arrays.
#[test]
fn test_empty_and_single_reductions() {
    let empty = Change::<i64>::empty();
    assert_eq!(empty.sum().unwrap(), None);
    assert_eq!(empty.quotient().unwrap(), None);

    let single = Change::of(vec![7_i64]);
    assert_eq!(single.difference().unwrap(), Some(7));
    assert_eq!(single.quotient().unwrap(), Some(7));
}

/// Test overflow and division by zero.
#[test]
fn test_integer_failures() {
    let overflow = Change::of(vec![100_i8, 100]).sum();
    assert!(matches!(overflow, Err(ChangeError::ArithmeticFailure(_))));

    let by_zero = Change::of(vec![1_u32, 0]).quotient();
    assert!(matches!(by_zero, Err(ChangeError::ArithmeticFailure(_))));
}

/// Test scalar operations of the integer table.
#[test]
fn test_integer_scalar_operations() {
    let table = IntegerOperator::<i32>::new();
    assert_eq!(table.mul_scalar(&6, 7).unwrap(), 42);
    assert_eq!(table.div_scalar(&42, 6).unwrap(), 7);
    assert!(table.mul_scalar(&1, i64::MAX).is_err());
}

// ============================================================================
// Float Tests
// ============================================================================

/// Test the four reductions over floats.
#[test]
fn test_float_reductions() {
    let chain = Change::of(vec![0.1_f64, 0.2, 0.3]);

    assert_relative_eq!(chain.sum().unwrap().unwrap(), 0.6, epsilon = 1e-12);
    assert_relative_eq!(chain.difference().unwrap().unwrap(), -0.4, epsilon = 1e-12);
    assert_relative_eq!(chain.product().unwrap().unwrap(), 0.006, epsilon = 1e-12);
    assert_relative_eq!(
        Change::of(vec![1.0_f32, 4.0]).quotient().unwrap().unwrap(),
        0.25
    );
}

/// Test that float division by zero follows IEEE 754.
#[test]
fn test_float_division_by_zero() {
    let result = Change::of(vec![1.0_f64, 0.0]).quotient().unwrap().unwrap();
    assert!(result.is_infinite());
}

// ============================================================================
// String and Char Tests
// ============================================================================

/// Test the built-in string table.
#[test]
fn test_string_reductions() {
    let chain = Change::of(vec!["banana".to_string(), "an".to_string()]);

    assert_eq!(chain.sum().unwrap(), Some("bananaan".to_string()));
    assert_eq!(chain.difference().unwrap(), Some("b".to_string()));
    assert_eq!(
        chain.product(),
        Err(ChangeError::UnsupportedOperation {
            operation: "multiplication",
            type_name: "alloc::string::String",
        })
    );
    assert_eq!(StringOperator.mul_scalar(&"ab".to_string(), 3).unwrap(), "ababab");
    assert!(StringOperator.mul_scalar(&"ab".to_string(), -1).is_err());
}

/// Test string difference with more distinct characters than the binary
/// search threshold.
#[test]
fn test_string_difference_many_chars() {
    let removed: String = ('0'..='9')
        .chain('a'..='z')
        .chain('A'..='Z')
        .chain("!#$%&*+-".chars())
        .collect();
    assert_eq!(removed.chars().count(), 70);

    let source = format!("{removed}~{removed}^");
    assert_eq!(StringOperator.sub(&source, &removed).unwrap(), "~^");
}

/// Test the registered char table.
#[test]
fn test_char_reductions_use_registry() {
    assert!(global_registry().contains::<char>());

    let digits = Change::of(vec!['1', '2', '3']);
    assert_eq!(digits.sum().unwrap(), Some('6'));
    assert_eq!(Change::of(vec!['z', '9']).difference().unwrap(), Some('q'));

    let overflow = Change::of(vec!['z', '1']).sum();
    assert!(matches!(overflow, Err(ChangeError::ArithmeticFailure(_))));

    assert!(matches!(
        Change::of(vec!['2', '3']).product(),
        Err(ChangeError::UnsupportedOperation { .. })
    ));
}

// ============================================================================
// Dispatch Tests
// ============================================================================

/// Test that types with no table report the operation and type.
#[test]
fn test_unsupported_type() {
    let err = Change::of(vec![true, false]).sum().unwrap_err();
    assert_eq!(
        err,
        ChangeError::UnsupportedOperation {
            operation: "addition",
            type_name: "bool",
        }
    );
}

/// Test that an unsupported type still reduces an empty array to an error.
#[test]
fn test_unsupported_type_empty() {
    assert!(Change::<bool>::empty().sum().is_err());
}

/// Logical table over booleans: add is "or", multiply is "and".
struct Logic;

impl Operator<bool> for Logic {
    fn supported(&self) -> &'static [Arithmetic] {
        &[Arithmetic::Add, Arithmetic::Multiply]
    }

    fn add(&self, a: &bool, b: &bool) -> ChangeResult<bool> {
        Ok(*a || *b)
    }

    fn mul(&self, a: &bool, b: &bool) -> ChangeResult<bool> {
        Ok(*a && *b)
    }
}

/// Test reductions through an explicit table.
#[test]
fn test_explicit_table() {
    let chain = Change::of(vec![false, true, false]);

    assert_eq!(chain.sum_with(&Logic).unwrap(), Some(true));
    assert_eq!(chain.product_with(&Logic).unwrap(), Some(false));
    assert!(chain.difference_with(&Logic).is_err());
}

/// Element type owned by this test, registered in the global registry.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cents(i64);

impl Element for Cents {
    fn compare(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

struct CentsOperator;

impl Operator<Cents> for CentsOperator {
    fn supported(&self) -> &'static [Arithmetic] {
        &[Arithmetic::Add, Arithmetic::Subtract]
    }

    fn add(&self, a: &Cents, b: &Cents) -> ChangeResult<Cents> {
        Ok(Cents(a.0 + b.0))
    }

    fn sub(&self, a: &Cents, b: &Cents) -> ChangeResult<Cents> {
        Ok(Cents(a.0 - b.0))
    }
}

/// Test reductions over a user type with a registered table.
#[test]
fn test_registered_table() {
    register_operator::<Cents, _>(CentsOperator);

    let chain = Change::of(vec![Cents(250), Cents(199), Cents(1)]);
    assert_eq!(chain.sum().unwrap(), Some(Cents(450)));
    assert_eq!(chain.difference().unwrap(), Some(Cents(50)));
    assert!(matches!(
        chain.quotient(),
        Err(ChangeError::UnsupportedOperation { .. })
    ));
    assert!(resolve_operator::<Cents>(Arithmetic::Add).is_ok());
}

/// Test that a native capability takes precedence over the registry.
#[test]
fn test_native_capability_first() {
    let table = resolve_operator::<i32>(Arithmetic::Add).unwrap();
    assert_eq!(table.add(&2, &3).unwrap(), 5);
    assert!(table.supports(Arithmetic::DivideScalar));
}

/// Test a private registry independent of the global one.
#[test]
fn test_private_registry() {
    let registry = OperatorRegistry::new();
    assert!(!registry.contains::<bool>());

    registry.register::<bool>(std::sync::Arc::new(Logic));
    let table = registry.get::<bool>().unwrap();
    assert!(table.add(&false, &true).unwrap());
}
