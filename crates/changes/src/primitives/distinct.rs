//! Stable distinct retention and index-preserving wrap/unwrap.
//!
//! ## Purpose
//!
//! This module provides the building blocks of order-stable, sort-based
//! algorithms: pairing each value with its original position, sorting by
//! value, and restoring original order afterwards.
//!
//! ## Design notes
//!
//! * **Stability**: Uses stable sorting so equal values keep their position order.
//! * **Sort-Filter-Unsort**: Duplicates are brought together by a sort, filtered,
//!   then restored to index order.
//!
//! ## Key concepts
//!
//! ### Wrap-Sort-Unwrap Pattern
//! 1. **Wrap**: `(index, value)` pairs are created for each element.
//! 2. **Sort**: Pairs are sorted by value; ties keep ascending index order.
//! 3. **Filter**: Only the first pair of each run of equal values is kept.
//! 4. **Unwrap**: Kept pairs are sorted by index and the values extracted.
//!
//! ## Invariants
//!
//! * The first occurrence of every equality class survives.
//! * The output preserves the relative order of first occurrences.
//!
//! ## Non-goals
//!
//! * This module does not parallelize; see the parallel extension crate.

// External dependencies
use core::cmp::Ordering;

// ============================================================================
// Wrapping
// ============================================================================

/// A value tagged with its position in the source array.
#[derive(Debug, Clone, PartialEq)]
pub struct Indexed<T> {
    /// Position in the source array.
    pub index: usize,
    /// The value.
    pub value: T,
}

/// Pair every value with its original position.
pub fn wrap<T: Clone>(values: &[T]) -> Vec<Indexed<T>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| Indexed {
            index,
            value: value.clone(),
        })
        .collect()
}

/// Restore index order and extract the values.
pub fn unwrap_in_index_order<T>(mut wrapped: Vec<Indexed<T>>) -> Vec<T> {
    wrapped.sort_unstable_by_key(|w| w.index);
    wrapped.into_iter().map(|w| w.value).collect()
}

/// Stable sort of wrapped values by value; ties keep ascending index order.
pub fn sort_wrapped_by<T, F>(wrapped: &mut [Indexed<T>], cmp: F)
where
    F: Fn(&T, &T) -> Ordering,
{
    wrapped.sort_by(|a, b| cmp(&a.value, &b.value).then(a.index.cmp(&b.index)));
}

// ============================================================================
// Distinct Retention
// ============================================================================

/// Keep the first occurrence of every equality class, in original order.
pub fn retain_distinct_by<T, F>(values: &[T], cmp: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    if values.len() < 2 {
        return values.to_vec();
    }

    let mut wrapped = wrap(values);
    sort_wrapped_by(&mut wrapped, &cmp);
    wrapped.dedup_by(|current, previous| cmp(&current.value, &previous.value) == Ordering::Equal);

    unwrap_in_index_order(wrapped)
}

/// Sorted ascending copy with one representative per equality class.
pub fn sorted_distinct_by<T, F>(values: &[T], cmp: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let mut sorted = values.to_vec();
    sorted.sort_by(&cmp);
    sorted.dedup_by(|current, previous| cmp(current, previous) == Ordering::Equal);
    sorted
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retain_distinct_keeps_first_occurrences() {
        let values = [3, 1, 3, 2, 1, 4];
        assert_eq!(retain_distinct_by(&values, i32::cmp), vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_wrap_unwrap_round_trip_order() {
        let mut wrapped = wrap(&['c', 'a', 'b']);
        sort_wrapped_by(&mut wrapped, char::cmp);
        assert_eq!(wrapped[0].index, 1);
        assert_eq!(unwrap_in_index_order(wrapped), vec!['c', 'a', 'b']);
    }
}
