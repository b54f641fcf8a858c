//! Appending values to the end of an array.

/// Append `extra` after the existing elements.
pub fn add_values<T: Clone>(mut values: Vec<T>, extra: &[T]) -> Vec<T> {
    values.extend_from_slice(extra);
    values
}
