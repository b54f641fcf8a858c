//! Shared closure types bound to the element type at the call site.
//!
//! Every closure is reference-counted so chain nodes can be shared across
//! branches and threads without copying user code.

// External dependencies
use core::cmp::Ordering;
use std::sync::Arc;

/// Element test used by conditional operations.
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Elementwise transformation used by `map`.
pub type Mapper<T> = Arc<dyn Fn(&T) -> T + Send + Sync>;

/// Total ordering used by `sort` and `dedup`.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Whole-array transformation used by custom transforms.
pub type ArrayFn<T> = Arc<dyn Fn(Vec<T>) -> Vec<T> + Send + Sync>;
