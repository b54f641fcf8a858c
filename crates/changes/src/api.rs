//! High-level API for building and resolving change chains.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry points: the [`Change`]
//! handle, whose every mutation call returns a new handle one generation
//! deeper, and the [`ResolverBuilder`], which configures how chains are
//! materialized.
//!
//! ## Design notes
//!
//! * **Persistent**: No call mutates a prior handle; handles share their
//!   common prefix.
//! * **Lazy**: Mutation calls only record operations; queries, reductions
//!   and `materialize` resolve the chain.
//! * **Validated early**: Flattened pair lists and parallel index/value lists
//!   are checked when the operation is recorded.
//! * **Fluent configuration**: The resolver builder follows the same
//!   set-once, validate-at-build pattern as every builder in the workspace.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`ResolverBuilder`] via `ResolverBuilder::new()`.
//! 2. Chain configuration methods (`.fusion()`, `.executor()`).
//! 3. Call `.build()` and pass the resolver to `materialize_with`.

// External dependencies
use core::cmp::Ordering;
use core::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

// Internal dependencies
use crate::algorithms::remove::Occurrence;
use crate::algorithms::replace::{Position, Selection};
use crate::algorithms::transform::Transform;
use crate::engine::executor::{Executor, SequentialExecutor};
use crate::engine::node::ChangeNode;
use crate::engine::operation::Operation;
use crate::engine::resolver::Resolver;
use crate::engine::validator::Validator;
use crate::evaluation::{information, reduction};
use crate::math::element::Element;
use crate::math::operator::{Arithmetic, Operator};
use crate::primitives::errors::ChangeResult;

// Publicly re-exported types
pub use crate::math::operator::{CharOperator, FloatOperator, IntegerOperator, StringOperator};
pub use crate::math::registry::{global_registry, register_operator, OperatorRegistry};
pub use crate::primitives::errors::ChangeError;

// ============================================================================
// Change Handle
// ============================================================================

/// Handle to an immutable node of a change chain.
pub struct Change<T: Element> {
    node: Arc<ChangeNode<T>>,
}

impl<T: Element> Clone for Change<T> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T: Element> From<Vec<T>> for Change<T> {
    fn from(values: Vec<T>) -> Self {
        Self::of(values)
    }
}

impl<T: Element> Change<T> {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Chain rooted at `values`.
    pub fn of(values: Vec<T>) -> Self {
        Self {
            node: ChangeNode::root(Some(values)),
        }
    }

    /// Chain rooted at a copy of `values`.
    pub fn from_slice(values: &[T]) -> Self {
        Self::of(values.to_vec())
    }

    /// Chain rooted at an empty array.
    pub fn empty() -> Self {
        Self::of(Vec::new())
    }

    /// Chain with no base array, usable only through [`Change::apply_to`].
    pub fn detached() -> Self {
        Self {
            node: ChangeNode::root(None),
        }
    }

    /// Handle to an existing node.
    pub fn from_node(node: Arc<ChangeNode<T>>) -> Self {
        Self { node }
    }

    fn push(&self, operation: Operation<T>) -> Self {
        Self {
            node: ChangeNode::derive(&self.node, operation),
        }
    }

    // ========================================================================
    // Adding
    // ========================================================================

    /// Append one value.
    pub fn add(&self, value: T) -> Self {
        self.push(Operation::AddValues(vec![value]))
    }

    /// Append several values.
    pub fn add_all<I: IntoIterator<Item = T>>(&self, values: I) -> Self {
        self.push(Operation::AddValues(values.into_iter().collect()))
    }

    // ========================================================================
    // Removing
    // ========================================================================

    /// Remove the first instance of each target.
    pub fn remove_first<I: IntoIterator<Item = T>>(&self, targets: I) -> Self {
        self.push(Operation::RemoveValues {
            targets: targets.into_iter().collect(),
            mode: Occurrence::First,
        })
    }

    /// Remove every instance of each target.
    pub fn remove_all<I: IntoIterator<Item = T>>(&self, targets: I) -> Self {
        self.push(Operation::RemoveValues {
            targets: targets.into_iter().collect(),
            mode: Occurrence::All,
        })
    }

    /// Remove the elements at the given indices.
    pub fn remove_at<I: IntoIterator<Item = usize>>(&self, indices: I) -> Self {
        self.push(Operation::RemoveIndices(indices.into_iter().collect()))
    }

    /// Remove every element satisfying `predicate`.
    pub fn remove_if<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.push(Operation::RemoveWhere(Arc::new(predicate)))
    }

    // ========================================================================
    // Replacing
    // ========================================================================

    /// Write `(index, value)` pairs; a later pair for the same index wins.
    pub fn replace_at<I: IntoIterator<Item = (usize, T)>>(&self, pairs: I) -> Self {
        self.push(Operation::ReplaceAtIndices(pairs.into_iter().collect()))
    }

    /// Write `values[i]` at `indices[i]`.
    pub fn set_at(&self, indices: &[usize], values: &[T]) -> ChangeResult<Self> {
        Validator::validate_parallel_lists(indices.len(), values.len())?;
        Ok(self.replace_at(indices.iter().copied().zip(values.iter().cloned())))
    }

    /// Write the same value at every listed index.
    pub fn set_all_at(&self, indices: &[usize], value: T) -> Self {
        self.replace_at(indices.iter().map(|&i| (i, value.clone())))
    }

    /// Substitute every instance of each old value.
    pub fn replace_all<I: IntoIterator<Item = (T, T)>>(&self, pairs: I) -> Self {
        self.push(Operation::ReplaceValues(pairs.into_iter().collect()))
    }

    /// [`Change::replace_all`] with pairs flattened as `[old, new, old, new, ...]`.
    pub fn replace_all_flat(&self, values: &[T]) -> ChangeResult<Self> {
        Ok(self.replace_all(flat_pairs(values)?))
    }

    /// Substitute the earliest instance of each old value.
    pub fn replace_first<I: IntoIterator<Item = (T, T)>>(&self, pairs: I) -> Self {
        self.push(Operation::ReplaceFirstOrLast {
            pairs: pairs.into_iter().collect(),
            which: Position::First,
        })
    }

    /// [`Change::replace_first`] with flattened pairs.
    pub fn replace_first_flat(&self, values: &[T]) -> ChangeResult<Self> {
        Ok(self.replace_first(flat_pairs(values)?))
    }

    /// Substitute the latest instance of each old value.
    pub fn replace_last<I: IntoIterator<Item = (T, T)>>(&self, pairs: I) -> Self {
        self.push(Operation::ReplaceFirstOrLast {
            pairs: pairs.into_iter().collect(),
            which: Position::Last,
        })
    }

    /// [`Change::replace_last`] with flattened pairs.
    pub fn replace_last_flat(&self, values: &[T]) -> ChangeResult<Self> {
        Ok(self.replace_last(flat_pairs(values)?))
    }

    /// Replace every element satisfying `predicate` with `value`.
    pub fn replace_all_if<P>(&self, predicate: P, value: T) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.replace_where(predicate, value, Selection::All)
    }

    /// Replace the first element satisfying `predicate` with `value`.
    pub fn replace_first_if<P>(&self, predicate: P, value: T) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.replace_where(predicate, value, Selection::First)
    }

    /// Replace the last element satisfying `predicate` with `value`.
    pub fn replace_last_if<P>(&self, predicate: P, value: T) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.replace_where(predicate, value, Selection::Last)
    }

    fn replace_where<P>(&self, predicate: P, value: T, which: Selection) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.push(Operation::ReplaceWhere {
            predicate: Arc::new(predicate),
            value,
            which,
        })
    }

    // ========================================================================
    // Retaining
    // ========================================================================

    /// Keep only the first instance of each target; everything else is dropped.
    pub fn retain_first<I: IntoIterator<Item = T>>(&self, targets: I) -> Self {
        self.push(Operation::RetainValues {
            targets: targets.into_iter().collect(),
            mode: Occurrence::First,
        })
    }

    /// Keep every instance of the targets; everything else is dropped.
    pub fn retain_all<I: IntoIterator<Item = T>>(&self, targets: I) -> Self {
        self.push(Operation::RetainValues {
            targets: targets.into_iter().collect(),
            mode: Occurrence::All,
        })
    }

    /// Keep the elements satisfying `predicate`.
    pub fn retain_if<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.push(Operation::RetainWhere(Arc::new(predicate)))
    }

    // ========================================================================
    // Transforms
    // ========================================================================

    /// Stable sort by the element ordering.
    pub fn sorted(&self) -> Self {
        self.push(Operation::Transform(Transform::Sort(None)))
    }

    /// Stable sort by `cmp`.
    pub fn sorted_by<C>(&self, cmp: C) -> Self
    where
        C: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.push(Operation::Transform(Transform::Sort(Some(Arc::new(cmp)))))
    }

    /// Keep the first instance of every distinct value, in order.
    pub fn unique(&self) -> Self {
        self.push(Operation::Transform(Transform::Dedup(None)))
    }

    /// [`Change::unique`] with equality defined by `cmp`.
    pub fn unique_by<C>(&self, cmp: C) -> Self
    where
        C: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.push(Operation::Transform(Transform::Dedup(Some(Arc::new(cmp)))))
    }

    /// Apply `mapper` to every element.
    pub fn map<M>(&self, mapper: M) -> Self
    where
        M: Fn(&T) -> T + Send + Sync + 'static,
    {
        self.push(Operation::Transform(Transform::Map(Arc::new(mapper))))
    }

    /// Drop every element.
    pub fn clear(&self) -> Self {
        self.push(Operation::Transform(Transform::Clear))
    }

    /// Apply a whole-array function.
    pub fn transform<F>(&self, f: F) -> Self
    where
        F: Fn(Vec<T>) -> Vec<T> + Send + Sync + 'static,
    {
        self.push(Operation::Transform(Transform::Custom(Arc::new(f))))
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve the chain sequentially, with fusion.
    pub fn materialize(&self) -> ChangeResult<Vec<T>> {
        Resolver::default().materialize(&self.node)
    }

    /// Resolve the chain with a configured resolver.
    pub fn materialize_with(&self, resolver: &Resolver<T>) -> ChangeResult<Vec<T>> {
        resolver.materialize(&self.node)
    }

    /// Resolve the chain's operations against `values`.
    pub fn apply_to(&self, values: Vec<T>) -> ChangeResult<Vec<T>> {
        Resolver::default().apply_to(&self.node, values)
    }

    /// [`Change::apply_to`] with a configured resolver.
    pub fn apply_to_with(&self, resolver: &Resolver<T>, values: Vec<T>) -> ChangeResult<Vec<T>> {
        resolver.apply_to(&self.node, values)
    }

    /// New generation-0 handle owning the materialized array.
    pub fn compact(&self) -> ChangeResult<Self> {
        Ok(Self::of(self.materialize()?))
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Depth of this handle's node.
    pub fn generation(&self) -> usize {
        self.node.generation()
    }

    /// Handle to the parent node.
    pub fn previous(&self) -> Option<Self> {
        self.node.parent().map(|parent| Self::from_node(Arc::clone(parent)))
    }

    /// Operation recorded by this handle's node.
    pub fn operation(&self) -> Option<&Operation<T>> {
        self.node.operation()
    }

    /// Underlying node.
    pub fn node(&self) -> &Arc<ChangeNode<T>> {
        &self.node
    }

    /// Handles from the root to this one, root first.
    pub fn history(&self) -> Vec<Self> {
        let mut handles = Vec::with_capacity(self.generation() + 1);
        let mut current = Some(self.clone());
        while let Some(handle) = current {
            current = handle.previous();
            handles.push(handle);
        }
        handles.reverse();
        handles
    }

    /// Whether two handles point at the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Length of the materialized array.
    pub fn len(&self) -> ChangeResult<usize> {
        Ok(self.materialize()?.len())
    }

    /// Whether the materialized array is empty.
    pub fn is_empty(&self) -> ChangeResult<bool> {
        Ok(self.materialize()?.is_empty())
    }

    /// Whether `value` occurs.
    pub fn contains(&self, value: &T) -> ChangeResult<bool> {
        Ok(self.materialize()?.iter().any(|v| v.same(value)))
    }

    /// Whether every target occurs.
    pub fn contains_all(&self, targets: &[T]) -> ChangeResult<bool> {
        Ok(information::contains_all(&self.materialize()?, targets))
    }

    /// Earliest index of each target.
    pub fn find_first(&self, targets: &[T]) -> ChangeResult<Vec<Option<usize>>> {
        Ok(information::find_first(&self.materialize()?, targets))
    }

    /// Every index holding a target.
    pub fn find_all(&self, targets: &[T]) -> ChangeResult<Vec<usize>> {
        Ok(information::find_all(&self.materialize()?, targets))
    }

    /// Elements at the given indices.
    pub fn get_at(&self, indices: &[usize]) -> ChangeResult<Vec<T>> {
        information::get_at(&self.materialize()?, indices)
    }

    /// First element satisfying `predicate`.
    pub fn get_first<P: Fn(&T) -> bool>(&self, predicate: P) -> ChangeResult<Option<T>> {
        Ok(information::get_first(&self.materialize()?, predicate))
    }

    /// Every element satisfying `predicate`.
    pub fn get_all<P: Fn(&T) -> bool>(&self, predicate: P) -> ChangeResult<Vec<T>> {
        Ok(information::get_all(&self.materialize()?, predicate))
    }

    /// Number of instances of each target.
    pub fn count_of(&self, targets: &[T]) -> ChangeResult<Vec<usize>> {
        Ok(information::count_of(&self.materialize()?, targets))
    }

    /// Number of elements satisfying `predicate`.
    pub fn count_where<P: Fn(&T) -> bool>(&self, predicate: P) -> ChangeResult<usize> {
        Ok(information::count_where(&self.materialize()?, predicate))
    }

    // ========================================================================
    // Reductions
    // ========================================================================

    /// Sum of all elements; `None` when empty.
    pub fn sum(&self) -> ChangeResult<Option<T>> {
        reduction::sum(&self.materialize()?)
    }

    /// First element minus every following one; `None` when empty.
    pub fn difference(&self) -> ChangeResult<Option<T>> {
        reduction::difference(&self.materialize()?)
    }

    /// Product of all elements; `None` when empty.
    pub fn product(&self) -> ChangeResult<Option<T>> {
        reduction::product(&self.materialize()?)
    }

    /// First element divided by every following one; `None` when empty.
    pub fn quotient(&self) -> ChangeResult<Option<T>> {
        reduction::quotient(&self.materialize()?)
    }

    /// [`Change::sum`] through an explicit table.
    pub fn sum_with(&self, operator: &dyn Operator<T>) -> ChangeResult<Option<T>> {
        reduction::reduce_with(&self.materialize()?, operator, Arithmetic::Add)
    }

    /// [`Change::difference`] through an explicit table.
    pub fn difference_with(&self, operator: &dyn Operator<T>) -> ChangeResult<Option<T>> {
        reduction::reduce_with(&self.materialize()?, operator, Arithmetic::Subtract)
    }

    /// [`Change::product`] through an explicit table.
    pub fn product_with(&self, operator: &dyn Operator<T>) -> ChangeResult<Option<T>> {
        reduction::reduce_with(&self.materialize()?, operator, Arithmetic::Multiply)
    }

    /// [`Change::quotient`] through an explicit table.
    pub fn quotient_with(&self, operator: &dyn Operator<T>) -> ChangeResult<Option<T>> {
        reduction::reduce_with(&self.materialize()?, operator, Arithmetic::Divide)
    }
}

/// Split `[a, b, c, d]` into `[(a, b), (c, d)]`.
fn flat_pairs<T: Clone>(values: &[T]) -> ChangeResult<Vec<(T, T)>> {
    Validator::validate_flat_pairs(values.len())?;
    Ok(values
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect())
}

impl<T: Element> Debug for Change<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Change")
            .field("generation", &self.generation())
            .field("operation", &self.operation())
            .finish()
    }
}

impl<T: Element> Display for Change<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let root = self.node.root_node();
        match root.base() {
            Some(base) => writeln!(f, "Change (base: {} elements)", base.len())?,
            None => writeln!(f, "Change (detached)")?,
        }
        for (generation, operation) in self.node.operations().into_iter().enumerate() {
            writeln!(f, "  {:>4}  {operation:?}", generation + 1)?;
        }
        Ok(())
    }
}

// ============================================================================
// Resolver Builder
// ============================================================================

/// Fluent builder for [`Resolver`].
pub struct ResolverBuilder<T: Element> {
    /// Whether adjacent compatible operations are fused.
    pub fusion: Option<bool>,

    /// Executor running the steps.
    pub executor: Option<Arc<dyn Executor<T>>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Element> Default for ResolverBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> ResolverBuilder<T> {
    /// Convert to an execution-specific builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: ResolverAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            fusion: None,
            executor: None,
            duplicate_param: None,
        }
    }

    /// Enable or disable fusion of adjacent compatible operations.
    pub fn fusion(mut self, enabled: bool) -> Self {
        if self.fusion.is_some() {
            self.duplicate_param = Some("fusion");
        }
        self.fusion = Some(enabled);
        self
    }

    /// Set the executor running each step.
    pub fn executor(mut self, executor: Arc<dyn Executor<T>>) -> Self {
        if self.executor.is_some() {
            self.duplicate_param = Some("executor");
        }
        self.executor = Some(executor);
        self
    }

    /// Validate the configuration and build the resolver.
    pub fn build(self) -> ChangeResult<Resolver<T>> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        Ok(Resolver::new(
            self.fusion.unwrap_or(true),
            self.executor
                .unwrap_or_else(|| Arc::new(SequentialExecutor) as Arc<dyn Executor<T>>),
        ))
    }
}

// ============================================================================
// Adapters
// ============================================================================

/// Conversion of the base builder into an execution-specific builder.
pub trait ResolverAdapter<T: Element> {
    /// Builder produced by the conversion.
    type Output;

    /// Convert the base builder.
    fn convert(builder: ResolverBuilder<T>) -> Self::Output;
}

/// Marker for single-threaded resolution.
#[derive(Debug, Clone, Copy)]
pub struct Sequential;

impl<T: Element> ResolverAdapter<T> for Sequential {
    type Output = ResolverBuilder<T>;

    fn convert(builder: ResolverBuilder<T>) -> Self::Output {
        builder
    }
}
