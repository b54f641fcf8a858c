//! Immutable chain nodes forming a persistent history.
//!
//! ## Purpose
//!
//! This module defines [`ChangeNode`], one link of a change chain. A root
//! (generation 0) optionally owns the base array; every other node records
//! one [`Operation`] and shares its parent, so several chains can branch off
//! a common prefix without copying it.
//!
//! ## Design notes
//!
//! * **Shared parents**: Parents are held through `Arc`, forming a tree of
//!   histories converging at shared ancestors.
//! * **Detached roots**: A root without a base array is a reusable template;
//!   it can only be applied to an external array.
//! * **Iterative drop**: Long linear chains are released iteratively so that
//!   dropping the last handle cannot overflow the stack.
//!
//! ## Invariants
//!
//! * `generation == 0` ⇔ no parent ⇔ no operation.
//! * A derived node's generation is its parent's generation plus one.
//! * Only roots may own a base array.
//!
//! ## Non-goals
//!
//! * This module does not resolve chains; see the resolver.

// External dependencies
use std::sync::Arc;

// Internal dependencies
use crate::engine::operation::Operation;

// ============================================================================
// Change Node
// ============================================================================

/// One node of a change chain.
pub struct ChangeNode<T> {
    generation: usize,
    base: Option<Vec<T>>,
    parent: Option<Arc<ChangeNode<T>>>,
    operation: Option<Operation<T>>,
}

impl<T> ChangeNode<T> {
    /// Root owning `base`, or a detached root when `base` is `None`.
    pub fn root(base: Option<Vec<T>>) -> Arc<Self> {
        Arc::new(Self {
            generation: 0,
            base,
            parent: None,
            operation: None,
        })
    }

    /// Node recording `operation` on top of `parent`.
    pub fn derive(parent: &Arc<Self>, operation: Operation<T>) -> Arc<Self> {
        Arc::new(Self {
            generation: parent.generation + 1,
            base: None,
            parent: Some(Arc::clone(parent)),
            operation: Some(operation),
        })
    }

    /// Depth from the root.
    #[inline]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Whether this node is a root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.generation == 0
    }

    /// Base array owned by a root.
    pub fn base(&self) -> Option<&[T]> {
        self.base.as_deref()
    }

    /// Parent node, absent only at the root.
    pub fn parent(&self) -> Option<&Arc<ChangeNode<T>>> {
        self.parent.as_ref()
    }

    /// Recorded operation, absent only at the root.
    pub fn operation(&self) -> Option<&Operation<T>> {
        self.operation.as_ref()
    }

    /// Every node from the root to `self`, root first.
    pub fn lineage(&self) -> Vec<&ChangeNode<T>> {
        let mut nodes = Vec::with_capacity(self.generation + 1);
        let mut current = Some(self);
        while let Some(node) = current {
            nodes.push(node);
            current = node.parent.as_deref();
        }
        nodes.reverse();
        nodes
    }

    /// The root this node descends from.
    pub fn root_node(&self) -> &ChangeNode<T> {
        let mut current = self;
        while let Some(parent) = current.parent.as_deref() {
            current = parent;
        }
        current
    }

    /// Operations from the root to `self`, root first.
    pub fn operations(&self) -> Vec<&Operation<T>> {
        self.lineage()
            .into_iter()
            .filter_map(ChangeNode::operation)
            .collect()
    }
}

impl<T> Drop for ChangeNode<T> {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(parent) = next {
            match Arc::try_unwrap(parent) {
                Ok(mut node) => next = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}
