//! Resolution of change chains into concrete arrays.
//!
//! ## Purpose
//!
//! This module walks a chain from its root, groups fusable operations into
//! steps, and runs each step through the configured [`Executor`].
//!
//! ## Design notes
//!
//! * **Pure**: Resolution never alters a node; the base array is cloned.
//! * **Pluggable**: The executor decides how each step runs (sequential or
//!   partitioned); the resolver only orders and fuses.
//! * **External arrays**: `apply_to` resolves the same operations starting
//!   from a caller-supplied array, ignoring the root's own base.
//!
//! ## Key concepts
//!
//! ### Resolution
//! 1. Generation 0: return a copy of the base array.
//! 2. Collect the operations from the root to the node.
//! 3. Group adjacent fusable operations into runs.
//! 4. Apply one step per run, in order.
//!
//! ## Invariants
//!
//! * Fused and unfused resolution produce identical arrays.
//!
//! ## Non-goals
//!
//! * This module does not cache materialized arrays.

// External dependencies
use std::sync::Arc;
use tracing::{debug, trace};

// Internal dependencies
use crate::engine::executor::{Executor, SequentialExecutor};
use crate::engine::fusion::plan;
use crate::engine::node::ChangeNode;
use crate::engine::operation::Operation;
use crate::math::element::Element;
use crate::primitives::errors::{ChangeError, ChangeResult};

// ============================================================================
// Resolver
// ============================================================================

/// Configured chain resolver.
#[derive(Clone)]
pub struct Resolver<T: Element> {
    fusion: bool,
    executor: Arc<dyn Executor<T>>,
}

impl<T: Element> Default for Resolver<T> {
    fn default() -> Self {
        Self::new(true, Arc::new(SequentialExecutor))
    }
}

impl<T: Element> Resolver<T> {
    /// Resolver with explicit settings.
    pub fn new(fusion: bool, executor: Arc<dyn Executor<T>>) -> Self {
        Self { fusion, executor }
    }

    /// Whether adjacent compatible operations are fused.
    pub fn fusion(&self) -> bool {
        self.fusion
    }

    /// Executor running the steps.
    pub fn executor(&self) -> &Arc<dyn Executor<T>> {
        &self.executor
    }

    /// Materialize `node` from its root's base array.
    pub fn materialize(&self, node: &ChangeNode<T>) -> ChangeResult<Vec<T>> {
        let base = node
            .root_node()
            .base()
            .ok_or(ChangeError::MissingBaseArray)?;

        if node.is_root() {
            return Ok(base.to_vec());
        }

        self.run(node.generation(), &node.operations(), base.to_vec())
    }

    /// Resolve the operations of `node` against an external array.
    pub fn apply_to(&self, node: &ChangeNode<T>, values: Vec<T>) -> ChangeResult<Vec<T>> {
        self.run(node.generation(), &node.operations(), values)
    }

    fn run(
        &self,
        generation: usize,
        operations: &[&Operation<T>],
        mut values: Vec<T>,
    ) -> ChangeResult<Vec<T>> {
        let steps = plan(operations, self.fusion);
        debug!(
            generation,
            operations = operations.len(),
            steps = steps.len(),
            executor = self.executor.name(),
            "resolving change chain"
        );

        for planned in &steps {
            let before = values.len();
            values = self.executor.execute(&planned.step, values)?;
            trace!(
                step = planned.step.name(),
                fused = planned.members,
                before,
                after = values.len(),
                "applied step"
            );
        }

        debug!(generation, len = values.len(), "resolved change chain");
        Ok(values)
    }
}
