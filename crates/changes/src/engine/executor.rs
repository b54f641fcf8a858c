//! Execution seam between the resolver and the operation kernels.
//!
//! ## Purpose
//!
//! This module defines the [`Executor`] trait, one method per operation
//! family, and the default [`SequentialExecutor`]. The resolver only talks to
//! this trait, so the parallel extension crate can supply partitioned kernels
//! without the core crate depending on a thread pool.
//!
//! ## Design notes
//!
//! * **Default methods**: Every family defaults to its sequential kernel; an
//!   executor overrides only the families it accelerates.
//! * **Ownership**: Kernels take the current array by value and return the
//!   next one, so steps that keep the length can work in place.
//! * **Fallible**: Every kernel returns `ChangeResult` so parallel executors
//!   can report worker failures.
//!
//! ## Invariants
//!
//! * Every executor produces exactly the sequential result for every step.
//!
//! ## Non-goals
//!
//! * This module does not group operations; see the fusion module.

// Internal dependencies
use crate::algorithms::add::add_values;
use crate::algorithms::remove::{remove_indices, remove_where, remove_with_plan, Occurrence, RemovePlan};
use crate::algorithms::replace::{
    replace_at, replace_first_or_last, replace_values, replace_where, Position, ReplaceAtPlan,
    Selection, ValueMap,
};
use crate::algorithms::retain::{retain_values, retain_where};
use crate::algorithms::transform::{apply as apply_transform, Transform};
use crate::engine::fusion::Step;
use crate::math::element::Element;
use crate::primitives::errors::ChangeResult;
use crate::primitives::functions::Predicate;
use crate::primitives::search::TargetSet;

// ============================================================================
// Executor Trait
// ============================================================================

/// Runs resolved steps over concrete arrays.
pub trait Executor<T: Element>: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str {
        "sequential"
    }

    /// Append values.
    fn add(&self, values: Vec<T>, extra: &[T]) -> ChangeResult<Vec<T>> {
        Ok(add_values(values, extra))
    }

    /// Value removal through a (possibly fused) plan.
    fn remove(&self, values: Vec<T>, plan: &RemovePlan<T>) -> ChangeResult<Vec<T>> {
        Ok(remove_with_plan(values, plan))
    }

    /// Index removal.
    fn remove_indices(&self, values: Vec<T>, indices: &[usize]) -> ChangeResult<Vec<T>> {
        remove_indices(values, indices)
    }

    /// Predicate removal.
    fn remove_where(&self, values: Vec<T>, predicate: &Predicate<T>) -> ChangeResult<Vec<T>> {
        Ok(remove_where(values, predicate))
    }

    /// Index writes through a (possibly fused) plan.
    fn replace_at(&self, values: Vec<T>, plan: &ReplaceAtPlan<T>) -> ChangeResult<Vec<T>> {
        replace_at(values, plan)
    }

    /// Value substitution.
    fn replace_values(&self, values: Vec<T>, map: &ValueMap<T>) -> ChangeResult<Vec<T>> {
        Ok(replace_values(values, map))
    }

    /// First or last value substitution.
    fn replace_first_or_last(
        &self,
        values: Vec<T>,
        map: &ValueMap<T>,
        which: Position,
    ) -> ChangeResult<Vec<T>> {
        Ok(replace_first_or_last(values, map, which))
    }

    /// Predicate replacement.
    fn replace_where(
        &self,
        values: Vec<T>,
        predicate: &Predicate<T>,
        replacement: &T,
        which: Selection,
    ) -> ChangeResult<Vec<T>> {
        Ok(replace_where(values, predicate, replacement, which))
    }

    /// Value retention.
    fn retain_values(
        &self,
        values: Vec<T>,
        targets: &TargetSet<T>,
        mode: Occurrence,
    ) -> ChangeResult<Vec<T>> {
        Ok(retain_values(values, targets, mode))
    }

    /// Predicate retention over a conjunction.
    fn retain_where(&self, values: Vec<T>, predicates: &[Predicate<T>]) -> ChangeResult<Vec<T>> {
        Ok(retain_where(values, predicates))
    }

    /// Whole-array transform.
    fn transform(&self, values: Vec<T>, transform: &Transform<T>) -> ChangeResult<Vec<T>> {
        Ok(apply_transform(values, transform))
    }

    /// Dispatch one step to its family kernel.
    fn execute(&self, step: &Step<T>, values: Vec<T>) -> ChangeResult<Vec<T>> {
        match step {
            Step::Add(extra) => self.add(values, extra),
            Step::Remove(plan) => self.remove(values, plan),
            Step::RemoveIndices(indices) => self.remove_indices(values, indices),
            Step::RemoveWhere(predicate) => self.remove_where(values, predicate),
            Step::ReplaceAt(plan) => self.replace_at(values, plan),
            Step::ReplaceValues(map) => self.replace_values(values, map),
            Step::ReplaceFirstOrLast(map, which) => self.replace_first_or_last(values, map, *which),
            Step::ReplaceWhere {
                predicate,
                value,
                which,
            } => self.replace_where(values, predicate, value, *which),
            Step::RetainValues(targets, mode) => self.retain_values(values, targets, *mode),
            Step::RetainWhere(predicates) => self.retain_where(values, predicates),
            Step::Transform(transform) => self.transform(values, transform),
        }
    }
}

// ============================================================================
// Sequential Executor
// ============================================================================

/// Runs every step with its single-threaded kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl<T: Element> Executor<T> for SequentialExecutor {}
