//! Grouping of adjacent operations into fused execution steps.
//!
//! ## Purpose
//!
//! This module turns the ordered operations of a chain into executable
//! [`Step`]s. Adjacent operations of the same fusable family are grouped
//! greedily into runs, and each run becomes one step whose algorithm handles
//! all members in a single pass.
//!
//! ## Design notes
//!
//! * **Greedy runs**: A run grows while the next operation fuses with the
//!   current one; fusability never crosses families.
//! * **Plans**: Runs of value removals become one [`RemovePlan`], runs of
//!   replace-at become one [`ReplaceAtPlan`], and runs of predicate retention
//!   become one conjunction.
//! * **Unfused mode**: With fusion disabled every operation becomes its own
//!   step; results are identical either way.
//!
//! ## Invariants
//!
//! * Steps appear in chain order.
//! * The members of a run are contiguous in the chain.

// External dependencies
use std::sync::Arc;

// Internal dependencies
use crate::algorithms::remove::{Occurrence, RemovePlan};
use crate::algorithms::replace::{Position, ReplaceAtPlan, Selection, ValueMap};
use crate::algorithms::transform::Transform;
use crate::engine::operation::Operation;
use crate::math::element::{element_cmp, Element};
use crate::primitives::functions::Predicate;
use crate::primitives::search::TargetSet;

// ============================================================================
// Step
// ============================================================================

/// Executable form of one operation or one fused run.
pub enum Step<T> {
    /// Append values.
    Add(Vec<T>),
    /// Value removal, possibly fused.
    Remove(RemovePlan<T>),
    /// Index removal.
    RemoveIndices(Vec<usize>),
    /// Predicate removal.
    RemoveWhere(Predicate<T>),
    /// Index writes, possibly fused.
    ReplaceAt(ReplaceAtPlan<T>),
    /// Value substitution.
    ReplaceValues(ValueMap<T>),
    /// First or last value substitution.
    ReplaceFirstOrLast(ValueMap<T>, Position),
    /// Predicate replacement.
    ReplaceWhere {
        /// Element test.
        predicate: Predicate<T>,
        /// Replacement value.
        value: T,
        /// Matches addressed.
        which: Selection,
    },
    /// Value retention.
    RetainValues(TargetSet<T>, Occurrence),
    /// Predicate retention, possibly fused.
    RetainWhere(Vec<Predicate<T>>),
    /// Whole-array transform.
    Transform(Transform<T>),
}

impl<T> Step<T> {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Step::Add(_) => "add",
            Step::Remove(_) => "remove_values",
            Step::RemoveIndices(_) => "remove_at",
            Step::RemoveWhere(_) => "remove_if",
            Step::ReplaceAt(_) => "replace_at",
            Step::ReplaceValues(_) => "replace_all",
            Step::ReplaceFirstOrLast(_, Position::First) => "replace_first",
            Step::ReplaceFirstOrLast(_, Position::Last) => "replace_last",
            Step::ReplaceWhere { .. } => "replace_if",
            Step::RetainValues(..) => "retain_values",
            Step::RetainWhere(_) => "retain_if",
            Step::Transform(transform) => transform.name(),
        }
    }
}

/// A step together with the number of operations it covers.
pub struct PlannedStep<T> {
    /// Executable step.
    pub step: Step<T>,
    /// Operations fused into the step.
    pub members: usize,
}

// ============================================================================
// Planning
// ============================================================================

/// Group `operations` into runs and build one step per run.
pub fn plan<T: Element>(operations: &[&Operation<T>], fuse: bool) -> Vec<PlannedStep<T>> {
    let mut steps = Vec::new();
    let mut start = 0;

    while start < operations.len() {
        let mut end = start + 1;
        if fuse {
            while end < operations.len() && operations[end - 1].fuses_with(operations[end]) {
                end += 1;
            }
        }

        let run = &operations[start..end];
        steps.push(PlannedStep {
            step: build_step(run),
            members: run.len(),
        });
        start = end;
    }

    steps
}

/// Build the step for a run of mutually fusable operations.
fn build_step<T: Element>(run: &[&Operation<T>]) -> Step<T> {
    match run[0] {
        Operation::RemoveValues { .. } => Step::Remove(RemovePlan::from_members(
            run.iter().filter_map(|op| match op {
                Operation::RemoveValues { targets, mode } => Some((targets.as_slice(), *mode)),
                _ => None,
            }),
        )),
        Operation::ReplaceAtIndices(_) => Step::ReplaceAt(ReplaceAtPlan::from_members(
            run.iter().filter_map(|op| match op {
                Operation::ReplaceAtIndices(pairs) => Some(pairs.as_slice()),
                _ => None,
            }),
        )),
        Operation::RetainWhere(_) => Step::RetainWhere(
            run.iter()
                .filter_map(|op| match op {
                    Operation::RetainWhere(predicate) => Some(Arc::clone(predicate)),
                    _ => None,
                })
                .collect(),
        ),
        Operation::AddValues(values) => Step::Add(values.clone()),
        Operation::RemoveIndices(indices) => Step::RemoveIndices(indices.clone()),
        Operation::RemoveWhere(predicate) => Step::RemoveWhere(Arc::clone(predicate)),
        Operation::ReplaceValues(pairs) => Step::ReplaceValues(ValueMap::new(pairs)),
        Operation::ReplaceFirstOrLast { pairs, which } => {
            Step::ReplaceFirstOrLast(ValueMap::new(pairs), *which)
        }
        Operation::ReplaceWhere {
            predicate,
            value,
            which,
        } => Step::ReplaceWhere {
            predicate: Arc::clone(predicate),
            value: value.clone(),
            which: *which,
        },
        Operation::RetainValues { targets, mode } => {
            Step::RetainValues(TargetSet::new(targets, element_cmp::<T>), *mode)
        }
        Operation::Transform(transform) => Step::Transform(transform.clone()),
    }
}
