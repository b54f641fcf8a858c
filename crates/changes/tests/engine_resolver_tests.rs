//! Tests for chain resolution and fusion.
//!
//! The resolver walks a chain from its root, groups adjacent fusable
//! operations into single steps and hands each step to an executor.
//!
//! ## Test Organization
//!
//! 1. **Fusion Planning** - Run grouping with fusion on and off
//! 2. **Fused Semantics** - Quotas, priority and most-recent-wins
//! 3. **Fused vs Unfused** - Property tests over random chains
//! 4. **Resolver Configuration** - Builder validation and custom executors

use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use changes::internals::algorithms::transform::Transform;
use changes::internals::engine::fusion::plan;
use changes::prelude::*;

// ============================================================================
// Fusion Planning Tests
// ============================================================================

/// Test that adjacent fusable operations collapse into single steps.
#[test]
fn test_plan_groups_adjacent_runs() {
    let chain = Change::of(vec![1, 2, 3])
        .remove_first([1])
        .remove_all([2])
        .replace_at([(0, 9)])
        .replace_at([(0, 8)])
        .retain_if(|v| *v > 0)
        .retain_if(|v| *v < 100)
        .sorted();

    let operations = chain.node().operations();
    let fused = plan(&operations, true);
    let unfused = plan(&operations, false);

    let members: Vec<usize> = fused.iter().map(|s| s.members).collect();
    assert_eq!(members, vec![2, 2, 2, 1]);

    let names: Vec<&str> = fused.iter().map(|s| s.step.name()).collect();
    assert_eq!(names, vec!["remove_values", "replace_at", "retain_if", "sort"]);

    assert_eq!(unfused.len(), 7);
    assert!(unfused.iter().all(|s| s.members == 1));
}

/// Test that fusion never crosses a solitary operation.
#[test]
fn test_plan_breaks_runs_at_solitary_operations() {
    let chain = Change::of(vec![1, 2, 3])
        .remove_all([1])
        .sorted()
        .remove_all([2])
        .remove_if(|v| *v > 5)
        .remove_first([3]);

    let operations = chain.node().operations();
    assert_eq!(plan(&operations, true).len(), 5);
}

/// Test that a root chain plans no steps.
#[test]
fn test_plan_empty_chain() {
    let chain = Change::of(vec![1]);
    assert!(plan(&chain.node().operations(), true).is_empty());
}

// ============================================================================
// Fused Semantics Tests
// ============================================================================

/// Test the fused removal of first and all targets.
#[test]
fn test_fused_first_and_all_removal() {
    let chain = Change::of(vec![1, 2, 2, 3, 3, 3])
        .remove_first([2, 3])
        .remove_all([1]);
    assert_eq!(chain.materialize().unwrap(), vec![2, 3, 3]);
}

/// Test that repeated first removals of one value each drop an instance.
#[test]
fn test_fused_first_removal_quota() {
    let chain = Change::of(vec![2, 1, 2, 2])
        .remove_first([2])
        .remove_first([2]);
    assert_eq!(chain.materialize().unwrap(), vec![1, 2]);
}

/// Test that a value named by both modes loses every instance.
#[test]
fn test_fused_all_takes_priority() {
    let before = Change::of(vec![4, 1, 4, 4]).remove_all([4]).remove_first([4]);
    let after = Change::of(vec![4, 1, 4, 4]).remove_first([4]).remove_all([4]);

    assert_eq!(before.materialize().unwrap(), vec![1]);
    assert_eq!(after.materialize().unwrap(), vec![1]);
}

/// Test that duplicate targets within one first-removal count once.
#[test]
fn test_first_removal_duplicate_targets() {
    let chain = Change::of(vec![5, 5, 5]).remove_first([5, 5]);
    assert_eq!(chain.materialize().unwrap(), vec![5, 5]);
}

/// Test that fused index writes report the earliest offending call.
#[test]
fn test_fused_replace_at_reports_first_offender() {
    let chain = Change::of(vec![0, 0])
        .replace_at([(0, 1)])
        .replace_at([(5, 1)])
        .replace_at([(9, 1)]);

    let expected = Err(ChangeError::IndexOutOfBounds { index: 5, len: 2 });
    let unfused = ResolverBuilder::new().fusion(false).build().unwrap();

    assert_eq!(chain.materialize(), expected);
    assert_eq!(chain.materialize_with(&unfused), expected);
}

// ============================================================================
// Fused vs Unfused Property Tests
// ============================================================================

#[derive(Clone, Debug)]
enum Op {
    RemoveFirst(Vec<i32>),
    RemoveAll(Vec<i32>),
    RemoveAt(Vec<usize>),
    ReplaceAt(Vec<(usize, i32)>),
    ReplaceAll(Vec<(i32, i32)>),
    ReplaceFirst(Vec<(i32, i32)>),
    ReplaceLast(Vec<(i32, i32)>),
    RetainFirst(Vec<i32>),
    RetainAll(Vec<i32>),
    RetainAbove(i32),
    RetainBelow(i32),
    Add(Vec<i32>),
    Sort,
    Unique,
    Double,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    let value = -4..8i32;
    prop_oneof![
        4 => prop::collection::vec(value.clone(), 0..4).prop_map(Op::RemoveFirst),
        4 => prop::collection::vec(value.clone(), 0..3).prop_map(Op::RemoveAll),
        1 => prop::collection::vec(0..12usize, 0..3).prop_map(Op::RemoveAt),
        3 => prop::collection::vec((0..12usize, value.clone()), 0..4).prop_map(Op::ReplaceAt),
        1 => prop::collection::vec((value.clone(), value.clone()), 0..3).prop_map(Op::ReplaceAll),
        1 => prop::collection::vec((value.clone(), value.clone()), 0..3).prop_map(Op::ReplaceFirst),
        1 => prop::collection::vec((value.clone(), value.clone()), 0..3).prop_map(Op::ReplaceLast),
        1 => prop::collection::vec(value.clone(), 0..4).prop_map(Op::RetainFirst),
        1 => prop::collection::vec(value.clone(), 0..6).prop_map(Op::RetainAll),
        2 => value.clone().prop_map(Op::RetainAbove),
        2 => value.clone().prop_map(Op::RetainBelow),
        1 => prop::collection::vec(value, 0..4).prop_map(Op::Add),
        1 => Just(Op::Sort),
        1 => Just(Op::Unique),
        1 => Just(Op::Double),
    ]
}

fn build_chain(base: Vec<i32>, ops: &[Op]) -> Change<i32> {
    ops.iter().fold(Change::of(base), |chain, op| match op.clone() {
        Op::RemoveFirst(t) => chain.remove_first(t),
        Op::RemoveAll(t) => chain.remove_all(t),
        Op::RemoveAt(i) => chain.remove_at(i),
        Op::ReplaceAt(p) => chain.replace_at(p),
        Op::ReplaceAll(p) => chain.replace_all(p),
        Op::ReplaceFirst(p) => chain.replace_first(p),
        Op::ReplaceLast(p) => chain.replace_last(p),
        Op::RetainFirst(t) => chain.retain_first(t),
        Op::RetainAll(t) => chain.retain_all(t),
        Op::RetainAbove(n) => chain.retain_if(move |v| *v > n),
        Op::RetainBelow(n) => chain.retain_if(move |v| *v < n),
        Op::Add(v) => chain.add_all(v),
        Op::Sort => chain.sorted(),
        Op::Unique => chain.unique(),
        Op::Double => chain.map(|v| v.saturating_mul(2)),
    })
}

/// Apply every operation as its own resolution, one generation at a time.
fn apply_stepwise(base: Vec<i32>, ops: &[Op]) -> ChangeResult<Vec<i32>> {
    let mut values = base;
    for op in ops {
        values = build_chain(values, std::slice::from_ref(op)).materialize()?;
    }
    Ok(values)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Fused resolution equals unfused resolution for any chain.
    #[test]
    fn fused_matches_unfused(
        base in prop::collection::vec(-4..8i32, 0..16),
        ops in prop::collection::vec(arbitrary_op(), 0..10),
    ) {
        let chain = build_chain(base, &ops);
        let unfused = ResolverBuilder::new().fusion(false).build().unwrap();

        prop_assert_eq!(chain.materialize(), chain.materialize_with(&unfused));
    }

    /// Resolving a chain equals applying its operations one at a time.
    #[test]
    fn resolution_matches_stepwise_application(
        base in prop::collection::vec(-4..8i32, 0..16),
        ops in prop::collection::vec(arbitrary_op(), 0..10),
    ) {
        let chain = build_chain(base.clone(), &ops);
        prop_assert_eq!(chain.materialize(), apply_stepwise(base, &ops));
    }

    /// Dedup is idempotent.
    #[test]
    fn unique_is_idempotent(base in prop::collection::vec(-4..8i32, 0..32)) {
        let once = Change::of(base).unique();
        let twice = once.unique();
        prop_assert_eq!(once.materialize(), twice.materialize());
    }
}

// ============================================================================
// Resolver Configuration Tests
// ============================================================================

/// Test duplicate builder parameters.
#[test]
fn test_builder_rejects_duplicates() {
    let err = ResolverBuilder::<i32>::new()
        .fusion(true)
        .fusion(false)
        .build()
        .err();
    assert_eq!(
        err,
        Some(ChangeError::DuplicateParameter {
            parameter: "fusion"
        })
    );
}

/// Test the default resolver settings.
#[test]
fn test_builder_defaults() {
    let resolver = ResolverBuilder::<i32>::new().adapter(Sequential).build().unwrap();
    assert!(resolver.fusion());
    assert_eq!(resolver.executor().name(), "sequential");
}

/// Executor that counts the transforms it runs.
struct CountingExecutor {
    transforms: AtomicUsize,
}

impl Executor<i32> for CountingExecutor {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn transform(&self, values: Vec<i32>, transform: &Transform<i32>) -> ChangeResult<Vec<i32>> {
        self.transforms.fetch_add(1, Ordering::SeqCst);
        SequentialExecutor.transform(values, transform)
    }
}

/// Test that a custom executor receives the resolved steps.
#[test]
fn test_custom_executor() {
    let executor = Arc::new(CountingExecutor {
        transforms: AtomicUsize::new(0),
    });
    let resolver = ResolverBuilder::<i32>::new()
        .executor(executor.clone())
        .build()
        .unwrap();

    let chain = Change::of(vec![3, 1, 2]).sorted().remove_all([1]).map(|v| v + 1);
    assert_eq!(chain.materialize_with(&resolver).unwrap(), vec![3, 4]);
    assert_eq!(executor.transforms.load(Ordering::SeqCst), 2);
    assert_eq!(resolver.executor().name(), "counting");
}
