//! Tests for partitioned resolution.
//!
//! Every parallel kernel must produce exactly the array the sequential
//! resolver produces, for any partition count, and must turn a panicking
//! partition into a `WorkerFailure`.
//!
//! ## Test Organization
//!
//! 1. **Equivalence** - Parallel vs sequential on fixed and random chains
//! 2. **Boundaries** - Targets and duplicates straddling partitions
//! 3. **Worker Failures** - Panics in user closures, on any partition count
//! 4. **Configuration** - Builder validation and dedicated pools
//! 5. **Inputs** - Slices, vectors and ndarray

use approx::assert_relative_eq;
use ndarray::{s, Array1};
use proptest::prelude::*;

use fastChanges::internals::algorithms::filter::remove_values_parallel;
use fastChanges::internals::engine::workers::WorkerPool;
use changes::internals::algorithms::remove::{remove_with_plan, Occurrence, RemovePlan};
use fastChanges::prelude::*;

fn parallel(threads: usize) -> Resolver<i32> {
    ResolverBuilder::new()
        .adapter(Parallel)
        .threads(threads)
        .build()
        .unwrap()
}

// ============================================================================
// Equivalence Tests
// ============================================================================

/// Test the canonical mixed chain on every small partition count.
#[test]
fn test_mixed_chain_all_thread_counts() {
    let chain = Change::of(vec![1, 9, 7, 0, 9, 9, 3, 1, 0])
        .replace_at([(0, 12), (5, 42), (7, -12)])
        .map(|v| v * 2)
        .retain_if(|v| *v > 0)
        .unique()
        .sorted();

    for threads in 1..=12 {
        assert_eq!(
            chain.materialize_with(&parallel(threads)).unwrap(),
            vec![6, 14, 18, 24, 84],
            "threads = {threads}"
        );
    }
}

/// Test every operation family against the sequential resolver.
#[test]
fn test_every_family_matches_sequential() {
    let base: Vec<i32> = (0..1_000).map(|i| (i * 37 + 11) % 97).collect();
    let chain = Change::of(base)
        .remove_first([5, 6, 5])
        .remove_all([7])
        .remove_first([5])
        .remove_at([0, 999 - 40, 3])
        .remove_if(|v| *v == 13)
        .replace_at([(10, -1), (500, -2)])
        .replace_at([(10, -3)])
        .replace_all([(1, 100), (2, 200)])
        .replace_first([(3, 300), (4, 400)])
        .replace_last([(8, 800), (9, 900)])
        .replace_first_if(|v| *v > 90, -90)
        .replace_last_if(|v| *v > 90, -91)
        .replace_all_if(|v| *v == 50, -50)
        .retain_all((0..96).chain([100, 200, 300, 400, 800, 900, -1, -2, -3, -50, -90, -91]))
        .retain_if(|v| *v != 20)
        .add_all([1, 2, 3])
        .map(|v| v * 2)
        .unique()
        .sorted_by(|a, b| b.cmp(a));

    let expected = chain.materialize().unwrap();
    for threads in [1, 2, 3, 4, 7, 8, 16, 64] {
        assert_eq!(
            chain.materialize_with(&parallel(threads)).unwrap(),
            expected,
            "threads = {threads}"
        );
    }
}

/// Test retaining first instances across partitions.
#[test]
fn test_retain_first_across_partitions() {
    let base: Vec<i32> = (0..100).map(|i| i % 10).collect();
    let chain = Change::of(base).retain_first([9, 0, 5]);

    assert_eq!(chain.materialize().unwrap(), vec![0, 5, 9]);
    assert_eq!(chain.materialize_with(&parallel(7)).unwrap(), vec![0, 5, 9]);
}

/// Test a large value removal on several pools.
#[test]
fn test_large_remove_all() {
    let base: Vec<i64> = (0..200_000).map(|i| i % 1_000).collect();
    let targets: Vec<i64> = (0..1_000).filter(|v| v % 7 == 0).collect();
    let chain = Change::of(base).remove_all(targets.clone());

    let sequential = chain.materialize().unwrap();
    let resolver = ResolverBuilder::<i64>::new()
        .adapter(Parallel)
        .threads(8)
        .build()
        .unwrap();

    assert_eq!(chain.materialize_with(&resolver).unwrap(), sequential);
    assert_eq!(sequential.len(), 200_000 - 200 * targets.len());
}

/// Test removal and retention with large target sets across partitions.
#[test]
fn test_many_targets_across_partitions() {
    let chain = Change::of((0..200).chain(0..200).collect::<Vec<i32>>());
    let cases = [
        chain.remove_all(0..100),
        chain.remove_first(0..100),
        chain.retain_all(0..100),
        chain.retain_first(0..100),
        chain.remove_first(0..64).remove_all(64..128),
    ];

    for threads in [2, 3, 8] {
        for case in &cases {
            assert_eq!(
                case.materialize_with(&parallel(threads)).unwrap(),
                case.materialize().unwrap()
            );
        }
    }
    assert_eq!(
        cases[0].materialize_with(&parallel(4)).unwrap(),
        (100..200).chain(100..200).collect::<Vec<i32>>()
    );
}

/// Test float chains and reductions over the parallel result.
#[test]
fn test_float_chain() {
    let base: Vec<f64> = (0..1_000).map(|i| (i % 13) as f64 * 0.5).collect();
    let chain = Change::of(base).remove_all([0.0]).unique().sorted();

    let values = chain.materialize_with_threads(4).unwrap();
    assert_eq!(values, chain.materialize().unwrap());

    let total: f64 = values.iter().sum();
    assert_relative_eq!(total, (1..13).map(|i| i as f64 * 0.5).sum::<f64>());
}

#[derive(Clone, Debug)]
enum Op {
    RemoveFirst(Vec<i16>),
    RemoveAll(Vec<i16>),
    RemoveAt(Vec<usize>),
    ReplaceAt(Vec<(usize, i16)>),
    ReplaceAll(Vec<(i16, i16)>),
    ReplaceFirst(Vec<(i16, i16)>),
    ReplaceLast(Vec<(i16, i16)>),
    ReplaceFirstIf(i16),
    ReplaceLastIf(i16),
    RetainFirst(Vec<i16>),
    RetainAll(Vec<i16>),
    RetainAbove(i16),
    Sort,
    Unique,
    Negate,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    let value = -3..6i16;
    prop_oneof![
        3 => prop::collection::vec(value.clone(), 0..4).prop_map(Op::RemoveFirst),
        2 => prop::collection::vec(value.clone(), 0..3).prop_map(Op::RemoveAll),
        1 => prop::collection::vec(0..20usize, 0..3).prop_map(Op::RemoveAt),
        2 => prop::collection::vec((0..20usize, value.clone()), 0..4).prop_map(Op::ReplaceAt),
        1 => prop::collection::vec((value.clone(), value.clone()), 0..3).prop_map(Op::ReplaceAll),
        2 => prop::collection::vec((value.clone(), value.clone()), 0..3).prop_map(Op::ReplaceFirst),
        2 => prop::collection::vec((value.clone(), value.clone()), 0..3).prop_map(Op::ReplaceLast),
        1 => value.clone().prop_map(Op::ReplaceFirstIf),
        1 => value.clone().prop_map(Op::ReplaceLastIf),
        2 => prop::collection::vec(value.clone(), 0..4).prop_map(Op::RetainFirst),
        1 => prop::collection::vec(value.clone(), 0..6).prop_map(Op::RetainAll),
        1 => value.prop_map(Op::RetainAbove),
        1 => Just(Op::Sort),
        2 => Just(Op::Unique),
        1 => Just(Op::Negate),
    ]
}

fn build_chain(base: Vec<i16>, ops: &[Op]) -> Change<i16> {
    ops.iter().fold(Change::of(base), |chain, op| match op.clone() {
        Op::RemoveFirst(t) => chain.remove_first(t),
        Op::RemoveAll(t) => chain.remove_all(t),
        Op::RemoveAt(i) => chain.remove_at(i),
        Op::ReplaceAt(p) => chain.replace_at(p),
        Op::ReplaceAll(p) => chain.replace_all(p),
        Op::ReplaceFirst(p) => chain.replace_first(p),
        Op::ReplaceLast(p) => chain.replace_last(p),
        Op::ReplaceFirstIf(n) => chain.replace_first_if(move |v| *v > n, n),
        Op::ReplaceLastIf(n) => chain.replace_last_if(move |v| *v < n, n),
        Op::RetainFirst(t) => chain.retain_first(t),
        Op::RetainAll(t) => chain.retain_all(t),
        Op::RetainAbove(n) => chain.retain_if(move |v| *v > n),
        Op::Sort => chain.sorted(),
        Op::Unique => chain.unique(),
        Op::Negate => chain.map(|v| v.saturating_neg()),
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Parallel resolution equals sequential resolution for any partition count.
    #[test]
    fn parallel_matches_sequential(
        base in prop::collection::vec(-3..6i16, 0..40),
        ops in prop::collection::vec(arbitrary_op(), 0..8),
        threads in 1..10usize,
    ) {
        let chain = build_chain(base, &ops);
        let resolver = ResolverBuilder::<i16>::new()
            .adapter(Parallel)
            .threads(threads)
            .build()
            .unwrap();

        prop_assert_eq!(chain.materialize_with(&resolver), chain.materialize());
    }

    /// The partitioned removal kernel equals the one-pass kernel.
    #[test]
    fn remove_kernel_matches_one_pass(
        values in prop::collection::vec(0..5u8, 0..80),
        firsts in prop::collection::vec(0..5u8, 0..4),
        alls in prop::collection::vec(0..5u8, 0..2),
        threads in 1..12usize,
    ) {
        let plan = RemovePlan::from_members([
            (firsts.as_slice(), Occurrence::First),
            (firsts.as_slice(), Occurrence::First),
            (alls.as_slice(), Occurrence::All),
        ]);
        let workers = WorkerPool::global(threads).unwrap();

        prop_assert_eq!(
            remove_values_parallel(&workers, values.clone(), &plan).unwrap(),
            remove_with_plan(values, &plan)
        );
    }
}

// ============================================================================
// Boundary Tests
// ============================================================================

/// Test dedup when runs of equal values straddle partition boundaries.
#[test]
fn test_dedup_across_boundaries() {
    let base = vec![1, 1, 1, 2, 2, 2, 1, 3, 3, 3, 2, 1];
    let chain = Change::of(base).unique();

    for threads in 1..=12 {
        assert_eq!(
            chain.materialize_with(&parallel(threads)).unwrap(),
            vec![1, 2, 3],
            "threads = {threads}"
        );
    }
}

/// Test first/last replacement picks the global extreme, not a local one.
#[test]
fn test_first_last_global_selection() {
    let base = vec![0, 0, 0, 5, 0, 0, 5, 0, 0, 5, 0, 0];
    let first = Change::of(base.clone()).replace_first([(5, 9)]);
    let last = Change::of(base).replace_last([(5, 9)]);

    for threads in 1..=12 {
        let resolver = parallel(threads);
        assert_eq!(
            first.materialize_with(&resolver).unwrap(),
            vec![0, 0, 0, 9, 0, 0, 5, 0, 0, 5, 0, 0]
        );
        assert_eq!(
            last.materialize_with(&resolver).unwrap(),
            vec![0, 0, 0, 5, 0, 0, 5, 0, 0, 9, 0, 0]
        );
    }
}

/// Test that out-of-bounds errors match the sequential resolver.
#[test]
fn test_parallel_bounds_errors() {
    let chain = Change::of(vec![1, 2, 3, 4, 5, 6]).replace_at([(6, 0)]);
    assert_eq!(
        chain.materialize_with(&parallel(3)),
        Err(ChangeError::IndexOutOfBounds { index: 6, len: 6 })
    );

    let chain = Change::of(vec![1, 2, 3, 4, 5, 6]).remove_at([8]);
    assert_eq!(chain.materialize_with(&parallel(3)), chain.materialize());
}

/// Test empty and tiny arrays on wide pools.
#[test]
fn test_small_arrays() {
    let empty = Change::<i32>::empty().remove_all([1]).unique().sorted();
    assert_eq!(empty.materialize_with(&parallel(8)).unwrap(), Vec::<i32>::new());

    let one = Change::of(vec![4]).map(|v| v + 1);
    assert_eq!(one.materialize_with(&parallel(8)).unwrap(), vec![5]);
}

// ============================================================================
// Worker Failure Tests
// ============================================================================

/// Test that a panicking predicate fails the step with a worker failure.
#[test]
fn test_panicking_predicate() {
    let chain = Change::of((0..1_000).collect::<Vec<i32>>()).remove_if(|v| {
        if *v == 777 {
            panic!("bad element {v}");
        }
        false
    });

    match chain.materialize_with(&parallel(4)) {
        Err(ChangeError::WorkerFailure { partition, message }) => {
            assert_eq!(partition, 3);
            assert!(message.contains("bad element 777"));
        }
        other => panic!("expected a worker failure, got {other:?}"),
    }
}

/// Test that a panicking mapper fails the step with a worker failure.
#[test]
fn test_panicking_mapper() {
    let chain = Change::of((0..64).collect::<Vec<i32>>()).map(|v| {
        assert!(*v != 5, "mapper rejected");
        *v
    });

    let result = chain.materialize_with(&parallel(4));
    assert!(matches!(
        result,
        Err(ChangeError::WorkerFailure { partition: 0, .. })
    ));
}

/// Test that a panicking comparator fails the sort step.
#[test]
fn test_panicking_comparator() {
    let chain = Change::of((0..256).rev().collect::<Vec<i32>>())
        .sorted_by(|_: &i32, _: &i32| panic!("comparator"));

    assert!(matches!(
        chain.materialize_with(&parallel(4)),
        Err(ChangeError::WorkerFailure { .. })
    ));
}

/// Test that a single-partition step reports a panic the same way.
#[test]
fn test_panic_in_single_partition() {
    let failing = |v: &i32| -> bool {
        assert!(*v != 7, "bad element");
        true
    };

    let one_thread = Change::of((0..100).collect::<Vec<i32>>()).retain_if(failing);
    assert!(matches!(
        one_thread.materialize_with(&parallel(1)),
        Err(ChangeError::WorkerFailure { partition: 0, .. })
    ));

    let one_element = Change::of(vec![7]).remove_if(failing);
    assert!(matches!(
        one_element.materialize_with(&parallel(4)),
        Err(ChangeError::WorkerFailure { partition: 0, .. })
    ));
}

/// Test that a panic in a sequential-only transform is reported as well.
#[test]
fn test_panicking_custom_transform() {
    let chain = Change::of((0..256).collect::<Vec<i32>>())
        .transform(|values: Vec<i32>| -> Vec<i32> { panic!("custom rejected {}", values.len()) });

    match chain.materialize_with(&parallel(4)) {
        Err(ChangeError::WorkerFailure { message, .. }) => {
            assert!(message.contains("custom rejected 256"));
        }
        other => panic!("expected a worker failure, got {other:?}"),
    }
}

// ============================================================================
// Configuration Tests
// ============================================================================

/// Test thread-count validation.
#[test]
fn test_invalid_thread_counts() {
    let zero = ResolverBuilder::<i32>::new().adapter(Parallel).threads(0).build();
    assert_eq!(zero.err(), Some(ChangeError::InvalidThreadCount(0)));

    let huge = ResolverBuilder::<i32>::new()
        .adapter(Parallel)
        .threads(100_000)
        .build();
    assert_eq!(huge.err(), Some(ChangeError::InvalidThreadCount(100_000)));

    let pool = ResolverBuilder::<i32>::new().adapter(Parallel).pool_size(0).build();
    assert_eq!(pool.err(), Some(ChangeError::InvalidThreadCount(0)));
}

/// Test duplicate parameters on the parallel builder.
#[test]
fn test_duplicate_parameters() {
    let err = ResolverBuilder::<i32>::new()
        .adapter(Parallel)
        .threads(2)
        .threads(4)
        .build()
        .err();
    assert_eq!(
        err,
        Some(ChangeError::DuplicateParameter {
            parameter: "threads"
        })
    );

    let err = ResolverBuilder::<i32>::new()
        .fusion(true)
        .adapter(Parallel)
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

/// Test executor selection by the parallel flag.
#[test]
fn test_parallel_flag() {
    let on = ResolverBuilder::<i32>::new().adapter(Parallel).build().unwrap();
    assert_eq!(on.executor().name(), "parallel");

    let off = ResolverBuilder::<i32>::new()
        .adapter(Parallel)
        .parallel(false)
        .build()
        .unwrap();
    assert_eq!(off.executor().name(), "sequential");
}

/// Test that a custom base executor cannot be combined with partitioned execution.
#[test]
fn test_custom_executor_rejected() {
    let rejected = ResolverBuilder::<i32>::new()
        .executor(std::sync::Arc::new(SequentialExecutor))
        .adapter(Parallel)
        .build()
        .err();
    assert_eq!(
        rejected,
        Some(ChangeError::UnsupportedFeature {
            adapter: "Parallel",
            feature: "a custom executor",
        })
    );

    let sequential = ResolverBuilder::<i32>::new()
        .executor(std::sync::Arc::new(SequentialExecutor))
        .adapter(Parallel)
        .parallel(false)
        .build()
        .unwrap();
    assert_eq!(sequential.executor().name(), "sequential");
}

/// Test a dedicated pool shared by repeated resolutions.
#[test]
fn test_dedicated_pool() {
    let resolver = ParallelResolverBuilder::<i32>::new()
        .pool_size(3)
        .threads(6)
        .fusion(false)
        .build()
        .unwrap();
    assert!(!resolver.fusion());

    let chain = Change::of((0..500).rev().collect::<Vec<i32>>())
        .remove_first([10, 20])
        .sorted();
    let expected = chain.materialize().unwrap();

    for _ in 0..5 {
        assert_eq!(chain.materialize_with(&resolver).unwrap(), expected);
    }
}

/// Test the worker pool constructors.
#[test]
fn test_worker_pool_constructors() {
    assert_eq!(WorkerPool::global(4).unwrap().threads(), 4);
    assert_eq!(WorkerPool::dedicated(2, 5).unwrap().threads(), 5);
    assert!(WorkerPool::global(0).is_err());
    assert_eq!(WorkerPool::global(3).unwrap().plan(7), vec![0..2, 2..4, 4..7]);
}

// ============================================================================
// Input Tests
// ============================================================================

/// Test chains over ndarray, vector and slice inputs.
#[test]
fn test_inputs() {
    let array = Array1::from_vec(vec![3, 1, 3, 2]);
    let chain = from_input(&array).unwrap().unique();
    assert_eq!(chain.materialize_parallel().unwrap(), vec![3, 1, 2]);

    let vector = vec![5, 4];
    assert_eq!(from_input(&vector).unwrap().sorted().materialize().unwrap(), vec![4, 5]);

    let slice: &[i32] = &[9, 8];
    assert_eq!(from_input(slice).unwrap().materialize().unwrap(), vec![9, 8]);
}

/// Test applying a detached chain to inputs.
#[test]
fn test_apply_to_input() {
    let chain = Change::<i32>::detached().remove_all([0]).map(|v| v * 10);

    let array = Array1::from_vec(vec![0, 1, 0, 2]);
    assert_eq!(chain.apply_to_input(&array).unwrap(), vec![10, 20]);
    assert_eq!(chain.apply_to_input(&vec![3]).unwrap(), vec![30]);
}

/// Test that non-contiguous ndarray views are rejected.
#[test]
fn test_non_contiguous_input() {
    let array = Array1::from_vec((0..10).collect::<Vec<i32>>());
    let strided = array.slice(s![..;2]);

    assert!(matches!(
        from_input(&strided),
        Err(ChangeError::InvalidInput(_))
    ));
}
