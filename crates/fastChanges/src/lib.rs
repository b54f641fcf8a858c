//! # Fast Changes (parallel execution for lazy array transformations)
//!
//! Partitioned, multi-threaded resolution of `changes` chains. Every step of
//! a chain runs over contiguous partitions of the array on a bounded `rayon`
//! pool and produces exactly the array the sequential resolver produces.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastChanges::prelude::*;
//!
//! let chain = Change::of((0..10_000).map(|i| i % 100).collect::<Vec<i64>>())
//!     .remove_all([0, 1, 2])
//!     .remove_first([50])
//!     .map(|v| v * 3)
//!     .unique();
//!
//! let resolver = ResolverBuilder::new()
//!     .adapter(Parallel)   // partitioned execution
//!     .threads(4)          // four partitions per step
//!     .build()?;
//!
//! assert_eq!(chain.materialize_with(&resolver)?, chain.materialize()?);
//! # Result::<(), ChangeError>::Ok(())
//! ```
//!
//! ### Dedicated Pools
//!
//! ```rust
//! use fastChanges::prelude::*;
//!
//! let resolver = ResolverBuilder::<i32>::new()
//!     .adapter(Parallel)
//!     .pool_size(2)        // built once, shared by every resolution
//!     .fusion(true)
//!     .build()?;
//!
//! let result = Change::of(vec![5, 3, 9, 1]).sorted().materialize_with(&resolver)?;
//! assert_eq!(result, vec![1, 3, 5, 9]);
//! # Result::<(), ChangeError>::Ok(())
//! ```
//!
//! ### ndarray Input
//!
//! ```rust
//! use fastChanges::prelude::*;
//! use ndarray::Array1;
//!
//! let data = Array1::from_vec(vec![4.0_f64, 1.0, 4.0, 2.0]);
//! let result = Change::<f64>::detached()
//!     .remove_first([4.0])
//!     .apply_to_input(&data)?;
//!
//! assert_eq!(result, vec![1.0, 4.0, 2.0]);
//! # Result::<(), ChangeError>::Ok(())
//! ```
//!
//! ## Worker Failures
//!
//! A panic inside a partition task (for example in a user predicate) is
//! captured and reported as `ChangeError::WorkerFailure` for the whole step;
//! no partial array is returned.

#![allow(non_snake_case)]

// Layer 3: Algorithms - partitioned kernels.
mod algorithms;

// Layer 5: Engine - worker pool and executor.
mod engine;

// High-level fluent API with parallel execution.
mod api;

// Input data handling.
mod input;

// Standard fastChanges prelude.
pub mod prelude {
    pub use crate::api::{
        Change, ChangeError, ChangeResult, Parallel, ParallelChangeExt, ParallelResolverBuilder,
        ResolverAdapter, ResolverBuilder, Sequential,
    };
    pub use crate::engine::executor::ParallelExecutor;
    pub use crate::engine::workers::WorkerPool;
    pub use crate::input::{from_input, ChangeInput};
    pub use changes::prelude::{
        global_registry, register_operator, Arithmetic, CharOperator, Element, Executor,
        FloatOperator, IntegerOperator, Occurrence, Operator, OperatorRegistry, Position,
        Resolver, Selection, SequentialExecutor, StringOperator,
    };
}

// Internal modules for development and testing.
#[doc(hidden)]
pub mod internals {
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
}
