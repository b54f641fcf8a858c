//! # changes — lazy, composable array transformations for Rust
//!
//! Build a chain of deferred edits (add, remove, replace, retain, sort,
//! dedup, map) over a typed array; nothing is computed until the chain is
//! materialized. Resolution walks the chain from its root, fuses compatible
//! adjacent operations into single passes, and runs every step through a
//! pluggable executor.
//!
//! ## Quick Start
//!
//! ```rust
//! use changes::prelude::*;
//!
//! let result = Change::of(vec![1, 9, 7, 0, 9, 9, 3, 1, 0])
//!     .replace_at([(0, 12), (5, 42), (7, -12)]) // index writes
//!     .map(|v| v * 2)                           // elementwise
//!     .retain_if(|v| *v > 0)                    // filter
//!     .unique()                                 // first occurrences
//!     .sorted()                                 // stable sort
//!     .materialize()?;
//!
//! assert_eq!(result, vec![6, 14, 18, 24, 84]);
//! # Result::<(), ChangeError>::Ok(())
//! ```
//!
//! ## Persistent History
//!
//! Every mutation call returns a new handle one generation deeper; earlier
//! handles are never modified and share their common prefix:
//!
//! ```rust
//! use changes::prelude::*;
//!
//! let base = Change::of(vec![3, 1, 2]);
//! let sorted = base.sorted();
//! let doubled = base.map(|v| v * 2);
//!
//! assert_eq!(base.materialize()?, vec![3, 1, 2]);
//! assert_eq!(sorted.materialize()?, vec![1, 2, 3]);
//! assert_eq!(doubled.materialize()?, vec![6, 2, 4]);
//! assert_eq!(doubled.generation(), 1);
//! # Result::<(), ChangeError>::Ok(())
//! ```
//!
//! ## Fusion
//!
//! Adjacent value removals (all and first) run as one pass, adjacent index
//! writes run as one pass with the most recent write winning, and adjacent
//! predicate retentions run as one conjunction. Other operations observe the
//! output of the previous step and always run on their own.
//!
//! ```rust
//! use changes::prelude::*;
//!
//! let chain = Change::of(vec![1, 2, 2, 3, 3, 3])
//!     .remove_first([2, 3])
//!     .remove_all([1]);
//!
//! let unfused = ResolverBuilder::new().fusion(false).build()?;
//! assert_eq!(chain.materialize()?, chain.materialize_with(&unfused)?);
//! assert_eq!(chain.materialize()?, vec![2, 3, 3]);
//! # Result::<(), ChangeError>::Ok(())
//! ```
//!
//! ## Reductions
//!
//! `sum`, `difference`, `product` and `quotient` fold the materialized array
//! through an operator table: the element type's built-in capability first,
//! then a table registered with [`register_operator`](prelude::register_operator).
//!
//! ```rust
//! use changes::prelude::*;
//!
//! let chain = Change::of(vec![1.5_f64, 2.5, 4.0]);
//! assert_eq!(chain.sum()?, Some(8.0));
//! assert_eq!(Change::<i32>::empty().product()?, None);
//! # Result::<(), ChangeError>::Ok(())
//! ```
//!
//! ## Parallel Execution
//!
//! The `fastChanges` crate provides a partitioned executor on a bounded
//! `rayon` pool that produces exactly the sequential result.

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - element bound and arithmetic dispatch.
mod math;

// Layer 3: Algorithms - sequential operation kernels.
mod algorithms;

// Layer 4: Evaluation - queries and reductions.
mod evaluation;

// Layer 5: Engine - chain model, fusion and resolution.
mod engine;

// High-level fluent API.
mod api;

// Standard prelude.
pub mod prelude {
    pub use crate::algorithms::remove::Occurrence;
    pub use crate::algorithms::replace::{Position, Selection};
    pub use crate::api::{
        global_registry, register_operator, Change, ChangeError, CharOperator, FloatOperator,
        IntegerOperator, OperatorRegistry, ResolverAdapter, ResolverBuilder, Sequential,
        StringOperator,
    };
    pub use crate::engine::executor::{Executor, SequentialExecutor};
    pub use crate::engine::resolver::Resolver;
    pub use crate::math::element::Element;
    pub use crate::math::operator::{Arithmetic, Operator};
    pub use crate::primitives::errors::ChangeResult;
}

// Internal modules for extension crates and testing.
//
// This module re-exports every layer so the parallel extension crate can
// implement executors over the same plans and kernels.
#[doc(hidden)]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
