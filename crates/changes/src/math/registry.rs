//! Type-keyed registry of fallback operator tables.
//!
//! ## Purpose
//!
//! This module stores operator tables for element types that carry no
//! built-in arithmetic capability. Reductions consult the global registry
//! when [`Element::native_operator`](crate::math::element::Element::native_operator)
//! returns `None`.
//!
//! ## Design notes
//!
//! * **Type-keyed**: Tables are stored under the element's `TypeId`, boxed as
//!   `Any` and recovered by downcasting to `Arc<dyn Operator<T>>`.
//! * **Global**: A process-wide registry is lazily created and seeded with the
//!   digit-character table; local registries can be built for isolation.
//! * **Poison-tolerant**: A poisoned lock is recovered, since entries are
//!   replaced atomically and never left half-written.
//!
//! ## Invariants
//!
//! * The entry for `TypeId::of::<T>()` is always an `Arc<dyn Operator<T>>`.
//!
//! ## Non-goals
//!
//! * This module does not decide lookup order; see the dispatch module.

// External dependencies
use core::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

// Internal dependencies
use crate::math::operator::{CharOperator, Operator};

type Entry = Box<dyn Any + Send + Sync>;

// ============================================================================
// Registry
// ============================================================================

/// Map from element type to its operator table.
#[derive(Default)]
pub struct OperatorRegistry {
    tables: RwLock<HashMap<TypeId, Entry>>,
}

impl OperatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the table for `T`.
    pub fn register<T: 'static>(&self, operator: Arc<dyn Operator<T>>) {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        tables.insert(TypeId::of::<T>(), Box::new(operator));
    }

    /// Table registered for `T`, if any.
    pub fn get<T: 'static>(&self) -> Option<Arc<dyn Operator<T>>> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<Arc<dyn Operator<T>>>())
            .cloned()
    }

    /// Whether a table is registered for `T`.
    pub fn contains<T: 'static>(&self) -> bool {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables.contains_key(&TypeId::of::<T>())
    }
}

impl core::fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("OperatorRegistry")
            .field("types", &tables.len())
            .finish()
    }
}

// ============================================================================
// Global Registry
// ============================================================================

/// Process-wide registry consulted by reductions.
pub fn global_registry() -> &'static OperatorRegistry {
    static GLOBAL: OnceLock<OperatorRegistry> = OnceLock::new();
    GLOBAL.get_or_init(|| {
        let registry = OperatorRegistry::new();
        registry.register::<char>(Arc::new(CharOperator));
        registry
    })
}

/// Register a fallback table for `T` in the global registry.
pub fn register_operator<T: 'static, O>(operator: O)
where
    O: Operator<T> + 'static,
{
    global_registry().register::<T>(Arc::new(operator));
}
