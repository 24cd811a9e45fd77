//! Indexed access by key
//!
//! A small map-like surface over [`LazyRegistry`]: `get` always resolves with
//! an empty argument list.

use serde_json::Value;

use crate::error::LazyResult;
use crate::registry::{Computation, LazyRegistry};

/// Map-style access to lazily computed values.
pub trait KeyedAccess {
    /// Whether a computation is stored under `key`.
    fn contains(&self, key: &str) -> bool;

    /// Resolve `key` without arguments.
    fn get(&mut self, key: &str) -> LazyResult<&Value>;

    /// Store `computation` under `key`.
    fn set(&mut self, key: &str, computation: Computation);

    /// Remove `key` together with its cached results.
    fn delete(&mut self, key: &str);
}

impl KeyedAccess for LazyRegistry {
    fn contains(&self, key: &str) -> bool {
        self.is_registered(key)
    }

    fn get(&mut self, key: &str) -> LazyResult<&Value> {
        self.resolve(key, &[])
    }

    fn set(&mut self, key: &str, computation: Computation) {
        self.register_computation(key, computation);
    }

    fn delete(&mut self, key: &str) {
        self.unregister(key);
    }
}
