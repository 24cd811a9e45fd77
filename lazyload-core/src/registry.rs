//! The lazy registry
//!
//! Callers register named computations up front and resolve them later.
//! Nothing runs until the first resolve of a key, and each distinct argument
//! list is computed once and then served from the cache for the lifetime of
//! the registry.
//!
//! # Example
//!
//! ```
//! use lazyload_core::LazyRegistry;
//! use serde_json::json;
//!
//! let mut registry = LazyRegistry::new();
//! registry.register("recent_articles", |args| {
//!     let limit = args.first().and_then(|v| v.as_u64()).unwrap_or(10);
//!     Ok(json!(format!("latest {limit} articles")))
//! });
//!
//! assert_eq!(registry.resolve("recent_articles", &[]).unwrap(), "latest 10 articles");
//! assert_eq!(registry.resolve("recent_articles", &[json!(5)]).unwrap(), "latest 5 articles");
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::RegistryConfig;
use crate::error::{ComputationError, LazyError, LazyResult};
use crate::fingerprint::Fingerprint;
use crate::profile::{ProfileEntry, ProfileSnapshot, TimingRecord};

type ComputeFn = dyn Fn(&[Value]) -> Result<Value, ComputationError>;

/// A deferred computation stored under a key.
///
/// Computations receive the positional arguments of the resolve call and
/// return a dynamically typed [`Value`]. A computation that ignores its
/// arguments behaves like a plain lazy value.
pub struct Computation {
    f: Box<ComputeFn>,
}

impl Computation {
    /// Wrap a fallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, ComputationError> + 'static,
    {
        Self { f: Box::new(f) }
    }

    /// Wrap a closure that cannot fail.
    pub fn infallible<F, T>(f: F) -> Self
    where
        F: Fn(&[Value]) -> T + 'static,
        T: Into<Value>,
    {
        Self::new(move |args| Ok(f(args).into()))
    }

    /// A computation that always yields `value`.
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::new(move |_| Ok(value.clone()))
    }

    fn call(&self, arguments: &[Value]) -> Result<Value, ComputationError> {
        (self.f)(arguments)
    }
}

impl fmt::Debug for Computation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Computation { .. }")
    }
}

/// Memoizing registry of lazy computations.
///
/// `resolve` takes `&mut self`, so at most one resolution can be in flight
/// per registry and a computation can never observe a half-populated slot.
#[derive(Debug, Default)]
pub struct LazyRegistry {
    config: RegistryConfig,
    computations: HashMap<String, Computation>,
    /// Keys in first-registration order.
    order: Vec<String>,
    cache: HashMap<String, HashMap<Fingerprint, Value>>,
    timings: HashMap<String, TimingRecord>,
}

impl LazyRegistry {
    /// Create an empty registry with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given configuration.
    pub fn with_config(config: RegistryConfig) -> LazyResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Store a computation under `key`, replacing any previous one.
    ///
    /// Results already cached for `key` are kept; call [`invalidate`] to
    /// drop them.
    ///
    /// [`invalidate`]: LazyRegistry::invalidate
    pub fn register<F>(&mut self, key: impl Into<String>, f: F)
    where
        F: Fn(&[Value]) -> Result<Value, ComputationError> + 'static,
    {
        self.register_computation(key, Computation::new(f));
    }

    /// Store a prebuilt [`Computation`] under `key`.
    pub fn register_computation(&mut self, key: impl Into<String>, computation: Computation) {
        let key = key.into();
        trace!(registry = %self.config.name, key = %key, "register");
        if self.computations.insert(key.clone(), computation).is_none() {
            self.order.push(key.clone());
            self.timings.entry(key).or_default();
        }
    }

    /// Resolve `key` for the given arguments, computing it on first access.
    ///
    /// Errors raised by the computation are returned unchanged and nothing is
    /// cached, so the next call retries.
    pub fn resolve(&mut self, key: &str, arguments: &[Value]) -> LazyResult<&Value> {
        let computation = self
            .computations
            .get(key)
            .ok_or_else(|| LazyError::NotRegistered {
                key: key.to_string(),
            })?;

        let fingerprint = Fingerprint::of(arguments).map_err(|e| LazyError::Fingerprint {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        let slot = self.cache.entry(key.to_string()).or_default();
        match slot.entry(fingerprint) {
            Entry::Occupied(hit) => {
                trace!(
                    registry = %self.config.name,
                    key,
                    fingerprint = %fingerprint.short(),
                    "cache hit"
                );
                Ok(&*hit.into_mut())
            }
            Entry::Vacant(miss) => {
                let started = Instant::now();
                let value = computation.call(arguments)?;
                let elapsed = started.elapsed();

                self.timings
                    .entry(key.to_string())
                    .or_default()
                    .record(self.config.record_timings.then_some(elapsed), Utc::now());
                debug!(
                    registry = %self.config.name,
                    key,
                    fingerprint = %fingerprint.short(),
                    elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
                    "computed"
                );
                Ok(&*miss.insert(value))
            }
        }
    }

    /// Resolve `key` and decode the result into `T`.
    pub fn resolve_as<T: DeserializeOwned>(
        &mut self,
        key: &str,
        arguments: &[Value],
    ) -> LazyResult<T> {
        let value = self.resolve(key, arguments)?;
        T::deserialize(value).map_err(|e| LazyError::Decode {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Whether a computation is stored under `key`.
    pub fn is_registered(&self, key: &str) -> bool {
        self.computations.contains_key(key)
    }

    /// Remove the computation, its cached results and its profile record.
    /// Unknown keys are ignored.
    pub fn unregister(&mut self, key: &str) {
        if self.computations.remove(key).is_some() {
            trace!(registry = %self.config.name, key, "unregister");
            self.order.retain(|k| k != key);
        }
        self.cache.remove(key);
        self.timings.remove(key);
    }

    /// Drop every cached result for `key`, keeping its computation.
    /// Returns the number of results dropped.
    ///
    /// Profile counters are kept, so a later resolve of a dropped argument
    /// list counts as another execution.
    pub fn invalidate(&mut self, key: &str) -> usize {
        self.cache.remove(key).map_or(0, |slot| slot.len())
    }

    /// Drop every cached result for every key. Profile counters are kept.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of argument lists currently cached for `key`.
    pub fn cached_count(&self, key: &str) -> usize {
        self.cache.get(key).map_or(0, HashMap::len)
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Profiling data for every registered key, in registration order.
    pub fn profile_snapshot(&self) -> ProfileSnapshot {
        let entries = self
            .order
            .iter()
            .map(|key| match self.timings.get(key) {
                Some(record) => ProfileEntry::from_record(key, record),
                None => ProfileEntry::from_record(key, &TimingRecord::default()),
            })
            .collect();
        ProfileSnapshot::new(entries)
    }
}

// =============================================================================
// TESTS
// =============================================================================
