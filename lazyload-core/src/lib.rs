//! LAZYLOAD Core - Lazy Value Registry
//!
//! Register named computations, resolve them on first access, and serve every
//! later access with equal arguments from the cache.
//!
//! - [`LazyRegistry`]: computation table, per-key cache, profiling records
//! - [`NameDispatcher`]: `getRecentArticles(..)` / `setRecentArticles(..)` sugar
//! - [`KeyedAccess`]: map-style `contains/get/set/delete`
//! - [`ProfileSnapshot`]: read-only profiling data for reporting panels
//!
//! Arguments and results are [`serde_json::Value`]s. Use
//! [`LazyRegistry::resolve_as`] to decode a result into a concrete type.

pub mod access;
pub mod case;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fingerprint;
pub mod profile;
pub mod registry;

pub use access::KeyedAccess;
pub use case::to_snake_case;
pub use config::RegistryConfig;
pub use dispatch::{Accessor, CallArgs, NameDispatcher, Verb};
pub use error::{BoxError, ComputationError, ConfigError, LazyError, LazyResult};
pub use fingerprint::Fingerprint;
pub use profile::{ProfileEntry, ProfileSnapshot, Timestamp, TimingRecord};
pub use registry::{Computation, LazyRegistry};

pub use serde_json::Value;
