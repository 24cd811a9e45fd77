//! Accessor-style name dispatch
//!
//! Maps conventional accessor names onto registry operations:
//!
//! - `getRecentArticles(args..)` -> `resolve("recent_articles", args)`
//! - `setRecentArticles(computation)` -> `register("recent_articles", computation)`
//!
//! The dispatcher is stateless. Names that do not follow the convention fail
//! with [`LazyError::UnknownOperation`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::case::to_snake_case;
use crate::error::{LazyError, LazyResult};
use crate::registry::{Computation, LazyRegistry};

static ACCESSOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(get|set)([A-Za-z_][A-Za-z0-9_]*)$").expect("valid accessor regex")
});

/// Accessor verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Set,
}

/// A parsed accessor name: verb plus canonical registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accessor {
    pub verb: Verb,
    pub key: String,
}

/// Arguments of a dispatched call.
#[derive(Debug)]
pub enum CallArgs {
    /// Positional arguments for a `get` call.
    Values(Vec<Value>),
    /// The computation for a `set` call.
    Computation(Computation),
}

impl CallArgs {
    /// No arguments.
    pub fn none() -> Self {
        CallArgs::Values(Vec::new())
    }

    pub fn values(values: impl IntoIterator<Item = Value>) -> Self {
        CallArgs::Values(values.into_iter().collect())
    }
}

impl From<Computation> for CallArgs {
    fn from(computation: Computation) -> Self {
        CallArgs::Computation(computation)
    }
}

impl From<Vec<Value>> for CallArgs {
    fn from(values: Vec<Value>) -> Self {
        CallArgs::Values(values)
    }
}

/// Stateless translator from accessor names to registry calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameDispatcher;

impl NameDispatcher {
    /// Parse `getX` / `setX` into an [`Accessor`].
    pub fn parse(name: &str) -> LazyResult<Accessor> {
        let caps = ACCESSOR
            .captures(name)
            .ok_or_else(|| LazyError::UnknownOperation {
                name: name.to_string(),
            })?;

        let verb = match &caps[1] {
            "get" => Verb::Get,
            _ => Verb::Set,
        };
        Ok(Accessor {
            verb,
            key: to_snake_case(&caps[2]),
        })
    }

    /// Dispatch a call by name.
    ///
    /// `get` calls return the resolved value; `set` calls return `None`.
    pub fn call<'r>(
        registry: &'r mut LazyRegistry,
        name: &str,
        args: CallArgs,
    ) -> LazyResult<Option<&'r Value>> {
        let accessor = Self::parse(name)?;
        match (accessor.verb, args) {
            (Verb::Get, CallArgs::Values(values)) => {
                registry.resolve(&accessor.key, &values).map(Some)
            }
            (Verb::Set, CallArgs::Computation(computation)) => {
                registry.register_computation(accessor.key, computation);
                Ok(None)
            }
            (Verb::Get, CallArgs::Computation(_)) => Err(LazyError::InvalidArguments {
                name: name.to_string(),
                expected: "positional values".to_string(),
            }),
            (Verb::Set, CallArgs::Values(_)) => Err(LazyError::InvalidArguments {
                name: name.to_string(),
                expected: "a single computation".to_string(),
            }),
        }
    }

    /// `get<Key>(args..)`
    pub fn get<'r>(
        registry: &'r mut LazyRegistry,
        name: &str,
        args: &[Value],
    ) -> LazyResult<&'r Value> {
        let accessor = Self::parse(name)?;
        if accessor.verb != Verb::Get {
            return Err(LazyError::UnknownOperation {
                name: name.to_string(),
            });
        }
        registry.resolve(&accessor.key, args)
    }

    /// `set<Key>(computation)`
    pub fn set(registry: &mut LazyRegistry, name: &str, computation: Computation) -> LazyResult<()> {
        let accessor = Self::parse(name)?;
        if accessor.verb != Verb::Set {
            return Err(LazyError::UnknownOperation {
                name: name.to_string(),
            });
        }
        registry.register_computation(accessor.key, computation);
        Ok(())
    }
}

impl LazyRegistry {
    /// Dispatch an accessor-style call, see [`NameDispatcher::call`].
    pub fn call(&mut self, name: &str, args: impl Into<CallArgs>) -> LazyResult<Option<&Value>> {
        NameDispatcher::call(self, name, args.into())
    }
}
