//! LAZYLOAD Test Utilities
//!
//! Centralized test infrastructure for the LAZYLOAD workspace:
//! - Counting computations for exactly-once checks
//! - Proptest generators for argument lists and identifiers
//! - Test fixtures for the standard registry scenario
//! - Custom assertions for LAZYLOAD-specific validation

// Re-export core types for convenience
pub use lazyload_core::{
    CallArgs, Computation, ComputationError, KeyedAccess, LazyError, LazyRegistry, LazyResult,
    NameDispatcher, ProfileEntry, ProfileSnapshot, RegistryConfig, Value,
};

use std::cell::Cell;
use std::rc::Rc;

// ============================================================================
// COUNTING COMPUTATIONS
// ============================================================================

/// Shared call counter handed out to counting computations.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Rc<Cell<usize>>);

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times any computation built from this counter ran.
    pub fn calls(&self) -> usize {
        self.0.get()
    }

    fn bump(&self) {
        self.0.set(self.0.get() + 1);
    }

    /// A computation that counts its invocations and echoes its arguments
    /// back as a JSON array.
    pub fn echo(&self) -> Computation {
        let counter = self.clone();
        Computation::new(move |args| {
            counter.bump();
            Ok(Value::Array(args.to_vec()))
        })
    }

    /// A computation that counts its invocations and always fails.
    pub fn failing(&self, message: &'static str) -> Computation {
        let counter = self.clone();
        Computation::new(move |_| {
            counter.bump();
            Err(ComputationError::new(message))
        })
    }
}

// ============================================================================
// LOGGING
// ============================================================================

/// Install a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for LAZYLOAD inputs.

    use super::*;
    use proptest::prelude::*;
    use serde_json::{Map, Number};

    /// Generate a scalar JSON value.
    pub fn arb_scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::Number(Number::from(n))),
            (-1.0e6f64..1.0e6f64)
                .prop_filter_map("finite", Number::from_f64)
                .prop_map(Value::Number),
            "[a-z ]{0,12}".prop_map(Value::String),
        ]
    }

    /// Generate an arbitrary (possibly nested) JSON value.
    pub fn arb_value() -> impl Strategy<Value = Value> {
        arb_scalar().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
            ]
        })
    }

    /// Generate a positional argument list.
    pub fn arb_args() -> impl Strategy<Value = Vec<Value>> {
        prop::collection::vec(arb_value(), 0..4)
    }

    /// Generate a canonical snake_case registry key.
    pub fn arb_key() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9]{0,6}(_[a-z][a-z0-9]{0,6}){0,3}"
    }

    /// Generate a PascalCase identifier (as used after `get`/`set`).
    pub fn arb_pascal_ident() -> impl Strategy<Value = String> {
        prop::collection::vec("[A-Z][a-z]{1,6}", 1..4).prop_map(|words| words.concat())
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common testing scenarios.

    use super::*;

    /// Drink by time of day; unknown or missing period means coffee.
    pub fn favourite_drink(args: &[Value]) -> &'static str {
        match args.first().and_then(Value::as_str).unwrap_or("") {
            "morning" => "Tea",
            "evening" => "Beer",
            _ => "Coffee",
        }
    }

    /// Registry with `job`, `greeting` and `favourite_drink`, each registered
    /// through a different access style.
    pub fn scenario_registry() -> LazyResult<LazyRegistry> {
        let mut registry = LazyRegistry::new();
        registry.register("job", |_| Ok(Value::from("Painter")));
        registry.set("greeting", Computation::constant("Hello World!"));
        registry.call("setFavouriteDrink", Computation::infallible(favourite_drink))?;
        Ok(registry)
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Custom assertion functions for LAZYLOAD-specific validation.

    use super::*;

    /// Assert that a result is a NotRegistered error for `key`.
    #[track_caller]
    pub fn assert_not_registered<T: std::fmt::Debug>(result: &LazyResult<T>, key: &str) {
        match result {
            Err(LazyError::NotRegistered { key: k }) => {
                assert_eq!(k, key, "Wrong key in NotRegistered error");
            }
            other => panic!("Expected NotRegistered error for {key}, got: {:?}", other),
        }
        if let Err(err) = result {
            assert!(err.to_string().contains(key));
        }
    }

    /// Assert that a result is an UnknownOperation error for `name`.
    #[track_caller]
    pub fn assert_unknown_operation<T: std::fmt::Debug>(result: &LazyResult<T>, name: &str) {
        match result {
            Err(LazyError::UnknownOperation { name: n }) => {
                assert_eq!(n, name, "Wrong name in UnknownOperation error");
            }
            other => panic!("Expected UnknownOperation error for {name}, got: {:?}", other),
        }
    }

    /// Assert the executed count recorded for `key`.
    #[track_caller]
    pub fn assert_executed(snapshot: &ProfileSnapshot, key: &str, expected: u64) {
        let entry = snapshot
            .get(key)
            .unwrap_or_else(|| panic!("No profile entry for {key}"));
        assert_eq!(entry.executed, expected, "Wrong executed count for {key}");
    }
}

// ============================================================================
// TESTS
// ============================================================================
