//! End-to-end scenario: job / greeting / favourite_drink
//!
//! Exercises every access style against one registry: key-based
//! `resolve`, map-style `KeyedAccess`, and accessor-name dispatch.

use lazyload_test_utils::assertions::{
    assert_executed, assert_not_registered, assert_unknown_operation,
};
use lazyload_test_utils::fixtures::scenario_registry;
use lazyload_test_utils::{init_test_tracing, CallArgs, KeyedAccess, NameDispatcher, Value};
use serde_json::json;

#[test]
fn test_key_based_resolution() {
    init_test_tracing();
    let mut registry = scenario_registry().unwrap();

    assert_eq!(registry.resolve("job", &[]).unwrap(), "Painter");
    assert_eq!(registry.resolve("greeting", &[]).unwrap(), "Hello World!");
    assert_eq!(registry.resolve("favourite_drink", &[]).unwrap(), "Coffee");
    assert_eq!(
        registry.resolve("favourite_drink", &[json!("morning")]).unwrap(),
        "Tea"
    );
    assert_eq!(
        registry.resolve("favourite_drink", &[json!("evening")]).unwrap(),
        "Beer"
    );
}

#[test]
fn test_keyed_access() {
    let mut registry = scenario_registry().unwrap();

    assert_eq!(KeyedAccess::get(&mut registry, "job").unwrap(), "Painter");
    assert_eq!(
        KeyedAccess::get(&mut registry, "greeting").unwrap(),
        "Hello World!"
    );
    assert_eq!(
        KeyedAccess::get(&mut registry, "favourite_drink").unwrap(),
        "Coffee"
    );
}

#[test]
fn test_accessor_dispatch() {
    let mut registry = scenario_registry().unwrap();

    assert_eq!(
        registry.call("getJob", CallArgs::none()).unwrap(),
        Some(&json!("Painter"))
    );
    assert_eq!(
        registry.call("getGreeting", CallArgs::none()).unwrap(),
        Some(&json!("Hello World!"))
    );
    assert_eq!(
        NameDispatcher::get(&mut registry, "getFavouriteDrink", &[]).unwrap(),
        "Coffee"
    );
    assert_eq!(
        NameDispatcher::get(&mut registry, "getFavouriteDrink", &[json!("morning")]).unwrap(),
        "Tea"
    );
    assert_eq!(
        NameDispatcher::get(&mut registry, "getFavouriteDrink", &[json!("evening")]).unwrap(),
        "Beer"
    );
}

#[test]
fn test_membership_and_missing_keys() {
    let mut registry = scenario_registry().unwrap();

    assert!(registry.is_registered("job"));
    assert!(!registry.is_registered("unknown"));
    assert!(registry.contains("favourite_drink"));

    let result = registry.resolve("unknown", &[]).map(Value::clone);
    assert_not_registered(&result, "unknown");

    let result = KeyedAccess::get(&mut registry, "unitialized").map(Value::clone);
    assert_not_registered(&result, "unitialized");
    if let Err(err) = result {
        assert_eq!(
            err.to_string(),
            "LazyLoader: uninitialized value requested: unitialized"
        );
    }

    let result = registry.call("fetchJob", CallArgs::none()).map(|v| v.cloned());
    assert_unknown_operation(&result, "fetchJob");
}

#[test]
fn test_profile_after_scenario() {
    let mut registry = scenario_registry().unwrap();

    registry.resolve("job", &[]).unwrap();
    registry.resolve("job", &[]).unwrap();
    for period in [json!("morning"), json!("evening")] {
        registry.resolve("favourite_drink", &[period.clone()]).unwrap();
        registry.resolve("favourite_drink", &[period]).unwrap();
    }
    registry.resolve("favourite_drink", &[]).unwrap();

    let snapshot = registry.profile_snapshot();
    let keys: Vec<_> = snapshot.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["job", "greeting", "favourite_drink"]);

    assert_executed(&snapshot, "job", 1);
    assert_executed(&snapshot, "greeting", 0);
    assert_executed(&snapshot, "favourite_drink", 3);
    assert_eq!(snapshot.total_executed(), 4);

    let drink = snapshot.get("favourite_drink").unwrap();
    assert!(drink.last_duration.is_some());
    assert!(drink.total_duration >= drink.last_duration);

    let greeting = snapshot.get("greeting").unwrap();
    assert!(greeting.last_duration.is_none());
}

#[test]
fn test_unregister_then_reregister() {
    let mut registry = scenario_registry().unwrap();
    registry.resolve("job", &[]).unwrap();

    registry.delete("job");
    assert!(!registry.is_registered("job"));
    let result = registry.resolve("job", &[]).map(Value::clone);
    assert_not_registered(&result, "job");

    registry.register("job", |_| Ok(json!("Sculptor")));
    assert_eq!(registry.resolve("job", &[]).unwrap(), "Sculptor");

    // re-registration moves the key to the end of the profile order
    let snapshot = registry.profile_snapshot();
    assert_eq!(snapshot.entries.last().map(|e| e.key.as_str()), Some("job"));
    assert_executed(&snapshot, "job", 1);
}
