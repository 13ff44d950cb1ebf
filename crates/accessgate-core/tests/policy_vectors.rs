//! Override-narrowing vectors for principal policies.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde::Deserialize;

use accessgate_core::model::{InstanceAccess, InstancePolicy, PrincipalPolicy, UserPolicy};

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

#[derive(Debug, Deserialize)]
struct AccessVector {
    description: String,
    access: InstanceAccess,
    method: String,
    expect: bool,
}

#[test]
fn instance_access_overrides_only_narrow() {
    let vectors: Vec<AccessVector> = serde_json::from_str(&load("instance_access.json")).unwrap();
    assert!(!vectors.is_empty());
    for v in vectors {
        assert_eq!(v.access.permits(&v.method), v.expect, "{}", v.description);
    }
}

#[test]
fn user_policy_finds_entry_by_project_and_instance() {
    let policy: UserPolicy = serde_json::from_str(&load("user_policy.json")).unwrap();

    let entry = policy.instance_access("p1", "node").expect("p1/node entry");
    assert!(entry.allow);
    assert!(!entry.permits("scale"));
    assert!(entry.permits("status"));

    let denied = policy.instance_access("p2", "node").unwrap();
    assert!(!denied.permits("status"));

    assert!(policy.instance_access("p1", "other").is_none());
}

#[test]
fn unknown_fields_are_rejected() {
    let bad = r#"{ "name": "scale", "allow": true, "alow": false }"#;
    assert!(serde_json::from_str::<accessgate_core::model::MethodPolicy>(bad).is_err());
}

#[test]
fn instance_policy_groups_by_category() {
    let policy: InstancePolicy = serde_json::from_str(
        r#"{
            "project": "p1",
            "instance": "node",
            "methods": [
                { "name": "scale", "category": "ops", "allow": true },
                { "name": "stop", "category": "ops", "allow": false },
                { "name": "getinfo", "category": "rpc", "allow": true }
            ]
        }"#,
    )
    .unwrap();

    let ops = policy.methods_in_category("ops");
    assert_eq!(ops.len(), 2);
    assert!(ops.iter().all(|m| m.category == "ops"));
    assert!(!policy.method("stop").unwrap().allow);
    assert!(policy.method("restart").is_none());
}
