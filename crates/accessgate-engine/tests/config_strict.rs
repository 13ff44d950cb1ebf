#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use accessgate_core::AccessError;
use accessgate_engine::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
subscriptions:
  - { tier: gold, max_projects: 1, max_instances: 1, max_teams: 1 }
seed:
  users:
    - { id: alice, tier: gold, rol: owner } # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
subscriptions:
  - { tier: gold, max_projects: 1, max_instances: 2, max_teams: 3 }
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.subscriptions[0].tier.as_str(), "gold");
    assert_eq!(cfg.subscriptions[0].max_instances, 2);
    assert!(cfg.seed.users.is_empty());
    assert!(cfg.checks.is_empty());
}

#[test]
fn version_must_be_one() {
    let s = r#"
version: 2
subscriptions:
  - { tier: gold, max_projects: 1, max_instances: 1, max_teams: 1 }
"#;
    assert_eq!(config::load_from_str(s).unwrap_err(), AccessError::UnsupportedVersion);
}

#[test]
fn subscription_table_rules() {
    let empty = "version: 1\nsubscriptions: []\n";
    assert!(matches!(config::load_from_str(empty), Err(AccessError::BadRequest(_))));

    let dup = r#"
version: 1
subscriptions:
  - { tier: gold, max_projects: 1, max_instances: 1, max_teams: 1 }
  - { tier: gold, max_projects: 2, max_instances: 2, max_teams: 2 }
"#;
    let err = config::load_from_str(dup).unwrap_err();
    assert!(err.to_string().contains("duplicate subscription tier"), "{err}");
}

#[test]
fn duplicate_seed_records_fail() {
    let s = r#"
version: 1
subscriptions:
  - { tier: gold, max_projects: 1, max_instances: 1, max_teams: 1 }
seed:
  projects:
    - { name: p1, owner: alice, team: t1 }
    - { name: p1, owner: bob, team: t2 }
"#;
    let err = config::load_from_str(s).unwrap_err();
    assert!(err.to_string().contains("seed.projects"), "{err}");
}

#[test]
fn checks_require_their_fields() {
    let s = r#"
version: 1
subscriptions:
  - { tier: gold, max_projects: 1, max_instances: 1, max_teams: 1 }
checks:
  - { name: no-principal, target: project, action: access, project: p1, expect: deny }
"#;
    let err = config::load_from_str(s).unwrap_err();
    assert!(err.to_string().contains("principal is required"), "{err}");

    let s = r#"
version: 1
subscriptions:
  - { tier: gold, max_projects: 1, max_instances: 1, max_teams: 1 }
checks:
  - { name: key, target: api_key_method, project: p1, instance: node, api_key: k1, expect: allow }
"#;
    let err = config::load_from_str(s).unwrap_err();
    assert!(err.to_string().contains("method is required"), "{err}");
}
