#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use accessgate_engine::{app_state::AppState, config, ops};

const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../accessgate.yaml");

#[tokio::test]
async fn sample_config_checks_hold() {
    let cfg = config::load_from_file(SAMPLE).expect("sample config must load");
    let total = cfg.checks.len();
    let state = AppState::new(cfg).unwrap();

    let report = ops::run_checks(&state).await;
    assert!(report.is_clean(), "failed: {:?}", report.failed);
    assert_eq!(report.passed, total);
}

#[tokio::test]
async fn mismatched_expectation_is_reported() {
    let s = r#"
version: 1
subscriptions:
  - { tier: starter, max_projects: 0, max_instances: 0, max_teams: 0 }
seed:
  users:
    - { id: olivia, role: owner, tier: starter }
checks:
  - { name: no quota left, target: project, principal: olivia, action: create, expect: allow }
  - { name: unknown user, target: team, principal: ghost, action: access, team: core, expect: deny }
"#;
    let state = AppState::new(config::load_from_str(s).unwrap()).unwrap();

    let report = ops::run_checks(&state).await;
    assert_eq!(report.passed, 1);
    assert_eq!(report.failed, vec!["no quota left".to_string()]);
}
