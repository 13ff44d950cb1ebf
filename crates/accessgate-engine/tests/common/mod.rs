//! Shared fixture: app state seeded from `tests/fixtures/authz.yaml`.

#![allow(dead_code)]

use accessgate_core::model::Principal;
use accessgate_engine::app_state::AppState;
use accessgate_engine::config;
use accessgate_engine::context::resolve_principal;

pub const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/authz.yaml");

pub fn state() -> AppState {
    let cfg = config::load_from_file(FIXTURE).expect("fixture config must load");
    AppState::new(cfg).expect("fixture state must build")
}

pub async fn principal(state: &AppState, id: &str) -> Principal {
    let members = state.members();
    resolve_principal(&*members, id).await.expect("fixture principal")
}
