//! accessgate dry-run
//!
//! Loads a config (subscription table + seed records + checks), builds the
//! authorizer over in-memory stores, and evaluates every check.
//! Exits non-zero when any outcome differs from its expectation.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use accessgate_engine::{app_state, config, ops};

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "accessgate.yaml".into());
    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(%path, error = %e, "config load failed");
            return ExitCode::FAILURE;
        }
    };

    let state = match app_state::AppState::new(cfg) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "state build failed");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%path, checks = state.cfg().checks.len(), "accessgate dry-run starting");
    let report = ops::run_checks(&state).await;
    tracing::info!(passed = report.passed, failed = report.failed.len(), "dry-run complete");

    if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
