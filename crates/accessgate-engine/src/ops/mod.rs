//! Dry-run evaluation of the `checks` listed in config.
//!
//! Each check goes through the same entry point a request handler would
//! call; the outcome is logged and compared with the expectation.

use accessgate_core::error::{AccessError, Result};
use accessgate_core::model::{Action, Principal};

use crate::app_state::AppState;
use crate::config::{CheckSpec, CheckTarget, Expectation};
use crate::context::resolve_principal;
use crate::policy::granted_tier;

/// Tally of a dry-run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub passed: usize,
    /// Names of checks whose outcome differed from the expectation.
    pub failed: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

pub async fn run_checks(state: &AppState) -> CheckReport {
    let mut report = CheckReport::default();
    for check in &state.cfg().checks {
        let outcome = evaluate(state, check).await;
        let allowed = outcome.is_ok();
        let expected = check.expect == Expectation::Allow;

        match &outcome {
            Ok(()) => tracing::info!(check = %check.name, "allow"),
            Err(e) => tracing::info!(check = %check.name, code = e.client_code().as_str(), reason = %e, "deny"),
        }

        if allowed == expected {
            report.passed += 1;
        } else {
            tracing::warn!(check = %check.name, expected = ?check.expect, "unexpected outcome");
            report.failed.push(check.name.clone());
        }
    }
    report
}

async fn evaluate(state: &AppState, check: &CheckSpec) -> Result<()> {
    let authz = state.authorizer();
    let action = check.action.unwrap_or(Action::Unknown);

    match check.target {
        CheckTarget::Project => {
            let principal = principal_for(state, check).await?;
            authz.validate_project_action(&principal, action, &check.project).await
        }
        CheckTarget::Instance => {
            let principal = principal_for(state, check).await?;
            authz
                .validate_instance_action(&principal, action, &check.project, &check.instance)
                .await
        }
        CheckTarget::Team => {
            let principal = principal_for(state, check).await?;
            authz.validate_team_action(&principal, action, &check.team).await
        }
        CheckTarget::UserMethod => {
            let principal = principal_for(state, check).await?;
            let res = authz
                .validate_user_instance_method_access(&principal, &check.project, &check.instance, &check.method)
                .await;
            tracing::debug!(check = %check.name, tier = %granted_tier(&res), "user method check");
            res.map(|_| ())
        }
        CheckTarget::ApiKeyMethod => {
            let res = authz
                .validate_api_key_instance_method_access(&check.project, &check.instance, &check.method, &check.api_key)
                .await;
            tracing::debug!(check = %check.name, tier = %granted_tier(&res), "api key method check");
            res.map(|_| ())
        }
    }
}

async fn principal_for(state: &AppState, check: &CheckSpec) -> Result<Principal> {
    let user = check
        .principal
        .as_deref()
        .ok_or_else(|| AccessError::BadRequest(format!("checks[{}]: principal is required", check.name)))?;
    let members = state.members();
    resolve_principal(&*members, user).await
}
