//! Method-level access to a single operation on an instance.
//!
//! Both entry points run the same stages:
//! - A: the instance-global method policy must exist and allow the method.
//! - B: the acting user (or the key's owner) must be a joined member of the
//!   project's team, and that team must belong to the project owner.
//! - C: the principal's own policy entry for the instance must allow it; a
//!   method override can only narrow.
//!
//! On success the project owner's subscription tier is returned, which is
//! what the caller gates tier-limited features on.

use accessgate_core::error::{AccessError, Result};
use accessgate_core::model::{
    Action, Principal, PrincipalPolicy, Project, ResourceKind, SubscriptionTier,
};

use crate::context::unix_now;

use super::engine::AccessAuthorizer;

/// Tier granted by a method-level result; denials report the "no
/// subscription level" sentinel.
pub fn granted_tier(result: &Result<SubscriptionTier>) -> SubscriptionTier {
    match result {
        Ok(tier) => tier.clone(),
        Err(_) => SubscriptionTier::none(),
    }
}

impl AccessAuthorizer {
    #[tracing::instrument(skip(self, principal), fields(principal = %principal.id))]
    pub async fn validate_user_instance_method_access(
        &self,
        principal: &Principal,
        project: &str,
        instance: &str,
        method: &str,
    ) -> Result<SubscriptionTier> {
        let proj = self.instance_gate(project, instance, method).await?;
        self.team_gate(&proj, &principal.id).await?;

        let policy = self.resolver.stores().members.get_user_policy(&principal.id).await?;
        override_gate(&policy, project, instance, method)?;

        self.owner_tier(&proj).await
    }

    #[tracing::instrument(skip(self, api_key))]
    pub async fn validate_api_key_instance_method_access(
        &self,
        project: &str,
        instance: &str,
        method: &str,
        api_key: &str,
    ) -> Result<SubscriptionTier> {
        let proj = self.instance_gate(project, instance, method).await?;

        let members = &self.resolver.stores().members;
        let key = members.get_api_key(api_key).await?;
        if key.is_expired(unix_now()) {
            return Err(AccessError::AuthFailed("api key expired".into()));
        }
        self.team_gate(&proj, &key.owner).await?;

        let policy = members.get_api_key_policy(api_key).await?;
        override_gate(&policy, project, instance, method)?;

        self.owner_tier(&proj).await
    }

    /// Stage A. Lookup failures are reported as the same denial.
    async fn instance_gate(&self, project: &str, instance: &str, method: &str) -> Result<Project> {
        let stores = self.resolver.stores();
        let proj = stores.resources.get_project(project).await?;

        let denied = || AccessError::forbidden(ResourceKind::Instance, Action::Access);
        match stores.members.get_instance_method_policy(project, instance, method).await {
            Ok(m) if m.allow => Ok(proj),
            Ok(_) => {
                tracing::debug!(project, instance, method, "method disabled for instance");
                Err(denied())
            }
            Err(e) => {
                tracing::warn!(project, instance, method, error = %e, "instance method policy unavailable");
                Err(denied())
            }
        }
    }

    /// Stage B.
    async fn team_gate(&self, proj: &Project, user: &str) -> Result<()> {
        let (team, membership) = self.resolver.team_membership(&proj.team, user).await?;
        if !team.is_owner(&proj.owner) {
            return Err(AccessError::AuthFailed(format!(
                "team {} is not owned by the owner of project {}",
                team.id, proj.name
            )));
        }
        if !membership.is_joined() {
            return Err(AccessError::AuthFailed(format!(
                "{user} is not a joined member of team {}",
                team.id
            )));
        }
        Ok(())
    }

    async fn owner_tier(&self, proj: &Project) -> Result<SubscriptionTier> {
        let owner = self.resolver.stores().members.get_user(&proj.owner).await?;
        Ok(owner.tier)
    }
}

/// Stage C. A missing instance entry grants nothing.
fn override_gate(
    policy: &impl PrincipalPolicy,
    project: &str,
    instance: &str,
    method: &str,
) -> Result<()> {
    match policy.instance_access(project, instance) {
        Some(access) if access.permits(method) => Ok(()),
        Some(_) => Err(AccessError::AuthFailed(format!(
            "{method} on {project}/{instance} denied by principal policy"
        ))),
        None => Err(AccessError::AuthFailed(format!(
            "no principal policy entry for {project}/{instance}"
        ))),
    }
}
