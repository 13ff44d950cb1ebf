//! Store seams consumed by the engine.
//!
//! Persistence is owned elsewhere; the engine only ever calls these read
//! operations through injected handles. Implementations report a missing
//! record as `AccessError::NotFound` and transport failures as
//! `AccessError::Internal`.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use accessgate_core::error::Result;
use accessgate_core::model::{
    ApiKey, ApiKeyPolicy, Instance, InstancePolicy, MethodPolicy, Project, ResourceSummary,
    SubscriptionPolicy, SubscriptionTier, Team, TeamMember, User, UserPolicy,
};
use accessgate_core::AccessError;

pub use memory::{MemoryMembershipStore, MemoryResourceStore};

/// Projects, instances, and per-owner aggregate counts.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn get_project(&self, name: &str) -> Result<Project>;

    async fn get_instance(&self, project: &str, name: &str) -> Result<Instance>;

    /// Counts recomputed at call time.
    async fn get_owner_summary(&self, owner: &str) -> Result<ResourceSummary>;
}

/// Users, teams, memberships, API keys, and method-level policies.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    async fn get_user(&self, id: &str) -> Result<User>;

    async fn get_team(&self, id: &str) -> Result<Team>;

    /// `Ok(None)` when the user has no record in the team.
    async fn get_team_membership(&self, team: &str, user: &str) -> Result<Option<TeamMember>>;

    async fn get_instance_policy(&self, project: &str, instance: &str) -> Result<InstancePolicy>;

    async fn get_instance_method_policy(
        &self,
        project: &str,
        instance: &str,
        method: &str,
    ) -> Result<MethodPolicy> {
        let policy = self.get_instance_policy(project, instance).await?;
        policy
            .method(method)
            .cloned()
            .ok_or_else(|| AccessError::not_found("method policy", format!("{project}/{instance}/{method}")))
    }

    async fn get_instance_method_policies(
        &self,
        project: &str,
        instance: &str,
        category: &str,
    ) -> Result<Vec<MethodPolicy>> {
        let policy = self.get_instance_policy(project, instance).await?;
        Ok(policy.methods_in_category(category))
    }

    async fn get_user_policy(&self, user: &str) -> Result<UserPolicy>;

    async fn get_api_key(&self, key: &str) -> Result<ApiKey>;

    async fn get_api_key_policy(&self, key: &str) -> Result<ApiKeyPolicy>;
}

/// Read-only subscription tier -> quota table.
pub trait SubscriptionPolicies: Send + Sync {
    fn subscription_policy(&self, tier: &SubscriptionTier) -> Result<SubscriptionPolicy>;
}

/// Handles the engine is constructed with.
#[derive(Clone)]
pub struct Stores {
    pub resources: Arc<dyn ResourceStore>,
    pub members: Arc<dyn MembershipStore>,
    pub subscriptions: Arc<dyn SubscriptionPolicies>,
}

impl Stores {
    pub fn new(
        resources: Arc<dyn ResourceStore>,
        members: Arc<dyn MembershipStore>,
        subscriptions: Arc<dyn SubscriptionPolicies>,
    ) -> Self {
        Self { resources, members, subscriptions }
    }
}
