//! Subscription quotas and method-level allow-lists.

use serde::{Deserialize, Serialize};

use super::action::ResourceKind;
use super::principal::SubscriptionTier;

/// Quotas granted by one subscription tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionPolicy {
    pub tier: SubscriptionTier,
    pub max_projects: u32,
    pub max_instances: u32,
    pub max_teams: u32,
}

impl SubscriptionPolicy {
    pub fn max(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Project => self.max_projects,
            ResourceKind::Instance => self.max_instances,
            ResourceKind::Team => self.max_teams,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodPolicy {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub allow: bool,
}

fn find_method<'a>(methods: &'a [MethodPolicy], name: &str) -> Option<&'a MethodPolicy> {
    methods.iter().find(|m| m.name == name)
}

/// Instance-global allow-list, independent of the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstancePolicy {
    pub project: String,
    pub instance: String,
    #[serde(default)]
    pub methods: Vec<MethodPolicy>,
}

impl InstancePolicy {
    pub fn method(&self, name: &str) -> Option<&MethodPolicy> {
        find_method(&self.methods, name)
    }

    pub fn methods_in_category(&self, category: &str) -> Vec<MethodPolicy> {
        self.methods
            .iter()
            .filter(|m| m.category == category)
            .cloned()
            .collect()
    }
}

/// One (project, instance) entry of a principal's override policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceAccess {
    pub project: String,
    pub instance: String,
    pub allow: bool,
    /// Per-method overrides; a missing override inherits `allow`.
    #[serde(default)]
    pub methods: Vec<MethodPolicy>,
}

impl InstanceAccess {
    pub fn method(&self, name: &str) -> Option<&MethodPolicy> {
        find_method(&self.methods, name)
    }

    /// Overrides only narrow: a `false` at either level denies.
    pub fn permits(&self, method: &str) -> bool {
        self.allow && self.method(method).map_or(true, |m| m.allow)
    }
}

/// Principal-specific override layer shared by user and API-key policies.
pub trait PrincipalPolicy {
    fn instances(&self) -> &[InstanceAccess];

    fn instance_access(&self, project: &str, instance: &str) -> Option<&InstanceAccess> {
        self.instances()
            .iter()
            .find(|a| a.project == project && a.instance == instance)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPolicy {
    pub user: String,
    #[serde(default)]
    pub instances: Vec<InstanceAccess>,
}

impl PrincipalPolicy for UserPolicy {
    fn instances(&self) -> &[InstanceAccess] {
        &self.instances
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiKeyPolicy {
    pub key: String,
    #[serde(default)]
    pub instances: Vec<InstanceAccess>,
}

impl PrincipalPolicy for ApiKeyPolicy {
    fn instances(&self) -> &[InstanceAccess] {
        &self.instances
    }
}
