use std::collections::HashSet;

use serde::Deserialize;

use accessgate_core::error::{AccessError, Result};
use accessgate_core::model::{
    Action, ApiKey, ApiKeyPolicy, Instance, InstancePolicy, Project, SubscriptionPolicy, Team,
    TeamMember, User, UserPolicy,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    pub version: u32,

    /// Subscription policy table.
    pub subscriptions: Vec<SubscriptionPolicy>,

    #[serde(default)]
    pub seed: SeedData,

    #[serde(default)]
    pub checks: Vec<CheckSpec>,
}

impl AccessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AccessError::UnsupportedVersion);
        }
        if self.subscriptions.is_empty() {
            return Err(AccessError::BadRequest("subscriptions must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for p in &self.subscriptions {
            if p.tier.is_none() {
                return Err(AccessError::BadRequest("subscriptions[].tier must not be empty".into()));
            }
            if !seen.insert(&p.tier) {
                return Err(AccessError::BadRequest(format!("duplicate subscription tier: {}", p.tier)));
            }
        }

        self.seed.validate()?;
        for c in &self.checks {
            c.validate()?;
        }
        Ok(())
    }
}

/// Fixture records loaded into the in-memory stores.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub members: Vec<TeamMember>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub instances: Vec<Instance>,
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
    #[serde(default)]
    pub instance_policies: Vec<InstancePolicy>,
    #[serde(default)]
    pub user_policies: Vec<UserPolicy>,
    #[serde(default)]
    pub api_key_policies: Vec<ApiKeyPolicy>,
}

impl SeedData {
    pub fn validate(&self) -> Result<()> {
        unique("seed.users", self.users.iter().map(|u| u.id.clone()))?;
        unique("seed.teams", self.teams.iter().map(|t| t.id.clone()))?;
        unique("seed.members", self.members.iter().map(TeamMember::key))?;
        unique("seed.projects", self.projects.iter().map(|p| p.name.clone()))?;
        unique(
            "seed.instances",
            self.instances.iter().map(|i| format!("{}/{}", i.project, i.name)),
        )?;
        unique("seed.api_keys", self.api_keys.iter().map(|k| k.key.clone()))?;
        Ok(())
    }
}

fn unique(section: &str, ids: impl Iterator<Item = String>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(AccessError::BadRequest(format!("{section}: empty identifier")));
        }
        if !seen.insert(id.clone()) {
            return Err(AccessError::BadRequest(format!("{section}: duplicate entry {id}")));
        }
    }
    Ok(())
}

/// Which entry point a dry-run check calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckTarget {
    Project,
    Instance,
    Team,
    UserMethod,
    ApiKeyMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    Allow,
    Deny,
}

/// One dry-run decision request with its expected outcome.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckSpec {
    pub name: String,
    pub target: CheckTarget,
    pub expect: Expectation,

    /// Acting user id; not used by `api_key_method`.
    #[serde(default)]
    pub principal: Option<String>,
    #[serde(default)]
    pub action: Option<Action>,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub instance: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub api_key: String,
}

impl CheckSpec {
    pub fn validate(&self) -> Result<()> {
        let missing = |field: &str| {
            AccessError::BadRequest(format!("checks[{}]: {field} is required", self.name))
        };

        match self.target {
            CheckTarget::Project | CheckTarget::Instance | CheckTarget::Team => {
                if self.principal.is_none() {
                    return Err(missing("principal"));
                }
                if self.action.is_none() {
                    return Err(missing("action"));
                }
            }
            CheckTarget::UserMethod => {
                if self.principal.is_none() {
                    return Err(missing("principal"));
                }
                if self.method.is_empty() {
                    return Err(missing("method"));
                }
            }
            CheckTarget::ApiKeyMethod => {
                if self.api_key.is_empty() {
                    return Err(missing("api_key"));
                }
                if self.method.is_empty() {
                    return Err(missing("method"));
                }
            }
        }
        Ok(())
    }
}
