use serde::{Deserialize, Serialize};

use super::action::ResourceKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub name: String,
    pub owner: String,
    pub team: String,
    #[serde(default)]
    pub status: String,
}

/// Keyed by (project, name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Instance {
    pub project: String,
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Team {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub owner: String,
    /// Membership keys, see [`TeamMember::key_for`](super::TeamMember::key_for).
    #[serde(default)]
    pub members: Vec<String>,
}

impl Team {
    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner == user_id
    }
}

/// Aggregate per-owner counts, recomputed from the store at decision time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub owner: String,
    pub total_projects: u32,
    pub total_instances: u32,
    pub total_teams: u32,
    pub total_api_keys: u32,
}

impl ResourceSummary {
    pub fn count(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Project => self.total_projects,
            ResourceKind::Instance => self.total_instances,
            ResourceKind::Team => self.total_teams,
        }
    }
}
