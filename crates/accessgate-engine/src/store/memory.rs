//! In-memory stores backed by `DashMap`.
//!
//! Used for tests, local dry-runs, and the seeded fixtures in the config
//! file. Not durable. Summaries are counted on every call, so two creates
//! racing between a decision and their insert can both pass the quota check.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use accessgate_core::error::{AccessError, Result};
use accessgate_core::model::{
    ApiKey, ApiKeyPolicy, Instance, InstancePolicy, MemberStatus, Project, ResourceSummary, Team,
    TeamMember, User, UserPolicy,
};

use super::{MembershipStore, ResourceStore};
use crate::context::unix_now;

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Users, teams, memberships, keys, and policies.
#[derive(Default)]
pub struct MemoryMembershipStore {
    users: DashMap<String, User>,
    teams: DashMap<String, Team>,
    members: DashMap<String, TeamMember>,
    api_keys: DashMap<String, ApiKey>,
    instance_policies: DashMap<(String, String), InstancePolicy>,
    user_policies: DashMap<String, UserPolicy>,
    api_key_policies: DashMap<String, ApiKeyPolicy>,
}

impl MemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn insert_team(&self, team: Team) {
        self.teams.insert(team.id.clone(), team);
    }

    /// Upserts the record and lists its key on the team, when the team is known.
    pub fn insert_member(&self, member: TeamMember) {
        let key = member.key();
        if let Some(mut team) = self.teams.get_mut(&member.team) {
            if !team.members.contains(&key) {
                team.members.push(key.clone());
            }
        }
        self.members.insert(key, member);
    }

    pub fn remove_member(&self, team: &str, user: &str) -> Option<TeamMember> {
        let key = TeamMember::key_for(team, user);
        if let Some(mut t) = self.teams.get_mut(team) {
            t.members.retain(|k| k != &key);
        }
        self.members.remove(&key).map(|(_, m)| m)
    }

    /// Keys without an expiry get the default lifetime from now.
    pub fn insert_api_key(&self, key: ApiKey) {
        let key = key.with_default_expiry(unix_now());
        self.api_keys.insert(key.key.clone(), key);
    }

    pub fn insert_instance_policy(&self, policy: InstancePolicy) {
        let id = (policy.project.clone(), policy.instance.clone());
        self.instance_policies.insert(id, policy);
    }

    pub fn insert_user_policy(&self, policy: UserPolicy) {
        self.user_policies.insert(policy.user.clone(), policy);
    }

    pub fn insert_api_key_policy(&self, policy: ApiKeyPolicy) {
        self.api_key_policies.insert(policy.key.clone(), policy);
    }

    pub fn contains_user(&self, id: &str) -> bool {
        self.users.contains_key(id)
    }

    pub fn contains_team(&self, id: &str) -> bool {
        self.teams.contains_key(id)
    }

    pub fn teams_owned_by(&self, owner: &str) -> u32 {
        count(self.teams.iter().filter(|t| t.owner == owner).count())
    }

    pub fn api_keys_owned_by(&self, owner: &str) -> u32 {
        count(self.api_keys.iter().filter(|k| k.owner == owner).count())
    }

    /// Pending invitations whose expiry falls at or before `before`.
    pub fn expiring_invitations(&self, before: u64) -> Vec<TeamMember> {
        self.members
            .iter()
            .filter(|m| m.status == MemberStatus::Invited)
            .filter(|m| matches!(m.expires_at, Some(t) if t <= before))
            .map(|m| m.value().clone())
            .collect()
    }

    /// Drops every membership that reads as expired at `now`. Returns how many went.
    pub fn purge_expired_invitations(&self, now: u64) -> usize {
        let expired: Vec<(String, String)> = self
            .members
            .iter()
            .filter(|m| m.is_expired(now))
            .map(|m| (m.team.clone(), m.user.clone()))
            .collect();

        let mut removed = 0;
        for (team, user) in expired {
            if self.remove_member(&team, &user).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::debug!(removed, "purged expired invitations");
        }
        removed
    }
}

#[async_trait]
impl MembershipStore for MemoryMembershipStore {
    async fn get_user(&self, id: &str) -> Result<User> {
        self.users
            .get(id)
            .map(|u| u.value().clone())
            .ok_or_else(|| AccessError::not_found("user", id))
    }

    async fn get_team(&self, id: &str) -> Result<Team> {
        self.teams
            .get(id)
            .map(|t| t.value().clone())
            .ok_or_else(|| AccessError::not_found("team", id))
    }

    async fn get_team_membership(&self, team: &str, user: &str) -> Result<Option<TeamMember>> {
        let key = TeamMember::key_for(team, user);
        Ok(self.members.get(&key).map(|m| m.value().clone()))
    }

    async fn get_instance_policy(&self, project: &str, instance: &str) -> Result<InstancePolicy> {
        self.instance_policies
            .get(&(project.to_string(), instance.to_string()))
            .map(|p| p.value().clone())
            .ok_or_else(|| AccessError::not_found("instance policy", format!("{project}/{instance}")))
    }

    async fn get_user_policy(&self, user: &str) -> Result<UserPolicy> {
        self.user_policies
            .get(user)
            .map(|p| p.value().clone())
            .ok_or_else(|| AccessError::not_found("user policy", user))
    }

    async fn get_api_key(&self, key: &str) -> Result<ApiKey> {
        self.api_keys
            .get(key)
            .map(|k| k.value().clone())
            .ok_or_else(|| AccessError::not_found("api key", key))
    }

    async fn get_api_key_policy(&self, key: &str) -> Result<ApiKeyPolicy> {
        self.api_key_policies
            .get(key)
            .map(|p| p.value().clone())
            .ok_or_else(|| AccessError::not_found("api key policy", key))
    }
}

/// Projects and instances. Team and key counts for summaries come from the
/// membership store it is wired to.
pub struct MemoryResourceStore {
    projects: DashMap<String, Project>,
    instances: DashMap<(String, String), Instance>,
    members: Arc<MemoryMembershipStore>,
}

impl MemoryResourceStore {
    pub fn new(members: Arc<MemoryMembershipStore>) -> Self {
        Self {
            projects: DashMap::new(),
            instances: DashMap::new(),
            members,
        }
    }

    pub fn insert_project(&self, project: Project) -> Result<()> {
        match self.projects.entry(project.name.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(AccessError::BadRequest(format!(
                "project already exists: {}",
                project.name
            ))),
            dashmap::mapref::entry::Entry::Vacant(v) => {
                v.insert(project);
                Ok(())
            }
        }
    }

    pub fn insert_instance(&self, instance: Instance) -> Result<()> {
        if !self.projects.contains_key(&instance.project) {
            return Err(AccessError::not_found("project", instance.project));
        }
        let id = (instance.project.clone(), instance.name.clone());
        match self.instances.entry(id) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(AccessError::BadRequest(format!(
                "instance already exists: {}/{}",
                instance.project, instance.name
            ))),
            dashmap::mapref::entry::Entry::Vacant(v) => {
                v.insert(instance);
                Ok(())
            }
        }
    }

    /// Removes the project and its instances.
    pub fn remove_project(&self, name: &str) -> Option<Project> {
        self.instances.retain(|key, _| key.0 != name);
        self.projects.remove(name).map(|(_, p)| p)
    }

    pub fn remove_instance(&self, project: &str, name: &str) -> Option<Instance> {
        self.instances
            .remove(&(project.to_string(), name.to_string()))
            .map(|(_, i)| i)
    }
}

#[async_trait]
impl ResourceStore for MemoryResourceStore {
    async fn get_project(&self, name: &str) -> Result<Project> {
        self.projects
            .get(name)
            .map(|p| p.value().clone())
            .ok_or_else(|| AccessError::not_found("project", name))
    }

    async fn get_instance(&self, project: &str, name: &str) -> Result<Instance> {
        self.instances
            .get(&(project.to_string(), name.to_string()))
            .map(|i| i.value().clone())
            .ok_or_else(|| AccessError::not_found("instance", format!("{project}/{name}")))
    }

    async fn get_owner_summary(&self, owner: &str) -> Result<ResourceSummary> {
        Ok(ResourceSummary {
            owner: owner.to_string(),
            total_projects: count(self.projects.iter().filter(|p| p.owner == owner).count()),
            total_instances: count(self.instances.iter().filter(|i| i.owner == owner).count()),
            total_teams: self.members.teams_owned_by(owner),
            total_api_keys: self.members.api_keys_owned_by(owner),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use accessgate_core::model::{GlobalRole, MemberRole, MethodPolicy, SubscriptionTier, API_KEY_TTL_SECS};

    fn member(team: &str, user: &str, status: MemberStatus, expires_at: Option<u64>) -> TeamMember {
        TeamMember {
            team: team.into(),
            user: user.into(),
            email: format!("{user}@example.com"),
            role: MemberRole::Member,
            status,
            expires_at,
        }
    }

    #[tokio::test]
    async fn summary_counts_everything_the_owner_holds() {
        let members = Arc::new(MemoryMembershipStore::new());
        members.insert_user(User {
            id: "alice".into(),
            email: String::new(),
            role: GlobalRole::Owner,
            tier: SubscriptionTier::new("bronze"),
            active: true,
        });
        members.insert_team(Team { id: "t1".into(), name: String::new(), owner: "alice".into(), members: vec![] });
        members.insert_api_key(ApiKey { key: "k1".into(), owner: "alice".into(), created_at: 0, expires_at: None });

        let resources = MemoryResourceStore::new(Arc::clone(&members));
        for name in ["p1", "p2"] {
            resources
                .insert_project(Project { name: name.into(), owner: "alice".into(), team: "t1".into(), status: String::new() })
                .unwrap();
        }
        resources
            .insert_instance(Instance { project: "p1".into(), name: "node".into(), owner: "alice".into(), status: String::new() })
            .unwrap();

        let s = resources.get_owner_summary("alice").await.unwrap();
        assert_eq!((s.total_projects, s.total_instances, s.total_teams, s.total_api_keys), (2, 1, 1, 1));

        resources.remove_project("p1");
        let s = resources.get_owner_summary("alice").await.unwrap();
        assert_eq!((s.total_projects, s.total_instances), (1, 0));
    }

    #[test]
    fn duplicate_project_is_rejected() {
        let resources = MemoryResourceStore::new(Arc::new(MemoryMembershipStore::new()));
        let p = Project { name: "p1".into(), owner: "alice".into(), team: "t1".into(), status: String::new() };
        resources.insert_project(p.clone()).unwrap();
        assert!(matches!(resources.insert_project(p), Err(AccessError::BadRequest(_))));
    }

    #[tokio::test]
    async fn absent_membership_is_not_an_error() {
        let store = MemoryMembershipStore::new();
        assert_eq!(store.get_team_membership("t1", "nobody").await.unwrap(), None);
    }

    #[test]
    fn purge_removes_only_expired_invitations() {
        let store = MemoryMembershipStore::new();
        store.insert_team(Team { id: "t1".into(), name: String::new(), owner: "alice".into(), members: vec![] });
        store.insert_member(member("t1", "bob", MemberStatus::Invited, Some(10)));
        store.insert_member(member("t1", "carol", MemberStatus::Invited, Some(1_000)));
        store.insert_member(member("t1", "dave", MemberStatus::Joined, Some(10)));

        assert_eq!(store.expiring_invitations(10).len(), 1);
        assert_eq!(store.purge_expired_invitations(50), 1);
        assert!(store.members.get("t1:bob").is_none());
        assert!(store.members.get("t1:carol").is_some());
        assert!(store.members.get("t1:dave").is_some());

        let team = store.teams.get("t1").unwrap();
        assert_eq!(team.members, vec!["t1:carol".to_string(), "t1:dave".to_string()]);
    }

    #[tokio::test]
    async fn stored_keys_get_default_expiry() {
        let store = MemoryMembershipStore::new();
        store.insert_api_key(ApiKey { key: "k1".into(), owner: "alice".into(), created_at: 0, expires_at: None });
        store.insert_api_key(ApiKey { key: "k2".into(), owner: "alice".into(), created_at: 5, expires_at: Some(9) });

        let k1 = store.get_api_key("k1").await.unwrap();
        assert!(k1.created_at > 0);
        assert_eq!(k1.expires_at, Some(k1.created_at + API_KEY_TTL_SECS));
        assert!(!k1.is_expired(unix_now()));

        let k2 = store.get_api_key("k2").await.unwrap();
        assert_eq!(k2.expires_at, Some(9));
    }

    #[tokio::test]
    async fn method_policies_by_category() {
        let store = MemoryMembershipStore::new();
        let method = |name: &str, category: &str| MethodPolicy { name: name.into(), category: category.into(), allow: true };
        store.insert_instance_policy(InstancePolicy {
            project: "p1".into(),
            instance: "node".into(),
            methods: vec![method("getinfo", "rpc"), method("stop", "ops"), method("scale", "ops")],
        });

        let ops = store.get_instance_method_policies("p1", "node", "ops").await.unwrap();
        let names: Vec<_> = ops.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["stop", "scale"]);

        assert!(store.get_instance_method_policies("p1", "node", "admin").await.unwrap().is_empty());
        assert!(store.get_instance_method_policies("p2", "node", "ops").await.unwrap_err().is_not_found());
    }
}
