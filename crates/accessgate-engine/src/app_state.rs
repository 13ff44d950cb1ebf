//! Shared application state for the accessgate engine.
//!
//! - Compile the subscription table from config.
//! - Seed the in-memory stores and wire the authorizer to them.
//! - Make startup errors explicit (Result instead of panic).

use std::sync::Arc;

use accessgate_core::error::{AccessError, Result};

use crate::config::{AccessConfig, PolicyTable, SeedData};
use crate::policy::AccessAuthorizer;
use crate::store::{MemoryMembershipStore, MemoryResourceStore, Stores};

const FAIL_FAST_ON_DANGLING: bool = false; // if changed to true, boot fails.

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    authorizer: AccessAuthorizer,
}

struct AppStateInner {
    cfg: AccessConfig,
    resources: Arc<MemoryResourceStore>,
    members: Arc<MemoryMembershipStore>,
}

impl AppState {
    /// Build application state.
    pub fn new(cfg: AccessConfig) -> Result<Self> {
        // 1) Subscription table
        let table = Arc::new(PolicyTable::new(cfg.subscriptions.iter().cloned()));

        // 2) Stores
        let members = Arc::new(MemoryMembershipStore::new());
        let resources = Arc::new(MemoryResourceStore::new(Arc::clone(&members)));
        seed(&cfg.seed, &resources, &members)?;

        // 3) Seed sanity check: references to records that do not exist
        for msg in dangling_references(&cfg.seed, &members) {
            tracing::warn!(%msg, "seed refers to unknown record");
            if FAIL_FAST_ON_DANGLING {
                return Err(AccessError::BadRequest(msg));
            }
        }

        let stores = Stores::new(resources.clone(), members.clone(), table.clone());
        let authorizer = AccessAuthorizer::new(stores);

        tracing::info!(
            tiers = table.len(),
            users = cfg.seed.users.len(),
            projects = cfg.seed.projects.len(),
            "access state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, resources, members }),
            authorizer,
        })
    }

    pub fn cfg(&self) -> &AccessConfig {
        &self.inner.cfg
    }

    pub fn authorizer(&self) -> &AccessAuthorizer {
        &self.authorizer
    }

    pub fn resources(&self) -> Arc<MemoryResourceStore> {
        Arc::clone(&self.inner.resources)
    }

    pub fn members(&self) -> Arc<MemoryMembershipStore> {
        Arc::clone(&self.inner.members)
    }
}

fn seed(data: &SeedData, resources: &MemoryResourceStore, members: &MemoryMembershipStore) -> Result<()> {
    for u in &data.users {
        members.insert_user(u.clone());
    }
    for t in &data.teams {
        members.insert_team(t.clone());
    }
    for m in &data.members {
        members.insert_member(m.clone());
    }
    for k in &data.api_keys {
        members.insert_api_key(k.clone());
    }
    for p in &data.instance_policies {
        members.insert_instance_policy(p.clone());
    }
    for p in &data.user_policies {
        members.insert_user_policy(p.clone());
    }
    for p in &data.api_key_policies {
        members.insert_api_key_policy(p.clone());
    }
    for p in &data.projects {
        resources.insert_project(p.clone())?;
    }
    for i in &data.instances {
        resources.insert_instance(i.clone()).map_err(|e| {
            AccessError::BadRequest(format!("seed instance {}/{}: {e}", i.project, i.name))
        })?;
    }
    Ok(())
}

fn dangling_references(data: &SeedData, members: &MemoryMembershipStore) -> Vec<String> {
    let mut out = Vec::new();
    for t in &data.teams {
        if !members.contains_user(&t.owner) {
            out.push(format!("team {} owner {}", t.id, t.owner));
        }
    }
    for m in &data.members {
        if !members.contains_team(&m.team) {
            out.push(format!("member {} team {}", m.user, m.team));
        }
    }
    for p in &data.projects {
        if !members.contains_user(&p.owner) {
            out.push(format!("project {} owner {}", p.name, p.owner));
        }
        if !members.contains_team(&p.team) {
            out.push(format!("project {} team {}", p.name, p.team));
        }
    }
    for k in &data.api_keys {
        if !members.contains_user(&k.owner) {
            out.push(format!("api key owner {}", k.owner));
        }
    }
    out
}
