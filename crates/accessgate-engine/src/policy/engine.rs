//! Resource action decisions for projects, instances, and teams.
//!
//! All three entry points share one precedence ladder:
//! 1. CREATE uses the acting principal as quota-owner; anything else loads
//!    the target and uses its owner.
//! 2. The quota-owner's context must resolve, otherwise the call is denied
//!    as a kind-specific "create not allowed".
//! 3. With a target, the principal's membership in the target's team is
//!    looked up; a failed lookup is logged and read as no membership.
//! 4. The action is dispatched: ownership and global role are checked
//!    before team membership, and unknown actions fail closed.

use accessgate_core::error::{AccessError, Result};
use accessgate_core::model::{Action, Membership, Principal, ResourceKind};

use crate::store::Stores;

use super::resolver::{OwnerContext, Resolver};

/// Owner and governing team of an existing resource.
#[derive(Debug, Clone)]
struct Target {
    owner: String,
    team: String,
}

/// Decision surface for resource actions and instance method calls.
///
/// Construct once with the store handles, then clone freely.
#[derive(Clone)]
pub struct AccessAuthorizer {
    pub(super) resolver: Resolver,
}

impl AccessAuthorizer {
    pub fn new(stores: Stores) -> Self {
        Self {
            resolver: Resolver::new(stores),
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// `project` is ignored for CREATE.
    #[tracing::instrument(skip(self, principal), fields(principal = %principal.id))]
    pub async fn validate_project_action(
        &self,
        principal: &Principal,
        action: Action,
        project: &str,
    ) -> Result<()> {
        let target = if action == Action::Create {
            None
        } else {
            let p = self.resolver.stores().resources.get_project(project).await?;
            Some(Target { owner: p.owner, team: p.team })
        };
        self.decide(principal, ResourceKind::Project, action, target).await
    }

    /// Instances are governed by their own owner and their project's team.
    #[tracing::instrument(skip(self, principal), fields(principal = %principal.id))]
    pub async fn validate_instance_action(
        &self,
        principal: &Principal,
        action: Action,
        project: &str,
        instance: &str,
    ) -> Result<()> {
        let target = if action == Action::Create {
            None
        } else {
            let stores = self.resolver.stores();
            let inst = stores.resources.get_instance(project, instance).await?;
            let proj = stores.resources.get_project(&inst.project).await?;
            Some(Target { owner: inst.owner, team: proj.team })
        };
        self.decide(principal, ResourceKind::Instance, action, target).await
    }

    #[tracing::instrument(skip(self, principal), fields(principal = %principal.id))]
    pub async fn validate_team_action(
        &self,
        principal: &Principal,
        action: Action,
        team: &str,
    ) -> Result<()> {
        let target = if action == Action::Create {
            None
        } else {
            let t = self.resolver.stores().members.get_team(team).await?;
            Some(Target { owner: t.owner, team: t.id })
        };
        self.decide(principal, ResourceKind::Team, action, target).await
    }

    async fn decide(
        &self,
        principal: &Principal,
        kind: ResourceKind,
        action: Action,
        target: Option<Target>,
    ) -> Result<()> {
        let quota_owner = target.as_ref().map_or(principal.id.as_str(), |t| t.owner.as_str());

        let ctx = match self.resolver.owner_context(quota_owner).await {
            Ok(ctx) => ctx,
            Err(e) => {
                tracing::warn!(%kind, owner = %quota_owner, error = %e, "owner context unavailable");
                return Err(AccessError::forbidden(kind, Action::Create));
            }
        };

        let membership = match &target {
            Some(t) => match self.resolver.team_membership(&t.team, &principal.id).await {
                Ok((_, m)) => m,
                Err(e) => {
                    tracing::warn!(%kind, team = %t.team, error = %e, "team membership unavailable");
                    Membership::None
                }
            },
            None => Membership::None,
        };

        let owner = target.as_ref().map(|t| t.owner.as_str());
        let outcome = dispatch(principal, kind, action, &ctx, owner, &membership);
        tracing::debug!(%kind, %action, allowed = outcome.is_ok(), "resource action evaluated");
        outcome
    }
}

/// Pure precedence ladder; first matching clause wins.
fn dispatch(
    principal: &Principal,
    kind: ResourceKind,
    action: Action,
    ctx: &OwnerContext,
    owner: Option<&str>,
    membership: &Membership,
) -> Result<()> {
    let is_owner = owner == Some(principal.id.as_str());

    let permitted = match action {
        Action::Create => {
            if !(principal.is_owner() || membership.is_joined_admin()) {
                return Err(AccessError::forbidden(kind, Action::Create));
            }
            return if ctx.summary.count(kind) < ctx.policy.max(kind) {
                Ok(())
            } else {
                Err(AccessError::QuotaExceeded(kind))
            };
        }
        Action::Update => is_owner || membership.is_joined_admin(),
        Action::Delete => principal.is_admin() || is_owner || membership.is_joined_admin(),
        Action::Access => principal.is_admin() || is_owner || membership.is_joined(),
        Action::Unknown => return Err(AccessError::Denied(kind)),
    };

    if permitted {
        Ok(())
    } else {
        Err(AccessError::forbidden(kind, action))
    }
}
