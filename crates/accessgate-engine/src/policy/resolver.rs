//! Ownership & membership resolution shared by every decision.

use accessgate_core::error::Result;
use accessgate_core::model::{Membership, ResourceSummary, SubscriptionPolicy, Team, User};

use crate::store::Stores;

/// Quota context of the principal whose counts govern a decision.
#[derive(Debug, Clone)]
pub struct OwnerContext {
    pub owner: User,
    pub summary: ResourceSummary,
    pub policy: SubscriptionPolicy,
}

#[derive(Clone)]
pub struct Resolver {
    stores: Stores,
}

impl Resolver {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Owner record, usage summary, and the owner's tier policy.
    pub async fn owner_context(&self, owner_id: &str) -> Result<OwnerContext> {
        let owner = self.stores.members.get_user(owner_id).await?;
        let summary = self.stores.resources.get_owner_summary(owner_id).await?;
        let policy = self.stores.subscriptions.subscription_policy(&owner.tier)?;
        Ok(OwnerContext { owner, summary, policy })
    }

    /// Team plus the principal's standing in it.
    ///
    /// The team owner is always an implicit joined admin, whatever record
    /// they hold. Anyone else without a record is `Membership::None`.
    pub async fn team_membership(&self, team_id: &str, principal_id: &str) -> Result<(Team, Membership)> {
        let team = self.stores.members.get_team(team_id).await?;
        if team.is_owner(principal_id) {
            return Ok((team, Membership::TeamOwner));
        }

        let membership = self
            .stores
            .members
            .get_team_membership(&team.id, principal_id)
            .await?
            .map_or(Membership::None, Membership::Member);
        Ok((team, membership))
    }
}
