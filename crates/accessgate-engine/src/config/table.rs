use std::collections::HashMap;

use accessgate_core::error::{AccessError, Result};
use accessgate_core::model::{SubscriptionPolicy, SubscriptionTier};

use crate::store::SubscriptionPolicies;

/// Subscription tier -> quota lookup, built once from config.
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    tiers: HashMap<SubscriptionTier, SubscriptionPolicy>,
}

impl PolicyTable {
    pub fn new(policies: impl IntoIterator<Item = SubscriptionPolicy>) -> Self {
        let tiers = policies.into_iter().map(|p| (p.tier.clone(), p)).collect();
        Self { tiers }
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl SubscriptionPolicies for PolicyTable {
    fn subscription_policy(&self, tier: &SubscriptionTier) -> Result<SubscriptionPolicy> {
        self.tiers
            .get(tier)
            .cloned()
            .ok_or_else(|| AccessError::not_found("subscription policy", tier.to_string()))
    }
}
