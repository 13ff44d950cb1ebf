use std::fmt;

use serde::{Deserialize, Serialize};

/// Global (platform-wide) role of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GlobalRole {
    /// May create top-level resources, subject to quota.
    Owner,
    /// Platform administrator; may delete and access anything.
    Admin,
    #[default]
    #[serde(alias = "user")]
    Member,
}

/// Subscription plan name. Quotas are looked up by tier in the policy table.
///
/// The empty tier is the "no subscription level" sentinel reported when a
/// method-level check fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct SubscriptionTier(String);

impl SubscriptionTier {
    pub fn new(tier: impl Into<String>) -> Self {
        Self(tier.into())
    }

    /// The "no subscription level" sentinel.
    pub fn none() -> Self {
        Self(String::new())
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("<none>")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: GlobalRole,
    pub tier: SubscriptionTier,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl User {
    /// Fixed-shape principal for this user.
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id.clone(),
            role: self.role,
            tier: self.tier.clone(),
        }
    }
}

/// Authenticated actor, resolved once per call and immutable for its duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub role: GlobalRole,
    pub tier: SubscriptionTier,
}

impl Principal {
    pub fn new(id: impl Into<String>, role: GlobalRole, tier: SubscriptionTier) -> Self {
        Self { id: id.into(), role, tier }
    }

    pub fn is_owner(&self) -> bool {
        self.role == GlobalRole::Owner
    }

    pub fn is_admin(&self) -> bool {
        self.role == GlobalRole::Admin
    }
}

/// Lifetime given to keys stored without an explicit expiry (8760h).
pub const API_KEY_TTL_SECS: u64 = 8760 * 60 * 60;

/// API key record. `owner` is the user the key acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiKey {
    pub key: String,
    pub owner: String,
    #[serde(default)]
    pub created_at: u64,
    /// Unix seconds. Filled by `with_default_expiry` when the key is stored.
    #[serde(default)]
    pub expires_at: Option<u64>,
}

impl ApiKey {
    /// Stamps `created_at` with `now` when unset and fills a missing expiry
    /// with `created_at + API_KEY_TTL_SECS`.
    pub fn with_default_expiry(mut self, now: u64) -> Self {
        if self.created_at == 0 {
            self.created_at = now;
        }
        if self.expires_at.is_none() {
            self.expires_at = Some(self.created_at.saturating_add(API_KEY_TTL_SECS));
        }
        self
    }

    pub fn is_expired(&self, now: u64) -> bool {
        matches!(self.expires_at, Some(t) if t <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(created_at: u64, expires_at: Option<u64>) -> ApiKey {
        ApiKey { key: "k1".into(), owner: "alice".into(), created_at, expires_at }
    }

    #[test]
    fn stored_key_expires_after_a_year_by_default() {
        let k = key(0, None).with_default_expiry(1_000);
        assert_eq!(k.created_at, 1_000);
        assert_eq!(k.expires_at, Some(1_000 + API_KEY_TTL_SECS));
        assert!(!k.is_expired(1_000 + API_KEY_TTL_SECS - 1));
        assert!(k.is_expired(1_000 + API_KEY_TTL_SECS));

        let k = key(50, None).with_default_expiry(1_000);
        assert_eq!(k.expires_at, Some(50 + API_KEY_TTL_SECS));
    }

    #[test]
    fn explicit_expiry_is_kept() {
        let k = key(10, Some(20)).with_default_expiry(1_000);
        assert_eq!((k.created_at, k.expires_at), (10, Some(20)));
        assert!(k.is_expired(20));
    }
}
