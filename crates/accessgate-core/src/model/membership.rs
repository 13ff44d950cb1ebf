//! Team membership records and the resolved membership state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    #[default]
    Member,
    Admin,
}

/// Lifecycle of a principal's relationship to a team.
/// Only `Joined` confers any right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Invited,
    Joined,
    Expired,
    Removed,
}

/// Stored membership record; unique per (team, user).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamMember {
    pub team: String,
    pub user: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: MemberRole,
    pub status: MemberStatus,
    /// Invitation expiry, unix seconds.
    #[serde(default)]
    pub expires_at: Option<u64>,
}

impl TeamMember {
    pub fn key_for(team: &str, user: &str) -> String {
        format!("{team}:{user}")
    }

    pub fn key(&self) -> String {
        Self::key_for(&self.team, &self.user)
    }

    pub fn is_joined(&self) -> bool {
        self.status == MemberStatus::Joined
    }

    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }

    /// Status as of `now`: a pending invitation past its expiry reads as `Expired`.
    pub fn status_at(&self, now: u64) -> MemberStatus {
        match (self.status, self.expires_at) {
            (MemberStatus::Invited, Some(t)) if t <= now => MemberStatus::Expired,
            (s, _) => s,
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.status_at(now) == MemberStatus::Expired
    }
}

/// Acting principal's standing in a resource's team.
///
/// Absence of a record is a first-class state rather than an error; every
/// decision branches on it the same way as "not joined".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Membership {
    #[default]
    None,
    /// Principal owns the team; counts as a joined admin.
    TeamOwner,
    Member(TeamMember),
}

impl Membership {
    pub fn is_joined(&self) -> bool {
        match self {
            Membership::None => false,
            Membership::TeamOwner => true,
            Membership::Member(m) => m.is_joined(),
        }
    }

    pub fn is_joined_admin(&self) -> bool {
        match self {
            Membership::None => false,
            Membership::TeamOwner => true,
            Membership::Member(m) => m.is_joined() && m.is_admin(),
        }
    }
}
