//! Access-control records read by the decision engine.
//!
//! Storage backends own these records; the engine only reads them.

pub mod action;
pub mod membership;
pub mod policy;
pub mod principal;
pub mod resource;

pub use action::{Action, ResourceKind};
pub use membership::{MemberRole, MemberStatus, Membership, TeamMember};
pub use policy::{
    ApiKeyPolicy, InstanceAccess, InstancePolicy, MethodPolicy, PrincipalPolicy,
    SubscriptionPolicy, UserPolicy,
};
pub use principal::{ApiKey, GlobalRole, Principal, SubscriptionTier, User, API_KEY_TTL_SECS};
pub use resource::{Instance, Project, ResourceSummary, Team};
