//! Authorization layer.
//!
//! Composes ownership, team membership, subscription quotas, and
//! method-level allow-lists into admit/deny decisions. Stateless apart from
//! the injected store handles; safe to share across tasks via `Clone`.

pub mod engine;
pub mod method;
pub mod resolver;

pub use engine::AccessAuthorizer;
pub use method::granted_tier;
pub use resolver::{OwnerContext, Resolver};
