//! accessgate core: the access-control data model and error surface.
//!
//! This crate defines the records the decision engine reads (principals,
//! projects, instances, teams, memberships, method policies) and the error
//! taxonomy shared by every caller. It carries no store or runtime
//! dependencies so transports and storage backends can reuse it directly.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `AccessError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;

/// Shared result type.
pub use error::{AccessError, ClientCode, Result};
