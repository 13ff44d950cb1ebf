//! accessgate engine library entry.
//!
//! Wires the store seams, the ownership/membership resolver, the resource
//! decision engine, and the method-level evaluator into one
//! `AccessAuthorizer`. Consumed by request handlers in-process, by the
//! dry-run binary (`main.rs`), and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod context;
pub mod ops;
pub mod policy;
pub mod store;

pub use policy::AccessAuthorizer;
