//! Top-level facade crate for accessgate.
//!
//! Re-exports the core model and the decision engine so users can depend on a single crate.

pub mod core {
    pub use accessgate_core::*;
}

pub mod engine {
    pub use accessgate_engine::*;
}
