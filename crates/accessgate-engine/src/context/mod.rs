//! Call context shared across layers.
//!
//! The engine never inspects tokens or claims; the boundary resolves a
//! fixed-shape `Principal` once per call and hands it in.

pub mod principal;

pub use principal::resolve_principal;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in unix seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
