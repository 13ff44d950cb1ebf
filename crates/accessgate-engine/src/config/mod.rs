//! Config loader (strict parsing).

pub mod schema;
pub mod table;

use std::fs;

use accessgate_core::error::{AccessError, Result};

pub use schema::{AccessConfig, CheckSpec, CheckTarget, Expectation, SeedData};
pub use table::PolicyTable;

pub fn load_from_file(path: &str) -> Result<AccessConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| AccessError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AccessConfig> {
    let cfg: AccessConfig = serde_yaml::from_str(s)
        .map_err(|e| AccessError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
