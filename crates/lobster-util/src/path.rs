//! Path utilities.
//!
//! Resolution of the lobster state directory:
//! - `$LOBSTER_STATE_DIR` if set to a non-blank value
//! - `~/.lobster/state` otherwise

use crate::{Error, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// Environment variable overriding the state directory.
pub const STATE_DIR_ENV: &str = "LOBSTER_STATE_DIR";

/// Get the lobster home directory (`~/.lobster`).
pub fn lobster_home() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".lobster"))
}

/// Get the default state directory (`~/.lobster/state`).
pub fn default_state_dir() -> Option<PathBuf> {
    lobster_home().map(|p| p.join("state"))
}

/// Read the state directory override from an environment map.
///
/// Blank values are treated as unset.
pub fn state_dir_override(env: &HashMap<String, String>) -> Option<PathBuf> {
    env.get(STATE_DIR_ENV)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Resolve the state directory from an environment map, falling back to
/// the home-directory default.
pub fn resolve_state_dir(env: &HashMap<String, String>) -> Result<PathBuf> {
    state_dir_override(env)
        .or_else(default_state_dir)
        .ok_or_else(|| {
            Error::config(format!(
                "cannot determine state directory: no home directory and {STATE_DIR_ENV} is unset"
            ))
        })
}
