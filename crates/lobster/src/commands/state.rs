//! Snapshot store setup.

use anyhow::Context;
use lobster_state::{SnapshotStore, StateConfig};
use std::path::PathBuf;
use tracing::debug;

/// Open the snapshot store, preferring an explicit `--state-dir` over the
/// environment and home-directory defaults.
pub fn open_store(state_dir: Option<PathBuf>) -> anyhow::Result<SnapshotStore> {
    let config = match state_dir {
        Some(dir) => StateConfig::new(dir),
        None => StateConfig::from_env().context("Failed to resolve state directory")?,
    };
    debug!(root = %config.root().display(), "Using state directory");
    Ok(SnapshotStore::new(config))
}
