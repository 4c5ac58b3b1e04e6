//! Snapshot store configuration.

use lobster_util::path::resolve_state_dir;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Configuration for a [`SnapshotStore`](crate::SnapshotStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Directory holding one `<normalized-key>.json` record per key.
    /// Created on first write, never removed.
    pub root: PathBuf,
}

impl StateConfig {
    /// Use an explicit storage root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the storage root from an environment map.
    ///
    /// `LOBSTER_STATE_DIR` wins when non-blank, otherwise `~/.lobster/state`.
    pub fn from_env_map(env: &HashMap<String, String>) -> lobster_util::Result<Self> {
        resolve_state_dir(env).map(Self::new)
    }

    /// Resolve the storage root from the process environment.
    pub fn from_env() -> lobster_util::Result<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::from_env_map(&env)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lobster_util::path::STATE_DIR_ENV;

    #[test]
    fn test_from_env_map_uses_override() {
        let mut env = HashMap::new();
        env.insert(STATE_DIR_ENV.to_string(), "/srv/lobster".to_string());
        let config = StateConfig::from_env_map(&env).unwrap();
        assert_eq!(config.root(), Path::new("/srv/lobster"));
    }

    #[test]
    fn test_from_env_map_default_is_under_home() {
        if lobster_util::path::default_state_dir().is_some() {
            let config = StateConfig::from_env_map(&HashMap::new()).unwrap();
            assert!(config.root().ends_with(".lobster/state"));
        }
    }
}
