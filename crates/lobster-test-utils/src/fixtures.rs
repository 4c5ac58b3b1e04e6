//! Test fixtures for snapshot storage.

use lobster_state::{SnapshotStore, StateConfig};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary storage root, removed when dropped.
///
/// The root itself is a not-yet-existing subdirectory of the temp dir, so
/// tests also exercise on-demand creation.
///
/// # Example
///
/// ```rust
/// use lobster_test_utils::fixtures::TestStateDir;
///
/// let state = TestStateDir::new().with_raw_record("k1", "{ broken");
/// assert!(state.record_path("k1").exists());
/// ```
pub struct TestStateDir {
    temp_dir: TempDir,
    root: PathBuf,
}

impl TestStateDir {
    /// Create a fresh, empty storage root.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("state");
        Self { temp_dir, root }
    }

    /// Path of the storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the enclosing temp directory.
    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Configuration pointing at this root.
    pub fn config(&self) -> StateConfig {
        StateConfig::new(&self.root)
    }

    /// A snapshot store over this root.
    pub fn store(&self) -> SnapshotStore {
        SnapshotStore::new(self.config())
    }

    /// Path of the record file for `key`.
    pub fn record_path(&self, key: &str) -> PathBuf {
        self.store()
            .record_path(key)
            .expect("test keys must normalize")
    }

    /// Plant raw file content as the record for `key`.
    pub fn with_raw_record(self, key: &str, content: &str) -> Self {
        fs::create_dir_all(&self.root).expect("Failed to create state root");
        fs::write(self.record_path(key), content).expect("Failed to write record");
        self
    }

    /// Read and parse the record for `key`, `None` if it does not exist.
    pub fn read_record(&self, key: &str) -> Option<Value> {
        let content = fs::read_to_string(self.record_path(key)).ok()?;
        Some(serde_json::from_str(&content).expect("record should be valid JSON"))
    }

    /// Raw text of the record for `key`.
    pub fn read_raw_record(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.record_path(key)).ok()
    }
}

impl Default for TestStateDir {
    fn default() -> Self {
        Self::new()
    }
}
