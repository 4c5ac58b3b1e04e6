//! Snapshot store implementation.

use crate::canonical::stable_stringify;
use crate::key::{normalize, NormalizedKey};
use crate::snapshot::collapse_items;
use crate::{ComparisonResult, StateConfig, StateError, StateResult};
use lobster_util::TimingGuard;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// File-backed store of the last snapshot seen for each key.
///
/// Records live flat under the root directory:
/// ```text
/// root/
///   github.pr_owner_repo_42.json
///   email.triage.json
/// ```
///
/// One writer per key is assumed. Two concurrent `compare` calls on the
/// same key race: the later write wins and either caller may have diffed
/// against a stale `before`.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Create a store. Nothing is touched on disk until the first compare.
    pub fn new(config: StateConfig) -> Self {
        Self { root: config.root }
    }

    /// Storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the record file backing `key`.
    pub fn record_path(&self, key: &str) -> StateResult<PathBuf> {
        Ok(self.path_for(&normalize(key)?))
    }

    fn path_for(&self, key: &NormalizedKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    /// Read the stored snapshot for `key` without writing anything.
    ///
    /// Returns `None` if no record exists; a corrupted record is an error.
    pub async fn load(&self, key: &str) -> StateResult<Option<Value>> {
        let path = self.record_path(key)?;
        read_record(&path).await
    }

    /// Collapse `items` into one snapshot and compare it against the stored one.
    ///
    /// A single item is stored as itself, anything else as a sequence.
    pub async fn compare_items(
        &self,
        key: &str,
        items: Vec<Value>,
    ) -> StateResult<ComparisonResult> {
        self.compare(key, collapse_items(items)).await
    }

    /// Compare `after` against the stored snapshot for `key`, then store `after`.
    ///
    /// The record is rewritten even when nothing changed. If the existing
    /// record cannot be read or parsed, nothing is written.
    pub async fn compare(&self, key: &str, after: Value) -> StateResult<ComparisonResult> {
        let normalized = normalize(key)?;
        let path = self.path_for(&normalized);
        let _timing = TimingGuard::new("state", normalized.as_str());

        let before = read_record(&path).await?;
        let changed = stable_stringify(before.as_ref()) != stable_stringify(Some(&after));

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StateError::io(&self.root, e))?;
        write_record(&path, &after).await?;

        if changed {
            info!(key = %key, record = %normalized, first = before.is_none(), "Snapshot changed");
        } else {
            debug!(key = %key, record = %normalized, "Snapshot unchanged");
        }

        Ok(ComparisonResult {
            key: key.to_string(),
            changed,
            before,
            after,
        })
    }
}

async fn read_record(path: &Path) -> StateResult<Option<Value>> {
    debug!(path = %path.display(), "Reading snapshot record");

    match fs::read_to_string(path).await {
        Ok(content) => serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StateError::parse(path, e)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StateError::io(path, e)),
    }
}

/// Write `value` pretty-printed with a trailing newline, atomically
/// (write to a sibling temp file, then rename over the record).
async fn write_record(path: &Path, value: &Value) -> StateResult<()> {
    debug!(path = %path.display(), "Writing snapshot record");

    let content = format!("{value:#}\n");

    let temp_path = path.with_extension("json.tmp");
    if let Err(e) = fs::write(&temp_path, &content).await {
        remove_temp(&temp_path).await;
        return Err(StateError::io(&temp_path, e));
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        remove_temp(&temp_path).await;
        return Err(StateError::io(path, e));
    }

    Ok(())
}

async fn remove_temp(temp_path: &Path) {
    match fs::remove_file(temp_path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            warn!(path = %temp_path.display(), error = %e, "Failed to remove temp record");
        }
    }
}
