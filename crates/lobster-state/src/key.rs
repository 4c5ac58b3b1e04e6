//! Key normalization.
//!
//! Caller keys such as `github.pr:owner/repo#42` are mapped onto file names
//! made only of `[a-z0-9._-]`: the key is lower-cased, every run of other
//! characters (and of `_`) becomes a single `_`, and leading or trailing `_`
//! is dropped. Distinct keys that normalize identically share one record.

use crate::{StateError, StateResult};
use std::fmt;

/// File extension of snapshot records.
pub const RECORD_EXTENSION: &str = "json";

/// A key that is safe to use as a file name stem. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    /// Get the normalized key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Record file name for this key, e.g. `github.pr_owner_repo_42.json`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, RECORD_EXTENSION)
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '.' | '-')
}

/// Normalize a caller key.
///
/// Fails with [`StateError::InvalidKey`] when the key is empty or nothing
/// survives normalization (e.g. `"###"`).
pub fn normalize(key: &str) -> StateResult<NormalizedKey> {
    if key.is_empty() {
        return Err(StateError::invalid_key("key is empty"));
    }

    let mut safe = String::with_capacity(key.len());
    for c in key.to_lowercase().chars() {
        if is_key_char(c) {
            safe.push(c);
        } else if !safe.ends_with('_') {
            safe.push('_');
        }
    }

    let safe = safe.trim_matches('_');
    if safe.is_empty() {
        return Err(StateError::invalid_key(format!(
            "key {key:?} has no usable characters"
        )));
    }

    Ok(NormalizedKey(safe.to_string()))
}
