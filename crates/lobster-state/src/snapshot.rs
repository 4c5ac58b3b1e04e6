//! Comparison results and item collapsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of comparing a new snapshot against the stored one.
///
/// Serializes as `{"kind": "diff.last", "key", "changed", "before", "after"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename = "diff.last")]
pub struct ComparisonResult {
    /// The caller's key, as given (not normalized).
    pub key: String,

    /// Whether `after` differs from `before` under canonical equality.
    /// First observation of a key always counts as a change.
    pub changed: bool,

    /// The previously stored snapshot, `None` on first observation.
    pub before: Option<Value>,

    /// The snapshot that is now stored.
    pub after: Value,
}

impl ComparisonResult {
    /// Whether this was the first time the key was observed.
    pub fn is_first_observation(&self) -> bool {
        self.before.is_none()
    }
}

/// Collapse a sequence of items into one snapshot value.
///
/// Exactly one item collapses to that item; zero or several items stay a
/// sequence. Callers that always produce a single result rely on this, which
/// means `[x]` and `x` cannot be told apart once stored.
pub fn collapse_items(mut items: Vec<Value>) -> Value {
    if items.len() == 1 {
        items.swap_remove(0)
    } else {
        Value::Array(items)
    }
}
