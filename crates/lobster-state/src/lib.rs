//! Snapshot store and change detection for lobster.
//!
//! Callers hand the store a key and the current state of whatever they are
//! watching; the store answers whether that state differs from what it saw
//! last time, then remembers the new state.
//!
//! - Keys are normalized into safe file names (`key`)
//! - Equality uses a key-order independent encoding (`canonical`)
//! - Each key owns one pretty-printed JSON record under the storage root (`store`)
//!
//! # Example
//!
//! ```no_run
//! use lobster_state::{SnapshotStore, StateConfig};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SnapshotStore::new(StateConfig::new("/tmp/lobster-state"));
//!
//! let first = store.compare("github.pr:owner/repo#42", json!({"state": "OPEN"})).await?;
//! assert!(first.changed);
//! assert!(first.before.is_none());
//!
//! let second = store.compare("github.pr:owner/repo#42", json!({"state": "OPEN"})).await?;
//! assert!(!second.changed);
//! # Ok(())
//! # }
//! ```

pub mod canonical;
pub mod config;
mod error;
pub mod key;
mod snapshot;
mod store;

pub use canonical::{canonical_eq, stable_stringify};
pub use config::StateConfig;
pub use error::{StateError, StateResult, StorageCause};
pub use key::{normalize, NormalizedKey};
pub use snapshot::{collapse_items, ComparisonResult};
pub use store::SnapshotStore;
