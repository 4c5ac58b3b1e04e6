//! GitHub pull request monitor.
//!
//! Fetches a PR's current state with the `gh` CLI and reports whether it
//! changed since the last run.

use crate::exec::{run_checked, CommandRunner};
use crate::{WorkflowError, WorkflowResult};
use lobster_state::SnapshotStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::info;

const WORKFLOW: &str = "github.pr.monitor";

/// Fields requested from `gh pr view --json`.
pub const PR_VIEW_FIELDS: &str =
    "number,title,url,state,isDraft,mergeable,reviewDecision,author,baseRefName,headRefName,updatedAt";

/// Arguments for the PR monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrMonitorArgs {
    /// Repository in `owner/name` form.
    pub repo: String,
    /// Pull request number.
    pub pr: u64,
    /// Snapshot key; defaults to `github.pr:<repo>#<pr>`.
    pub key: Option<String>,
}

impl PrMonitorArgs {
    pub fn new(repo: impl Into<String>, pr: u64) -> Self {
        Self {
            repo: repo.into(),
            pr,
            key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Key the PR snapshot is stored under.
    pub fn state_key(&self) -> String {
        self.key
            .clone()
            .unwrap_or_else(|| format!("github.pr:{}#{}", self.repo, self.pr))
    }

    fn gh_args(&self) -> Vec<String> {
        vec![
            "pr".to_string(),
            "view".to_string(),
            self.pr.to_string(),
            "--repo".to_string(),
            self.repo.clone(),
            "--json".to_string(),
            PR_VIEW_FIELDS.to_string(),
        ]
    }
}

/// Result of one PR monitor run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename = "github.pr.monitor", rename_all = "camelCase")]
pub struct PrMonitorReport {
    pub repo: String,
    pub pr: u64,
    pub key: String,
    pub changed: bool,
    pub pr_snapshot: Value,
}

/// Fetch the PR and compare it with the last stored snapshot.
pub async fn run_github_pr_monitor(
    runner: &dyn CommandRunner,
    store: &SnapshotStore,
    args: &PrMonitorArgs,
) -> WorkflowResult<PrMonitorReport> {
    if args.repo.trim().is_empty() {
        return Err(WorkflowError::MissingArgument {
            workflow: WORKFLOW,
            argument: "repo",
        });
    }

    let key = args.state_key();
    let output = run_checked(
        runner,
        "gh",
        &args.gh_args(),
        &HashMap::new(),
        "install GitHub CLI",
    )
    .await?;

    let current: Value = serde_json::from_str(output.stdout.trim())
        .map_err(|_| WorkflowError::invalid_output("gh returned non-JSON output"))?;

    let comparison = store.compare(&key, current).await?;
    info!(repo = %args.repo, pr = args.pr, changed = comparison.changed, "PR monitor run");

    Ok(PrMonitorReport {
        repo: args.repo.clone(),
        pr: args.pr,
        key,
        changed: comparison.changed,
        pr_snapshot: comparison.after,
    })
}
