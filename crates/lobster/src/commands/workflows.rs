//! Workflow commands.

use super::print_json;
use lobster_state::SnapshotStore;
use lobster_workflows::{
    run_email_triage, run_github_pr_monitor, PrMonitorArgs, ProcessRunner, TriageArgs,
};

/// Handle `lobster github-pr-monitor`.
pub async fn handle_github_pr_monitor(
    store: &SnapshotStore,
    repo: String,
    pr: u64,
    key: Option<String>,
) -> anyhow::Result<()> {
    let args = PrMonitorArgs { repo, pr, key };
    let report = run_github_pr_monitor(&ProcessRunner::new(), store, &args).await?;
    print_json(&report)
}

/// Handle `lobster email-triage`.
pub async fn handle_email_triage(
    query: String,
    max: u32,
    account: Option<String>,
) -> anyhow::Result<()> {
    let args = TriageArgs {
        query,
        max,
        account,
    };
    let report = run_email_triage(&ProcessRunner::new(), &args).await?;
    print_json(&report)
}
