//! Workflow tests against a mock command runner and a temporary state root.

use lobster_test_utils::{MockCommandRunner, TestStateDir};
use lobster_workflows::{
    run_email_triage, run_github_pr_monitor, Bucket, CommandOutput, PrMonitorArgs, TriageArgs,
    WorkflowError,
};
use serde_json::json;

const PR_VIEW: &str = r#"{
  "number": 42,
  "title": "Add snapshot store",
  "state": "OPEN",
  "isDraft": false,
  "author": {"login": "octocat"},
  "updatedAt": "2024-05-01T10:00:00Z"
}"#;

#[tokio::test]
async fn pr_monitor_first_run_reports_change_and_persists() {
    let state = TestStateDir::new();
    let runner = MockCommandRunner::new().with_response("gh", CommandOutput::success(PR_VIEW));

    let report = run_github_pr_monitor(&runner, &state.store(), &PrMonitorArgs::new("owner/repo", 42))
        .await
        .unwrap();

    assert!(report.changed);
    assert_eq!(report.key, "github.pr:owner/repo#42");
    assert_eq!(report.pr_snapshot["title"], "Add snapshot store");
    assert_eq!(
        state.read_record("github.pr:owner/repo#42"),
        Some(report.pr_snapshot.clone())
    );

    let call = runner.last_execution().unwrap();
    assert_eq!(call.program, "gh");
    assert_eq!(&call.args[..5], &["pr", "view", "42", "--repo", "owner/repo"]);
}

#[tokio::test]
async fn pr_monitor_second_run_is_unchanged() {
    let state = TestStateDir::new();
    let runner = MockCommandRunner::new().with_response("gh", CommandOutput::success(PR_VIEW));
    let args = PrMonitorArgs::new("owner/repo", 42);

    run_github_pr_monitor(&runner, &state.store(), &args).await.unwrap();
    let report = run_github_pr_monitor(&runner, &state.store(), &args).await.unwrap();

    assert!(!report.changed);
    assert_eq!(runner.execution_count(), 2);
}

#[tokio::test]
async fn pr_monitor_detects_state_change() {
    let state = TestStateDir::new();
    let args = PrMonitorArgs::new("owner/repo", 42).with_key("my-pr");

    let open = MockCommandRunner::new()
        .with_response("gh", CommandOutput::success(r#"{"number":42,"state":"OPEN"}"#));
    run_github_pr_monitor(&open, &state.store(), &args).await.unwrap();

    let merged = MockCommandRunner::new()
        .with_response("gh", CommandOutput::success(r#"{"state":"MERGED","number":42}"#));
    let report = run_github_pr_monitor(&merged, &state.store(), &args).await.unwrap();

    assert!(report.changed);
    assert_eq!(state.read_record("my-pr"), Some(json!({"number": 42, "state": "MERGED"})));
}

#[tokio::test]
async fn pr_monitor_rejects_non_json() {
    let state = TestStateDir::new();
    let runner = MockCommandRunner::new().with_response("gh", CommandOutput::success("not json"));

    let err = run_github_pr_monitor(&runner, &state.store(), &PrMonitorArgs::new("o/r", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::InvalidOutput(_)));
    assert!(!state.root().exists());
}

#[tokio::test]
async fn pr_monitor_missing_gh() {
    let state = TestStateDir::new();
    let runner = MockCommandRunner::new().with_missing_program("gh");

    let err = run_github_pr_monitor(&runner, &state.store(), &PrMonitorArgs::new("o/r", 1))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "gh not found on PATH (install GitHub CLI)");
}

#[tokio::test]
async fn pr_monitor_surfaces_gh_failure() {
    let state = TestStateDir::new();
    let runner = MockCommandRunner::new()
        .with_response("gh", CommandOutput::failure(1, "could not resolve to a PullRequest\n"));

    let err = run_github_pr_monitor(&runner, &state.store(), &PrMonitorArgs::new("o/r", 999))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "gh failed (1): could not resolve to a PullRequest");
}

#[tokio::test]
async fn pr_monitor_requires_repo() {
    let state = TestStateDir::new();
    let runner = MockCommandRunner::new();

    let err = run_github_pr_monitor(&runner, &state.store(), &PrMonitorArgs::new("", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::MissingArgument { argument: "repo", .. }));
    assert_eq!(runner.execution_count(), 0);
}

#[tokio::test]
async fn pr_monitor_corrupted_record_is_state_error() {
    let state = TestStateDir::new().with_raw_record("github.pr:o/r#1", "{{{");
    let runner = MockCommandRunner::new().with_response("gh", CommandOutput::success("{}"));

    let err = run_github_pr_monitor(&runner, &state.store(), &PrMonitorArgs::new("o/r", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::State(ref e) if e.is_storage()));
    assert_eq!(state.read_raw_record("github.pr:o/r#1").as_deref(), Some("{{{"));
}

#[tokio::test]
async fn email_triage_classifies_messages() {
    let search = json!([
        {"id": "1", "from": "Billing <billing@example.com>", "subject": "Your invoice", "snippet": "Amount due"},
        {"id": "2", "from": "friend@example.com", "subject": "Dinner?", "snippet": "Are you around"},
        {"Id": "3", "From": "News <news@example.com>", "Subject": "Weekly newsletter", "Snippet": "unsubscribe here"}
    ]);
    let runner = MockCommandRunner::new()
        .with_response("gog", CommandOutput::success(search.to_string()));

    let report = run_email_triage(&runner, &TriageArgs::default()).await.unwrap();

    assert_eq!(report.summary.total, 3);
    assert_eq!(report.summary.needs_action, 1);
    assert_eq!(report.summary.needs_reply, 1);
    assert_eq!(report.summary.fyi, 1);
    assert_eq!(report.items[0].from_email, "billing@example.com");
    assert_eq!(report.items[0].reason, "finance keyword");
    assert_eq!(report.items[2].bucket, Bucket::Fyi);
    assert_eq!(report.buckets.needs_reply[0].subject, "Dinner?");
}

#[tokio::test]
async fn email_triage_passes_account_and_query() {
    let runner = MockCommandRunner::new().with_response("gog", CommandOutput::success(""));
    let args = TriageArgs {
        query: "is:unread".to_string(),
        max: 5,
        account: Some("me@example.com".to_string()),
    };

    let report = run_email_triage(&runner, &args).await.unwrap();

    assert_eq!(report.summary.total, 0);
    assert_eq!(report.query, "is:unread");
    assert_eq!(report.max, 5);

    let call = runner.last_execution().unwrap();
    assert_eq!(
        call.args,
        vec!["gmail", "search", "is:unread", "--max", "5", "--json", "--no-input"]
    );
    assert_eq!(call.env.get("GOG_ACCOUNT").map(String::as_str), Some("me@example.com"));
}

#[tokio::test]
async fn email_triage_missing_gog() {
    let runner = MockCommandRunner::new().with_missing_program("gog");

    let err = run_email_triage(&runner, &TriageArgs::default()).await.unwrap_err();

    assert!(matches!(err, WorkflowError::CommandNotFound { ref program, .. } if program == "gog"));
}

#[tokio::test]
async fn email_triage_rejects_non_json() {
    let runner = MockCommandRunner::new().with_response("gog", CommandOutput::success("<html>"));

    let err = run_email_triage(&runner, &TriageArgs::default()).await.unwrap_err();

    assert_eq!(err.to_string(), "gog gmail search returned non-JSON output");
}

#[tokio::test]
async fn email_triage_snapshot_round_trip() {
    // Triage output is typically piped into diff-last under a fixed key.
    let state = TestStateDir::new();
    let runner = MockCommandRunner::new()
        .with_response("gog", CommandOutput::success(r#"[{"id":"1","subject":"hi"}]"#));

    let report = run_email_triage(&runner, &TriageArgs::default()).await.unwrap();
    let value = serde_json::to_value(&report).unwrap();

    let store = state.store();
    assert!(store.compare_items("email.triage", vec![value.clone()]).await.unwrap().changed);
    assert!(!store.compare_items("email.triage", vec![value]).await.unwrap().changed);
}
