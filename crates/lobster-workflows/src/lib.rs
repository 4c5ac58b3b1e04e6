//! Polling workflows for lobster.
//!
//! Each workflow gathers the current state of some external system through
//! a [`CommandRunner`] and shapes it into a JSON document:
//! - `github.pr.monitor`: one PR's state, diffed against the last run
//! - `email.triage`: recent mail sorted into reply / action / fyi buckets

pub mod email_triage;
mod error;
pub mod exec;
pub mod github_pr;

pub use email_triage::{run_email_triage, Bucket, TriageArgs, TriageReport, TriagedEmail};
pub use error::{WorkflowError, WorkflowResult};
pub use exec::{run_checked, CommandOutput, CommandRunner, ProcessRunner};
pub use github_pr::{run_github_pr_monitor, PrMonitorArgs, PrMonitorReport};
