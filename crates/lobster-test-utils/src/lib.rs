//! Testing utilities, fixtures, and mocks for lobster.
//!
//! - **Mocks**: a [`CommandRunner`](lobster_workflows::CommandRunner) that
//!   returns canned output and records what was run
//! - **Fixtures**: temporary storage roots for snapshot tests
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use lobster_test_utils::{MockCommandRunner, TestStateDir};
//! use lobster_workflows::CommandOutput;
//!
//! #[tokio::test]
//! async fn test_pr_monitor() {
//!     let state = TestStateDir::new();
//!     let runner = MockCommandRunner::new()
//!         .with_response("gh", CommandOutput::success(r#"{"number": 1}"#));
//!
//!     // run a workflow against state.store() and runner...
//!     assert!(runner.was_executed("gh"));
//! }
//! ```

pub mod fixtures;
pub mod mocks;

pub use fixtures::TestStateDir;
pub use mocks::{CommandExecution, MockCommandRunner};
