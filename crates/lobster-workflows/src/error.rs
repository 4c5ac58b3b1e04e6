//! Workflow error types.

use lobster_state::StateError;
use thiserror::Error;

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Errors that can occur while running a workflow.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The external program is not installed.
    #[error("{program} not found on PATH ({hint})")]
    CommandNotFound { program: String, hint: String },

    /// The program could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program exited unsuccessfully.
    #[error("{program} failed ({code}): {message}")]
    CommandFailed {
        program: String,
        code: i32,
        message: String,
    },

    /// The program printed something that is not what we expected.
    #[error("{0}")]
    InvalidOutput(String),

    /// A required workflow argument was not provided.
    #[error("{workflow} requires {argument}")]
    MissingArgument {
        workflow: &'static str,
        argument: &'static str,
    },

    /// Snapshot store failure.
    #[error(transparent)]
    State(#[from] StateError),
}

impl WorkflowError {
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }
}
