//! External command execution.
//!
//! Workflows never spawn processes directly; they go through a
//! [`CommandRunner`] so tests can substitute canned output.

use crate::{WorkflowError, WorkflowResult};
use async_trait::async_trait;
use lobster_util::TimingGuard;
use std::collections::HashMap;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Captured result of running a program to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Exit code, `None` if the process was killed by a signal
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    /// Create a successful output.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: Some(0),
        }
    }

    /// Create a failed output.
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code: Some(exit_code),
        }
    }

    /// Whether the program exited with status 0.
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Trimmed stderr, or trimmed stdout when stderr is empty.
    pub fn failure_message(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// Capability to run an external program.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, layering `env` over the inherited
    /// environment, and wait for it to exit.
    ///
    /// A non-zero exit is not an error at this level.
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        env: &HashMap<String, String>,
    ) -> WorkflowResult<CommandOutput>;
}

/// Runs programs on the host with `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        env: &HashMap<String, String>,
    ) -> WorkflowResult<CommandOutput> {
        debug!(program = %program, args = ?args, "Executing command");
        let _timing = TimingGuard::command(program);

        let mut command = Command::new(program);
        command
            .args(args)
            .envs(env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = command
            .output()
            .await
            .map_err(|e| WorkflowError::spawn(program, e))?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        })
    }
}

/// Run a program and require it to succeed.
///
/// A missing program becomes [`WorkflowError::CommandNotFound`] carrying
/// `install_hint`; a non-zero exit becomes [`WorkflowError::CommandFailed`].
pub async fn run_checked(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[String],
    env: &HashMap<String, String>,
    install_hint: &str,
) -> WorkflowResult<CommandOutput> {
    let output = match runner.execute(program, args, env).await {
        Ok(output) => output,
        Err(WorkflowError::Spawn { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            return Err(WorkflowError::CommandNotFound {
                program: program.to_string(),
                hint: install_hint.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    if !output.is_success() {
        return Err(WorkflowError::CommandFailed {
            program: program.to_string(),
            code: output.exit_code.unwrap_or(-1),
            message: output.failure_message().to_string(),
        });
    }

    Ok(output)
}
