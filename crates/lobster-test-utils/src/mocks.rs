//! Mock implementations for testing.

use async_trait::async_trait;
use lobster_workflows::{CommandOutput, CommandRunner, WorkflowError, WorkflowResult};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// A mock command runner for testing workflows without spawning processes.
///
/// Responses are configured per program name. Every call is recorded.
///
/// # Example
///
/// ```rust
/// use lobster_test_utils::mocks::MockCommandRunner;
/// use lobster_workflows::CommandOutput;
///
/// let runner = MockCommandRunner::new()
///     .with_response("gh", CommandOutput::success("{}"))
///     .with_missing_program("gog");
///
/// assert_eq!(runner.execution_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct MockCommandRunner {
    /// Recorded command executions.
    executions: Arc<Mutex<Vec<CommandExecution>>>,
    /// Configured responses (program -> output).
    responses: Arc<Mutex<HashMap<String, CommandOutput>>>,
    /// Programs that behave as if they were not installed.
    missing: Arc<Mutex<HashSet<String>>>,
}

/// A recorded command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandExecution {
    pub program: String,
    pub args: Vec<String>,
    /// Environment overrides passed to the runner.
    pub env: HashMap<String, String>,
}

impl MockCommandRunner {
    /// Create a mock runner. Unconfigured programs succeed with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the output for `program`.
    pub fn with_response(self, program: &str, output: CommandOutput) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(program.to_string(), output);
        self
    }

    /// Make `program` fail to spawn as if it were not on PATH.
    pub fn with_missing_program(self, program: &str) -> Self {
        self.missing.lock().unwrap().insert(program.to_string());
        self
    }

    /// Get all recorded command executions.
    pub fn executions(&self) -> Vec<CommandExecution> {
        self.executions.lock().unwrap().clone()
    }

    /// Get the number of commands executed.
    pub fn execution_count(&self) -> usize {
        self.executions.lock().unwrap().len()
    }

    /// Check if `program` was executed.
    pub fn was_executed(&self, program: &str) -> bool {
        self.executions
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.program == program)
    }

    /// Get the last executed command.
    pub fn last_execution(&self) -> Option<CommandExecution> {
        self.executions.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        env: &HashMap<String, String>,
    ) -> WorkflowResult<CommandOutput> {
        self.executions.lock().unwrap().push(CommandExecution {
            program: program.to_string(),
            args: args.to_vec(),
            env: env.clone(),
        });

        if self.missing.lock().unwrap().contains(program) {
            return Err(WorkflowError::spawn(
                program,
                std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
            ));
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(program)
            .cloned()
            .unwrap_or_else(|| CommandOutput::success("")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_runner_records_and_responds() {
        let runner = MockCommandRunner::new().with_response("gh", CommandOutput::success("{}"));

        let output = runner
            .execute("gh", &["pr".to_string()], &HashMap::new())
            .await
            .unwrap();

        assert_eq!(output.stdout, "{}");
        assert!(runner.was_executed("gh"));
        assert_eq!(runner.last_execution().unwrap().args, vec!["pr"]);
    }

    #[tokio::test]
    async fn test_mock_runner_default_is_empty_success() {
        let runner = MockCommandRunner::new();
        let output = runner.execute("anything", &[], &HashMap::new()).await.unwrap();
        assert!(output.is_success());
        assert!(output.stdout.is_empty());
    }

    #[tokio::test]
    async fn test_mock_runner_missing_program() {
        let runner = MockCommandRunner::new().with_missing_program("gog");
        let err = runner.execute("gog", &[], &HashMap::new()).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Spawn { .. }));
        assert_eq!(runner.execution_count(), 1);
    }
}
