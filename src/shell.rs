//! Shell state and line execution.

use crate::commands::BuiltinRegistry;
use crate::environment::Environment;
use crate::error::ShellError;
use crate::executor::{ExecStatus, ShellExecutor};
use crate::filesystem::FileSystem;
use crate::io::IoEnvironment;
use crate::parser::{self, STATUS_VARIABLE};
use crate::pipeline::PipelineExecutor;

/// Mutable state shared by every command of a session.
#[derive(Debug, Clone)]
pub struct ShellState {
    pub env: Environment,
    pub fs: FileSystem,
}

impl ShellState {
    pub fn new(env: Environment, fs: FileSystem) -> Self {
        Self { env, fs }
    }
}

/// A shell session: parses lines and runs them as pipelines.
pub struct Shell {
    pipeline: PipelineExecutor<ShellExecutor>,
    last_status: i32,
}

impl Shell {
    /// Session with the standard builtins.
    pub fn new(state: ShellState) -> Self {
        Self::with_registry(BuiltinRegistry::with_defaults(), state)
    }

    pub fn with_registry(registry: BuiltinRegistry, state: ShellState) -> Self {
        let mut shell = Self {
            pipeline: PipelineExecutor::new(ShellExecutor::new(registry, state)),
            last_status: 0,
        };
        shell.record_status(0);
        shell
    }

    pub fn state(&self) -> &ShellState {
        self.pipeline.executor().state()
    }

    pub fn state_mut(&mut self) -> &mut ShellState {
        self.pipeline.executor_mut().state_mut()
    }

    /// Status of the most recent line, `0` before anything ran.
    pub fn last_status(&self) -> i32 {
        self.last_status
    }

    /// Store `code` as the last status and in `$?`.
    pub fn record_status(&mut self, code: i32) {
        self.last_status = code;
        self.state_mut().env.set(STATUS_VARIABLE, code.to_string());
    }

    /// Parse and run one input line against `io`.
    ///
    /// Parse errors and blank lines leave the last status untouched.
    pub async fn run_line(
        &mut self,
        line: &str,
        io: &mut IoEnvironment<'_>,
    ) -> Result<ExecStatus, ShellError> {
        let pipeline = parser::parse(line, &self.state().env)?;
        if pipeline.is_empty() {
            return Ok(ExecStatus::SUCCESS);
        }
        let status = self.pipeline.execute(&pipeline, io).await?;
        self.record_status(status.code());
        Ok(status)
    }
}
