//! Command dispatch: builtins first, then external programs.

mod external;

use async_trait::async_trait;

use crate::commands::BuiltinRegistry;
use crate::error::ShellError;
use crate::io::IoEnvironment;
use crate::model::Command;
use crate::shell::ShellState;

/// Result of running one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    /// The command finished with this status code.
    Completed(i32),
    /// The command asked the shell to end the session with this code.
    Exit(i32),
}

impl ExecStatus {
    pub const SUCCESS: ExecStatus = ExecStatus::Completed(0);
    pub const FAILURE: ExecStatus = ExecStatus::Completed(1);

    pub fn code(self) -> i32 {
        match self {
            ExecStatus::Completed(code) | ExecStatus::Exit(code) => code,
        }
    }

    pub fn is_exit(self) -> bool {
        matches!(self, ExecStatus::Exit(_))
    }
}

/// Runs a single parsed command against a set of streams.
#[async_trait]
pub trait CommandExecutor: Send {
    async fn execute(
        &mut self,
        command: &Command,
        io: &mut IoEnvironment<'_>,
    ) -> Result<ExecStatus, ShellError>;
}

/// Executor backed by the builtin registry and the host's programs.
pub struct ShellExecutor {
    registry: BuiltinRegistry,
    state: ShellState,
}

impl ShellExecutor {
    pub fn new(registry: BuiltinRegistry, state: ShellState) -> Self {
        Self { registry, state }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ShellState {
        &mut self.state
    }
}

#[async_trait]
impl CommandExecutor for ShellExecutor {
    async fn execute(
        &mut self,
        command: &Command,
        io: &mut IoEnvironment<'_>,
    ) -> Result<ExecStatus, ShellError> {
        if let Some(status) = self.registry.execute(command, &mut self.state, io).await {
            return Ok(status);
        }
        external::run(command, &self.state, io).await
    }
}
