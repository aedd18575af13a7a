//! `pwd` builtin.

use async_trait::async_trait;

use super::{emit, fail, Builtin};
use crate::executor::ExecStatus;
use crate::io::IoEnvironment;
use crate::model::Command;
use crate::shell::ShellState;

pub struct PwdCommand;

#[async_trait]
impl Builtin for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn help(&self) -> Option<&'static str> {
        Some("Get current work directory\n")
    }

    async fn execute(
        &self,
        command: &Command,
        state: &mut ShellState,
        io: &mut IoEnvironment<'_>,
    ) -> ExecStatus {
        if !command.args.is_empty() {
            return fail(io, "pwd does not have args").await;
        }
        let line = format!("{}\n", state.fs.cwd().display());
        emit(io, self.name(), &line).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::{command, run_builtin, TestTempDir};

    #[tokio::test]
    async fn prints_working_directory() {
        let dir = TestTempDir::new("pwd");
        let mut state = dir.state();
        let expected = format!("{}\n", state.fs.cwd().display());
        let outcome = run_builtin(&PwdCommand, &command("pwd", &[], &[]), &mut state, "").await;
        assert_eq!(outcome.status, ExecStatus::SUCCESS);
        assert_eq!(outcome.out, expected);
    }

    #[tokio::test]
    async fn follows_change_dir() {
        let dir = TestTempDir::new("pwd");
        let mut state = dir.state();
        state.fs.change_dir("sub");
        let outcome = run_builtin(&PwdCommand, &command("pwd", &[], &[]), &mut state, "").await;
        assert!(outcome.out.trim_end().ends_with("sub"));
    }

    #[tokio::test]
    async fn rejects_arguments() {
        let dir = TestTempDir::new("pwd");
        let outcome =
            run_builtin(&PwdCommand, &command("pwd", &["x"], &[]), &mut dir.state(), "").await;
        assert_eq!(outcome.status, ExecStatus::FAILURE);
        assert_eq!(outcome.out, "");
        assert_eq!(outcome.err, "pwd does not have args\n");
    }
}
