//! `cd` builtin.

use async_trait::async_trait;

use super::{fail, Builtin};
use crate::executor::ExecStatus;
use crate::io::IoEnvironment;
use crate::model::Command;
use crate::shell::ShellState;

pub struct CdCommand;

#[async_trait]
impl Builtin for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn help(&self) -> Option<&'static str> {
        Some("Change current working directory\n")
    }

    async fn execute(
        &self,
        command: &Command,
        state: &mut ShellState,
        io: &mut IoEnvironment<'_>,
    ) -> ExecStatus {
        let target = match command.args.as_slice() {
            [] => state.fs.home().to_path_buf(),
            [dir] => state.fs.resolve(dir),
            _ => return fail(io, "cd: too many arguments").await,
        };

        match tokio::fs::metadata(&target).await {
            Ok(meta) if meta.is_dir() => {
                tracing::debug!(cwd = %target.display(), "changed directory");
                state.fs.change_dir(target);
                ExecStatus::SUCCESS
            }
            Ok(_) => fail(io, &format!("cd: not a directory ({})", target.display())).await,
            Err(_) => {
                fail(
                    io,
                    &format!("cd: directory doesn't exist ({})", target.display()),
                )
                .await
            }
        }
    }
}
