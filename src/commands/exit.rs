//! `exit` builtin.

use async_trait::async_trait;

use super::Builtin;
use crate::executor::ExecStatus;
use crate::io::IoEnvironment;
use crate::model::Command;
use crate::shell::ShellState;

/// Status used when the exit code argument is not a number.
const USAGE_STATUS: i32 = 2;

pub struct ExitCommand;

#[async_trait]
impl Builtin for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    async fn execute(
        &self,
        command: &Command,
        _state: &mut ShellState,
        io: &mut IoEnvironment<'_>,
    ) -> ExecStatus {
        let Some(arg) = command.args.first() else {
            return ExecStatus::Exit(0);
        };
        match arg.parse::<i32>() {
            Ok(code) => ExecStatus::Exit(code),
            Err(_) => {
                io.write_error(&format!("exit: numeric argument required ({arg})\n"))
                    .await;
                ExecStatus::Exit(USAGE_STATUS)
            }
        }
    }
}
