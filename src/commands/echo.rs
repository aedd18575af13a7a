//! `echo` builtin.

use async_trait::async_trait;

use super::{emit, Builtin};
use crate::executor::ExecStatus;
use crate::io::IoEnvironment;
use crate::model::Command;
use crate::shell::ShellState;

const NO_NEWLINE: &str = "n";

pub struct EchoCommand;

#[async_trait]
impl Builtin for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn help(&self) -> Option<&'static str> {
        Some("Display a line of text.\n")
    }

    async fn execute(
        &self,
        command: &Command,
        _state: &mut ShellState,
        io: &mut IoEnvironment<'_>,
    ) -> ExecStatus {
        let mut text = command.args.join(" ");
        if !command.options.contains(NO_NEWLINE) {
            text.push('\n');
        }
        emit(io, self.name(), &text).await
    }
}
