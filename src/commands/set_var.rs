//! Assignment pseudo-command produced by the parser for `NAME=value`.

use async_trait::async_trait;

use super::{fail, Builtin};
use crate::executor::ExecStatus;
use crate::io::IoEnvironment;
use crate::model::Command;
use crate::parser::ASSIGNMENT_COMMAND;
use crate::shell::ShellState;

pub struct SetVariableCommand;

#[async_trait]
impl Builtin for SetVariableCommand {
    fn name(&self) -> &'static str {
        ASSIGNMENT_COMMAND
    }

    async fn execute(
        &self,
        command: &Command,
        state: &mut ShellState,
        io: &mut IoEnvironment<'_>,
    ) -> ExecStatus {
        match command.args.as_slice() {
            [name, value] => {
                state.env.set(name.as_str(), value.as_str());
                ExecStatus::SUCCESS
            }
            _ => fail(io, "incorrect set variable statement").await,
        }
    }
}
