//! `cat` builtin.

use async_trait::async_trait;

use super::{emit, fail, Builtin};
use crate::executor::ExecStatus;
use crate::io::IoEnvironment;
use crate::model::Command;
use crate::shell::ShellState;

pub struct CatCommand;

#[async_trait]
impl Builtin for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn help(&self) -> Option<&'static str> {
        Some("Get files' content\n")
    }

    async fn execute(
        &self,
        command: &Command,
        state: &mut ShellState,
        io: &mut IoEnvironment<'_>,
    ) -> ExecStatus {
        if command.args.is_empty() {
            return match io.read_all().await {
                Ok(text) => emit(io, self.name(), &text).await,
                Err(_) => fail(io, "cat: error reading input stream").await,
            };
        }

        // Nothing is written unless every file reads.
        let mut content = String::new();
        for file in &command.args {
            match tokio::fs::read(state.fs.resolve(file)).await {
                Ok(bytes) => content.push_str(&String::from_utf8_lossy(&bytes)),
                Err(e) => {
                    tracing::debug!(file = %file, error = %e, "cat read failed");
                    return fail(io, &format!("cat: cannot read file {file}")).await;
                }
            }
        }
        emit(io, self.name(), &content).await
    }
}
