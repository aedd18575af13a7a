//! Sequential pipeline execution with buffered hand-off between stages.

use crate::error::ShellError;
use crate::executor::{CommandExecutor, ExecStatus};
use crate::io::{InputStream, IoEnvironment, OutputStream};
use crate::model::Pipeline;

/// Runs every stage of a pipeline through one [`CommandExecutor`].
pub struct PipelineExecutor<E> {
    executor: E,
}

impl<E: CommandExecutor> PipelineExecutor<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    /// Run `pipeline` against the shell's streams in `io`.
    ///
    /// The first stage reads the shell's input and the last writes the shell's
    /// output; stages in between exchange fully buffered output. Every stage
    /// shares the shell's error stream. An `Exit` stops the pipeline at once.
    pub async fn execute(
        &mut self,
        pipeline: &Pipeline,
        io: &mut IoEnvironment<'_>,
    ) -> Result<ExecStatus, ShellError> {
        let Some(last) = pipeline.commands.len().checked_sub(1) else {
            return Ok(ExecStatus::SUCCESS);
        };
        let (terminal_input, terminal_output) = (io.input_is_terminal(), io.output_is_terminal());
        let (input, output, error) = io.streams();

        let mut status = ExecStatus::SUCCESS;
        let mut carried: Vec<u8> = Vec::new();
        for (index, command) in pipeline.commands.iter().enumerate() {
            let previous = std::mem::take(&mut carried);
            let mut previous_slice: &[u8] = &previous;
            let mut captured: Vec<u8> = Vec::new();

            let stage_input: InputStream<'_> = if index == 0 {
                &mut *input
            } else {
                &mut previous_slice
            };
            let stage_output: OutputStream<'_> = if index == last {
                &mut *output
            } else {
                &mut captured
            };

            tracing::trace!(stage = index, command = %command.name, "running pipeline stage");
            status = {
                let mut stage_io = IoEnvironment::new(stage_input, stage_output, &mut *error)
                    .with_terminal(index == 0 && terminal_input, index == last && terminal_output);
                self.executor.execute(command, &mut stage_io).await?
            };
            if status.is_exit() {
                return Ok(status);
            }
            carried = captured;
        }
        Ok(status)
    }
}
