//! The interactive read-eval-print loop.

use crossterm::style::Stylize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::ShellError;
use crate::executor::ExecStatus;
use crate::io::IoEnvironment;
use crate::shell::Shell;

/// Status recorded for a line that failed to parse.
pub const PARSE_ERROR_STATUS: i32 = 2;

/// Presentation and stream settings for a session.
#[derive(Debug, Clone)]
pub struct ReplOptions {
    pub prompt: String,
    /// Style the prompt.
    pub color: bool,
    /// Print the prompt before each line; off when input is not a TTY.
    pub show_prompt: bool,
    /// Input is the process's stdin and it is a TTY, so external commands
    /// inherit it instead of reading buffered input.
    pub terminal_input: bool,
    /// Output is the process's stdout and it is a TTY.
    pub terminal_output: bool,
}

impl Default for ReplOptions {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            color: false,
            show_prompt: false,
            terminal_input: false,
            terminal_output: false,
        }
    }
}

impl ReplOptions {
    fn rendered_prompt(&self) -> String {
        if self.color {
            self.prompt.as_str().green().bold().to_string()
        } else {
            self.prompt.clone()
        }
    }
}

/// Run lines from `input` until end of input or `exit`.
///
/// Returns the session's exit code: the `exit` argument, or the last status
/// when input ends.
pub async fn run<R, W, E>(
    shell: &mut Shell,
    input: &mut R,
    output: &mut W,
    error: &mut E,
    options: &ReplOptions,
) -> Result<i32, ShellError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
    E: AsyncWrite + Unpin + Send,
{
    let prompt = options.rendered_prompt();
    loop {
        if options.show_prompt {
            output.write_all(prompt.as_bytes()).await?;
            output.flush().await?;
        }

        let mut raw = Vec::new();
        if input.read_until(b'\n', &mut raw).await? == 0 {
            tracing::debug!(status = shell.last_status(), "end of input");
            return Ok(shell.last_status());
        }
        let line = String::from_utf8_lossy(&raw);
        let line = line.trim_end_matches(['\n', '\r']);

        let mut io = IoEnvironment::new(&mut *input, &mut *output, &mut *error)
            .with_terminal(options.terminal_input, options.terminal_output);
        if let Some(code) = execute_line(shell, line, &mut io).await? {
            return Ok(code);
        }
    }
}

/// Run a single line, as for `clish -c`, and return the session exit code.
pub async fn run_once<R, W, E>(
    shell: &mut Shell,
    line: &str,
    input: &mut R,
    output: &mut W,
    error: &mut E,
    options: &ReplOptions,
) -> Result<i32, ShellError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
    E: AsyncWrite + Unpin + Send,
{
    let mut io = IoEnvironment::new(input, output, error)
        .with_terminal(options.terminal_input, options.terminal_output);
    let exit = execute_line(shell, line, &mut io).await?;
    Ok(exit.unwrap_or_else(|| shell.last_status()))
}

/// Run `line`; `Some(code)` means the session should end.
async fn execute_line(
    shell: &mut Shell,
    line: &str,
    io: &mut IoEnvironment<'_>,
) -> Result<Option<i32>, ShellError> {
    match shell.run_line(line, io).await {
        Ok(ExecStatus::Exit(code)) => Ok(Some(code)),
        Ok(ExecStatus::Completed(_)) => Ok(None),
        Err(ShellError::Parse(e)) => {
            io.write_error(&format!("{e}\n")).await;
            shell.record_status(PARSE_ERROR_STATUS);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
