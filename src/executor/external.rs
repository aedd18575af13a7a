//! Spawning host programs for commands that are not builtins.

use std::process::{ExitStatus, Stdio};

use tokio::io::AsyncWriteExt;

use super::ExecStatus;
use crate::error::ShellError;
use crate::io::IoEnvironment;
use crate::model::Command;
use crate::shell::ShellState;

const NOT_FOUND_STATUS: i32 = 127;
const NOT_EXECUTABLE_STATUS: i32 = 126;

/// Run `command` as a child process of the shell and wait for it.
///
/// Streams that are the process's own TTY stdio are inherited; everything else
/// is piped through `io`.
pub(super) async fn run(
    command: &Command,
    state: &ShellState,
    io: &mut IoEnvironment<'_>,
) -> Result<ExecStatus, ShellError> {
    let inherit_input = io.input_is_terminal();
    let inherit_output = io.output_is_terminal();

    // Buffered pipeline input is fully available before the child starts.
    let input = if inherit_input {
        None
    } else {
        Some(io.read_bytes().await?)
    };

    let mut cmd = tokio::process::Command::new(&command.name);
    // Abandoned pipeline futures must not leave children behind.
    cmd.kill_on_drop(true);
    cmd.args(&command.argv)
        .current_dir(state.fs.cwd())
        .env_clear()
        .envs(state.env.exported());
    cmd.stdin(if inherit_input {
        Stdio::inherit()
    } else {
        Stdio::piped()
    });
    if inherit_output {
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    } else {
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    }

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            io.write_error(&format!("{}: command not found\n", command.name))
                .await;
            return Ok(ExecStatus::Completed(NOT_FOUND_STATUS));
        }
        Err(e) => {
            io.write_error(&format!("{}: {e}\n", command.name)).await;
            return Ok(ExecStatus::Completed(NOT_EXECUTABLE_STATUS));
        }
    };
    tracing::debug!(program = %command.name, pid = ?child.id(), "spawned external command");

    let stdin_writer = match (input, child.stdin.take()) {
        (Some(bytes), Some(mut stdin)) => Some(tokio::spawn(async move {
            // A child that exits without reading closes the pipe early.
            let _ = stdin.write_all(&bytes).await;
        })),
        _ => None,
    };

    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();
    let (_, output, error) = io.streams();
    let copy_out = async {
        match stdout.as_mut() {
            Some(stdout) => tokio::io::copy(stdout, output).await.map(|_| ()),
            None => Ok(()),
        }
    };
    let copy_err = async {
        match stderr.as_mut() {
            Some(stderr) => tokio::io::copy(stderr, error).await.map(|_| ()),
            None => Ok(()),
        }
    };
    let (out_result, err_result) = tokio::join!(copy_out, copy_err);
    out_result?;
    err_result?;

    let status = child.wait().await?;
    if let Some(writer) = stdin_writer {
        let _ = writer.await;
    }
    let code = exit_code(status);
    tracing::debug!(program = %command.name, code, "external command finished");
    Ok(ExecStatus::Completed(code))
}

/// Exit code of a finished child; signal deaths map to `128 + signal`.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
