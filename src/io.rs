//! Streams handed to a single command.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Buffered input stream type accepted by commands.
pub type InputStream<'a> = &'a mut (dyn AsyncBufRead + Unpin + Send);
/// Output stream type accepted by commands.
pub type OutputStream<'a> = &'a mut (dyn AsyncWrite + Unpin + Send);

/// Input, output, and error streams for one command invocation.
///
/// The terminal flags record whether a stream is the process's own stdio and
/// a TTY, so external commands can inherit it instead of going through a pipe.
pub struct IoEnvironment<'a> {
    input: InputStream<'a>,
    output: OutputStream<'a>,
    error: OutputStream<'a>,
    terminal_input: bool,
    terminal_output: bool,
}

impl<'a> IoEnvironment<'a> {
    /// Streams with no terminal attached.
    pub fn new(input: InputStream<'a>, output: OutputStream<'a>, error: OutputStream<'a>) -> Self {
        Self {
            input,
            output,
            error,
            terminal_input: false,
            terminal_output: false,
        }
    }

    /// Mark which streams are the process's stdin / stdout attached to a TTY.
    pub fn with_terminal(mut self, input: bool, output: bool) -> Self {
        self.terminal_input = input;
        self.terminal_output = output;
        self
    }

    pub fn input_is_terminal(&self) -> bool {
        self.terminal_input
    }

    pub fn output_is_terminal(&self) -> bool {
        self.terminal_output
    }

    /// Read the remaining input as raw bytes.
    pub async fn read_bytes(&mut self) -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.input.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Read the remaining input as text, replacing invalid UTF-8.
    pub async fn read_all(&mut self) -> std::io::Result<String> {
        let bytes = self.read_bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read the next line without its terminator; `None` at end of input.
    pub async fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Write to the output stream and flush it.
    pub async fn write_output(&mut self, text: &str) -> std::io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }

    /// Write to the error stream, ignoring failures.
    pub async fn write_error(&mut self, text: &str) {
        let _ = self.error.write_all(text.as_bytes()).await;
        let _ = self.error.flush().await;
    }

    /// Borrow input, output, and error at once.
    pub fn streams(&mut self) -> (InputStream<'_>, OutputStream<'_>, OutputStream<'_>) {
        (&mut *self.input, &mut *self.output, &mut *self.error)
    }
}
