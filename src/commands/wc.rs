//! `wc` builtin.

use async_trait::async_trait;

use super::{emit, fail, Builtin};
use crate::executor::ExecStatus;
use crate::io::IoEnvironment;
use crate::model::{Command, CommandOptions};
use crate::shell::ShellState;

const LINES: &str = "l";
const WORDS: &str = "w";
const BYTES: &str = "c";

pub struct WcCommand;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Counts {
    lines: usize,
    words: usize,
    bytes: usize,
}

impl Counts {
    /// Invalid UTF-8 still counts toward `bytes` at its raw length.
    fn of(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        Self {
            lines: text.lines().count(),
            words: text.split_whitespace().count(),
            bytes: bytes.len(),
        }
    }

    fn add(&mut self, other: Counts) {
        self.lines += other.lines;
        self.words += other.words;
        self.bytes += other.bytes;
    }

    /// One output line; with no column flags every column is shown.
    fn render(&self, options: &CommandOptions, name: Option<&str>) -> String {
        let all = ![LINES, WORDS, BYTES].iter().any(|flag| options.contains(flag));
        let mut columns = Vec::with_capacity(4);
        if all || options.contains(LINES) {
            columns.push(self.lines.to_string());
        }
        if all || options.contains(WORDS) {
            columns.push(self.words.to_string());
        }
        if all || options.contains(BYTES) {
            columns.push(self.bytes.to_string());
        }
        if let Some(name) = name {
            columns.push(name.to_string());
        }
        let mut line = columns.join(" ");
        line.push('\n');
        line
    }
}

#[async_trait]
impl Builtin for WcCommand {
    fn name(&self) -> &'static str {
        "wc"
    }

    fn help(&self) -> Option<&'static str> {
        Some("Print lines, words and bytes in file.\n")
    }

    async fn execute(
        &self,
        command: &Command,
        state: &mut ShellState,
        io: &mut IoEnvironment<'_>,
    ) -> ExecStatus {
        if command.args.is_empty() {
            return match io.read_bytes().await {
                Ok(bytes) => {
                    let line = Counts::of(&bytes).render(&command.options, None);
                    emit(io, self.name(), &line).await
                }
                Err(_) => fail(io, "wc: error reading input stream").await,
            };
        }

        let mut output = String::new();
        let mut total = Counts::default();
        for file in &command.args {
            let bytes = match tokio::fs::read(state.fs.resolve(file)).await {
                Ok(bytes) => bytes,
                Err(_) => return fail(io, &format!("wc: cannot read file {file}")).await,
            };
            let counts = Counts::of(&bytes);
            total.add(counts);
            output.push_str(&counts.render(&command.options, Some(file)));
        }
        if command.args.len() > 1 {
            output.push_str(&total.render(&command.options, Some("total")));
        }
        emit(io, self.name(), &output).await
    }
}
