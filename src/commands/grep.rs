//! `grep` builtin.
//!
//! Searches a file or the input stream line by line with a Unicode-aware
//! regex. `-A` takes its count from the first positional argument unless it
//! was given as `-A=N`.

use async_trait::async_trait;
use crossterm::style::Stylize;
use regex::{Regex, RegexBuilder};

use super::{emit, fail, Builtin};
use crate::executor::ExecStatus;
use crate::io::IoEnvironment;
use crate::model::Command;
use crate::shell::ShellState;

const IGNORE_CASE: &str = "i";
const WHOLE_WORD: &str = "w";
const COLOR_SHORT: &str = "c";
const COLOR_LONG: &str = "color";
const AFTER_CONTEXT: &str = "A";

const USAGE: &str = "grep [options] <pattern> [file]";
const USAGE_AFTER_CONTEXT: &str = "grep [options] -A <number> <pattern> [file]";

pub struct GrepCommand;

/// Search settings resolved from one invocation.
#[derive(Debug)]
struct GrepArgs<'a> {
    pattern: &'a str,
    file: Option<&'a str>,
    after_context: usize,
    ignore_case: bool,
    whole_word: bool,
    color: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    Missing { usage: &'static str },
    BadContext,
}

impl<'a> GrepArgs<'a> {
    fn from_command(command: &'a Command) -> Result<Self, ArgsError> {
        let options = &command.options;
        let mut positional = command.args.iter().map(String::as_str);

        let (after_context, usage) = if options.contains(AFTER_CONTEXT) {
            let raw = match options.first(AFTER_CONTEXT) {
                Some(value) => value,
                None => {
                    if command.args.len() < 2 {
                        return Err(ArgsError::Missing {
                            usage: USAGE_AFTER_CONTEXT,
                        });
                    }
                    positional.next().unwrap_or_default()
                }
            };
            let count = raw.parse::<usize>().map_err(|_| ArgsError::BadContext)?;
            (count, USAGE_AFTER_CONTEXT)
        } else {
            (0, USAGE)
        };

        let pattern = positional.next().ok_or(ArgsError::Missing { usage })?;
        Ok(Self {
            pattern,
            file: positional.next(),
            after_context,
            ignore_case: options.contains(IGNORE_CASE),
            whole_word: options.contains(WHOLE_WORD),
            color: options.contains(COLOR_SHORT) || options.contains(COLOR_LONG),
        })
    }

    fn regex(&self) -> Result<Regex, regex::Error> {
        let source = if self.whole_word {
            format!(r"(?:^|\b){}(?:\b|$)", regex::escape(self.pattern))
        } else {
            self.pattern.to_string()
        };
        RegexBuilder::new(&source)
            .case_insensitive(self.ignore_case)
            .build()
    }
}

/// Wrap every match in red.
fn highlight(line: &str, regex: &Regex) -> String {
    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for found in regex.find_iter(line) {
        if found.as_str().is_empty() {
            continue;
        }
        out.push_str(&line[last..found.start()]);
        out.push_str(&found.as_str().red().to_string());
        last = found.end();
    }
    out.push_str(&line[last..]);
    out
}

/// Matching lines plus `after_context` trailing lines; a match inside the
/// window restarts it.
fn select_lines(lines: &[String], regex: &Regex, after_context: usize, color: bool) -> String {
    let mut out = String::new();
    let mut remaining = 0usize;
    for line in lines {
        if regex.is_match(line) {
            if color {
                out.push_str(&highlight(line, regex));
            } else {
                out.push_str(line);
            }
            out.push('\n');
            remaining = after_context;
        } else if remaining > 0 {
            out.push_str(line);
            out.push('\n');
            remaining -= 1;
        }
    }
    out
}

#[async_trait]
impl Builtin for GrepCommand {
    fn name(&self) -> &'static str {
        "grep"
    }

    fn help(&self) -> Option<&'static str> {
        Some(
            "Print lines matching a pattern.\n\
             grep [-i] [-w] [-c|--color] [-A N] <pattern> [file]\n",
        )
    }

    async fn execute(
        &self,
        command: &Command,
        state: &mut ShellState,
        io: &mut IoEnvironment<'_>,
    ) -> ExecStatus {
        let args = match GrepArgs::from_command(command) {
            Ok(args) => args,
            Err(ArgsError::Missing { usage }) => {
                return fail(
                    io,
                    &format!("grep: invalid number of arguments or empty input stream\n{usage}"),
                )
                .await
            }
            Err(ArgsError::BadContext) => {
                return fail(io, "grep: Invalid number for -A option").await
            }
        };

        let text = match args.file {
            Some(file) => {
                let path = state.fs.resolve(file);
                match tokio::fs::read_to_string(&path).await {
                    Ok(text) => text,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        return fail(io, &format!("grep: {file}: No such file or directory")).await
                    }
                    Err(e) => return fail(io, &format!("grep: {file}: {e}")).await,
                }
            }
            None => match io.read_all().await {
                Ok(text) => text,
                Err(e) => return fail(io, &format!("grep: {e}")).await,
            },
        };

        let regex = match args.regex() {
            Ok(regex) => regex,
            Err(e) => return fail(io, &format!("grep: invalid pattern: {e}")).await,
        };
        tracing::trace!(pattern = %regex.as_str(), "grep compiled pattern");

        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let selected = select_lines(&lines, &regex, args.after_context, args.color);
        emit(io, self.name(), &selected).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CommandOptions;
    use crate::testsupport::{command, run_builtin, Outcome, TestTempDir};

    async fn grep_file(content: &str, args: &[&str], flags: &[&str]) -> Outcome {
        let dir = TestTempDir::new("grep");
        dir.write_text("input.txt", content);
        let mut full: Vec<&str> = args.to_vec();
        full.push("input.txt");
        run_builtin(&GrepCommand, &command("grep", &full, flags), &mut dir.state(), "").await
    }

    async fn grep_input(input: &str, args: &[&str], flags: &[&str]) -> Outcome {
        let dir = TestTempDir::new("grep");
        run_builtin(&GrepCommand, &command("grep", args, flags), &mut dir.state(), input).await
    }

    #[tokio::test]
    async fn basic_pattern_matching() {
        let outcome = grep_file("hello world\ngoodbye world\napple banana", &["world"], &[]).await;
        assert_eq!(outcome.status, ExecStatus::SUCCESS);
        assert_eq!(outcome.out, "hello world\ngoodbye world\n");
    }

    #[tokio::test]
    async fn case_insensitive_matching() {
        let outcome = grep_file("Hello World\nhello world\nHELLO WORLD", &["hello"], &["i"]).await;
        assert_eq!(outcome.out, "Hello World\nhello world\nHELLO WORLD\n");
    }

    #[tokio::test]
    async fn whole_word_matching() {
        let content = [
            "hello",
            " hello ",
            "hello ",
            " hello world",
            "hello world",
            "world hello",
            " world hello ",
            "helloworld",
            "worldhello",
        ]
        .join("\n");
        let outcome = grep_file(&content, &["hello"], &["w"]).await;
        assert_eq!(
            outcome.out,
            "hello\n hello \nhello \n hello world\nhello world\nworld hello\n world hello \n"
        );
    }

    #[tokio::test]
    async fn whole_word_with_cyrillic() {
        let content = "и\n и \nи \n и\n и мир\nмир и\nигра\nмир\nпри\n";
        let outcome = grep_file(content, &["и"], &["w"]).await;
        assert_eq!(outcome.out, "и\n и \nи \n и\n и мир\nмир и\n");
    }

    #[tokio::test]
    async fn whole_word_escapes_pattern() {
        let outcome = grep_input("a.c\nabc\n", &["a.c"], &["w"]).await;
        assert_eq!(outcome.out, "a.c\n");
    }

    #[tokio::test]
    async fn after_context_extends_on_new_match() {
        let content = "line1\nline2\nmatch1\nline3\nline4\nmatch2\nline5";
        let outcome = grep_file(content, &["2", "match"], &["A"]).await;
        assert_eq!(outcome.status, ExecStatus::SUCCESS);
        assert_eq!(outcome.out, "match1\nline3\nline4\nmatch2\nline5\n");
    }

    #[tokio::test]
    async fn after_context_from_option_value() {
        let dir = TestTempDir::new("grep");
        let mut options = CommandOptions::new();
        options.insert_value("A", "1");
        let command = Command::new("grep", ["match"]).with_options(options);
        let outcome = run_builtin(
            &GrepCommand,
            &command,
            &mut dir.state(),
            "line1\nmatch1\nline2\nline3\nmatch2\nline4\n",
        )
        .await;
        assert_eq!(outcome.out, "match1\nline2\nmatch2\nline4\n");
    }

    #[tokio::test]
    async fn after_context_from_input() {
        let input = "line1\nmatch1\nline2\nline3\nmatch2\nline4\n";
        let outcome = grep_input(input, &["1", "match"], &["A"]).await;
        assert_eq!(outcome.out, "match1\nline2\nmatch2\nline4\n");
    }

    #[tokio::test]
    async fn invalid_after_context_value() {
        let outcome = grep_input("", &["not_a_number", "pattern", "file.txt"], &["A"]).await;
        assert_eq!(outcome.status, ExecStatus::FAILURE);
        assert_eq!(outcome.err, "grep: Invalid number for -A option\n");
    }

    #[tokio::test]
    async fn file_not_found() {
        let outcome = grep_input("", &["pattern", "nonexistent.txt"], &[]).await;
        assert_eq!(outcome.status, ExecStatus::FAILURE);
        assert_eq!(outcome.err, "grep: nonexistent.txt: No such file or directory\n");
    }

    #[tokio::test]
    async fn insufficient_arguments() {
        let outcome = grep_input("", &[], &[]).await;
        assert_eq!(outcome.status, ExecStatus::FAILURE);
        assert_eq!(
            outcome.err,
            "grep: invalid number of arguments or empty input stream\n\
             grep [options] <pattern> [file]\n"
        );
    }

    #[tokio::test]
    async fn invalid_pattern_is_reported() {
        let outcome = grep_input("x\n", &["("], &[]).await;
        assert_eq!(outcome.status, ExecStatus::FAILURE);
        assert!(outcome.err.starts_with("grep: invalid pattern: "));
    }

    #[tokio::test]
    async fn unicode_classes_match() {
        let content = "Паспорт: 11 22 345678\n\
                       Не паспорт: 123 45 6789\n\
                       Ещё паспорт: 99 88 123456\n\
                       Ещё не паспорт: 12 34 67890";
        let outcome = grep_file(content, &[r"\d{2} \d{2} \d{6}"], &[]).await;
        assert_eq!(outcome.out, "Паспорт: 11 22 345678\nЕщё паспорт: 99 88 123456\n");
    }

    #[tokio::test]
    async fn file_takes_precedence_over_input() {
        let dir = TestTempDir::new("grep");
        dir.write_text("f.txt", "file content\nshould be processed\n");
        let outcome = run_builtin(
            &GrepCommand,
            &command("grep", &["should", "f.txt"], &[]),
            &mut dir.state(),
            "stdin content\nshould be ignored\n",
        )
        .await;
        assert_eq!(outcome.out, "should be processed\n");
    }

    #[tokio::test]
    async fn empty_input_matches_nothing() {
        let outcome = grep_input("", &["pattern"], &[]).await;
        assert_eq!(outcome.status, ExecStatus::SUCCESS);
        assert!(outcome.out.is_empty());
    }

    #[tokio::test]
    async fn color_highlights_every_match() {
        let outcome = grep_input("a hello b hello\nnone\n", &["hello"], &["color"]).await;
        let red = "hello".red().to_string();
        assert_eq!(outcome.out, format!("a {red} b {red}\n"));
    }
}
