//! Builtin command system.
//!
//! Builtins are async trait objects looked up by name before the shell falls
//! back to spawning an external program. Each builtin reports its own failures
//! on the error stream and returns a non-zero status.

pub mod cat;
pub mod cd;
pub mod echo;
pub mod exit;
pub mod grep;
pub mod ls;
pub mod pwd;
pub mod set_var;
pub mod wc;

use async_trait::async_trait;

use crate::executor::ExecStatus;
use crate::io::IoEnvironment;
use crate::model::Command;
use crate::shell::ShellState;

/// Option that prints a builtin's help text instead of running it.
pub const HELP_OPTION: &str = "help";

// ---------------------------------------------------------------------------
// Builtin trait
// ---------------------------------------------------------------------------

/// A command implemented inside the shell.
#[async_trait]
pub trait Builtin: Send + Sync {
    /// Name the command is invoked by.
    fn name(&self) -> &'static str;

    /// Text printed for `--help`; `None` disables help handling.
    fn help(&self) -> Option<&'static str> {
        None
    }

    /// Run the command. Shell state is mutable so `cd` and assignments can
    /// update it.
    async fn execute(
        &self,
        command: &Command,
        state: &mut ShellState,
        io: &mut IoEnvironment<'_>,
    ) -> ExecStatus;
}

/// Write `text` to the command's output, reporting a failure as status 1.
pub(crate) async fn emit(io: &mut IoEnvironment<'_>, name: &str, text: &str) -> ExecStatus {
    match io.write_output(text).await {
        Ok(()) => ExecStatus::SUCCESS,
        Err(e) => {
            tracing::debug!(command = name, error = %e, "output stream write failed");
            io.write_error(&format!("{name}: cannot write to output stream\n"))
                .await;
            ExecStatus::FAILURE
        }
    }
}

/// Write `message` to the command's error stream and return status 1.
pub(crate) async fn fail(io: &mut IoEnvironment<'_>, message: &str) -> ExecStatus {
    io.write_error(&format!("{message}\n")).await;
    ExecStatus::FAILURE
}

// ---------------------------------------------------------------------------
// Builtin registry
// ---------------------------------------------------------------------------

/// Registry of builtins, searched by name.
pub struct BuiltinRegistry {
    builtins: Vec<Box<dyn Builtin>>,
}

impl BuiltinRegistry {
    /// Registry with no builtins.
    pub fn new() -> Self {
        Self {
            builtins: Vec::new(),
        }
    }

    /// Registry with every standard builtin.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(cat::CatCommand);
        registry.register(cd::CdCommand);
        registry.register(echo::EchoCommand);
        registry.register(exit::ExitCommand);
        registry.register(grep::GrepCommand);
        registry.register(ls::LsCommand);
        registry.register(pwd::PwdCommand);
        registry.register(set_var::SetVariableCommand);
        registry.register(wc::WcCommand);
        registry
    }

    /// Register a builtin. A later registration shadows an earlier one.
    pub fn register(&mut self, builtin: impl Builtin + 'static) {
        self.builtins.insert(0, Box::new(builtin));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Builtin> {
        self.builtins
            .iter()
            .find(|b| b.name() == name)
            .map(|b| &**b)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.builtins.iter().map(|b| b.name()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Run `command` if it names a builtin; `None` means it is not one.
    pub async fn execute(
        &self,
        command: &Command,
        state: &mut ShellState,
        io: &mut IoEnvironment<'_>,
    ) -> Option<ExecStatus> {
        let builtin = self.get(&command.name)?;
        if let Some(help) = builtin.help() {
            if command.options.contains(HELP_OPTION) {
                return Some(emit(io, builtin.name(), help).await);
            }
        }
        tracing::trace!(command = builtin.name(), "running builtin");
        Some(builtin.execute(command, state, io).await)
    }

    pub fn is_empty(&self) -> bool {
        self.builtins.is_empty()
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::FileSystem;
    use crate::model::CommandOptions;

    struct Shout;

    #[async_trait]
    impl Builtin for Shout {
        fn name(&self) -> &'static str {
            "echo"
        }
        fn help(&self) -> Option<&'static str> {
            Some("Shout.\n")
        }
        async fn execute(
            &self,
            command: &Command,
            _state: &mut ShellState,
            io: &mut IoEnvironment<'_>,
        ) -> ExecStatus {
            emit(io, self.name(), &command.args.join(" ").to_uppercase()).await
        }
    }

    async fn run(registry: &BuiltinRegistry, command: Command) -> (Option<ExecStatus>, String) {
        let mut state =
            ShellState::new(crate::environment::Environment::new(), FileSystem::at("/"));
        let mut input: &[u8] = b"";
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let status = {
            let mut io = IoEnvironment::new(&mut input, &mut out, &mut err);
            registry.execute(&command, &mut state, &mut io).await
        };
        (status, String::from_utf8(out).unwrap())
    }

    #[test]
    fn new_registry_is_empty() {
        assert!(BuiltinRegistry::new().is_empty());
    }

    #[test]
    fn defaults_register_every_builtin() {
        assert_eq!(
            BuiltinRegistry::with_defaults().names(),
            vec!["=", "cat", "cd", "echo", "exit", "grep", "ls", "pwd", "wc"]
        );
    }

    #[tokio::test]
    async fn unknown_command_is_not_handled() {
        let (status, _) = run(&BuiltinRegistry::with_defaults(), Command::new("nope", ["x"])).await;
        assert_eq!(status, None);
    }

    #[tokio::test]
    async fn later_registration_shadows_default() {
        let mut registry = BuiltinRegistry::with_defaults();
        registry.register(Shout);
        let (status, out) = run(&registry, Command::new("echo", ["hi"])).await;
        assert_eq!(status, Some(ExecStatus::SUCCESS));
        assert_eq!(out, "HI");
    }

    #[tokio::test]
    async fn help_option_prints_help_text() {
        let mut registry = BuiltinRegistry::new();
        registry.register(Shout);
        let command =
            Command::new("echo", ["hi"]).with_options(CommandOptions::with_flags(["help"]));
        let (status, out) = run(&registry, command).await;
        assert_eq!(status, Some(ExecStatus::SUCCESS));
        assert_eq!(out, "Shout.\n");
    }

    fn with_help(name: &str, args: &[&str]) -> Command {
        Command::new(name, args.to_vec()).with_options(CommandOptions::with_flags([HELP_OPTION]))
    }

    #[tokio::test]
    async fn every_default_builtin_help_text() {
        let registry = BuiltinRegistry::with_defaults();
        let expected = [
            ("cat", "Get files' content\n"),
            ("cd", "Change current working directory\n"),
            ("echo", "Display a line of text.\n"),
            (
                "grep",
                "Print lines matching a pattern.\n\
                 grep [-i] [-w] [-c|--color] [-A N] <pattern> [file]\n",
            ),
            ("ls", "List files and directories in the current working directory.\n"),
            ("pwd", "Get current work directory\n"),
            ("wc", "Print lines, words and bytes in file.\n"),
        ];
        for (name, help) in expected {
            let (status, out) = run(&registry, with_help(name, &["ignored"])).await;
            assert_eq!(status, Some(ExecStatus::SUCCESS), "{name}");
            assert_eq!(out, help, "{name}");
        }
    }

    #[tokio::test]
    async fn exit_ignores_help_option() {
        let (status, out) = run(&BuiltinRegistry::with_defaults(), with_help("exit", &[])).await;
        assert_eq!(status, Some(ExecStatus::Exit(0)));
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn assignment_ignores_help_option() {
        let (status, out) =
            run(&BuiltinRegistry::with_defaults(), with_help("=", &["x", "1"])).await;
        assert_eq!(status, Some(ExecStatus::SUCCESS));
        assert_eq!(out, "");
    }
}
