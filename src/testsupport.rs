//! Shared test fixtures for builtin, executor and shell test modules.
//!
//! Kept std-only apart from the async runtime so unit tests do not pull in
//! extra dependencies.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::commands::Builtin;
use crate::environment::Environment;
use crate::executor::ExecStatus;
use crate::filesystem::FileSystem;
use crate::io::IoEnvironment;
use crate::model::{Command, CommandOptions};
use crate::shell::ShellState;

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!(
            "clish-{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }

    /// Create a child directory (and its parents).
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.child(relative);
        fs::create_dir_all(&path).expect("failed to create fixture directory");
        path
    }

    /// Shell state whose working directory is this fixture.
    pub fn state(&self) -> ShellState {
        ShellState::new(Environment::new(), FileSystem::at(&self.path))
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Captured result of one command run.
#[derive(Debug)]
pub struct Outcome {
    pub status: ExecStatus,
    pub out: String,
    pub err: String,
}

/// Build a command with positional `args` and value-less `flags`.
pub fn command(name: &str, args: &[&str], flags: &[&str]) -> Command {
    Command::new(name, args.iter().copied())
        .with_options(CommandOptions::with_flags(flags.iter().copied()))
}

/// Run `builtin` directly against in-memory streams.
pub async fn run_builtin(
    builtin: &dyn Builtin,
    command: &Command,
    state: &mut ShellState,
    input: &str,
) -> Outcome {
    let mut input = input.as_bytes();
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let status = {
        let mut io = IoEnvironment::new(&mut input, &mut out, &mut err);
        builtin.execute(command, state, &mut io).await
    };
    Outcome {
        status,
        out: String::from_utf8_lossy(&out).into_owned(),
        err: String::from_utf8_lossy(&err).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
        assert!(fixture.mkdir("a/b").is_dir());
    }

    #[test]
    fn temp_dir_is_removed_on_drop() {
        let path = {
            let fixture = TestTempDir::new("drop");
            fixture.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn command_helper_sets_flags() {
        let c = command("wc", &["f"], &["l"]);
        assert_eq!(c.args, vec!["f"]);
        assert!(c.options.contains("l"));
    }
}
