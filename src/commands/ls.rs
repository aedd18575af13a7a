//! `ls` builtin.

use async_trait::async_trait;

use super::{emit, fail, Builtin};
use crate::executor::ExecStatus;
use crate::io::IoEnvironment;
use crate::model::Command;
use crate::shell::ShellState;

pub struct LsCommand;

#[async_trait]
impl Builtin for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn help(&self) -> Option<&'static str> {
        Some("List files and directories in the current working directory.\n")
    }

    async fn execute(
        &self,
        command: &Command,
        state: &mut ShellState,
        io: &mut IoEnvironment<'_>,
    ) -> ExecStatus {
        let dir = match command.args.as_slice() {
            [] => state.fs.cwd().to_path_buf(),
            [arg] => state.fs.resolve(arg),
            _ => return fail(io, "ls can take arguments eq or less 1 arg").await,
        };
        let unresolved = || {
            format!(
                "ls: cannot resolve path: {}",
                command.args.first().map(String::as_str).unwrap_or(".")
            )
        };

        let mut read_dir = match tokio::fs::read_dir(&dir).await {
            Ok(read_dir) => read_dir,
            Err(_) => return fail(io, &unresolved()).await,
        };
        let mut entries = Vec::new();
        loop {
            match read_dir.next_entry().await {
                Ok(Some(entry)) => {
                    let mut name = entry.file_name().to_string_lossy().into_owned();
                    let is_dir = match entry.file_type().await {
                        Ok(kind) if kind.is_symlink() => tokio::fs::metadata(entry.path())
                            .await
                            .map(|meta| meta.is_dir())
                            .unwrap_or(false),
                        Ok(kind) => kind.is_dir(),
                        Err(_) => false,
                    };
                    if is_dir {
                        name.push('/');
                    }
                    entries.push(name);
                }
                Ok(None) => break,
                Err(_) => return fail(io, &unresolved()).await,
            }
        }
        entries.sort();

        let mut listing = String::new();
        for entry in entries {
            listing.push_str(&entry);
            listing.push('\n');
        }
        emit(io, self.name(), &listing).await
    }
}
