//! Logical working directory tracking.
//!
//! `cd` never calls `std::env::set_current_dir`; builtins and child processes
//! resolve paths against the shell's own `cwd` instead.

use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileSystem {
    /// Directory the shell was launched in; target of a bare `cd`.
    home: PathBuf,
    cwd: PathBuf,
}

impl FileSystem {
    /// Start in the process's current directory.
    pub fn from_process() -> std::io::Result<Self> {
        Ok(Self::at(std::env::current_dir()?))
    }

    /// Start in `dir`, which also becomes the home directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        let home = normalize(&dir.into());
        Self {
            cwd: home.clone(),
            home,
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Resolve `path` against `cwd` and normalize it lexically.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&self.cwd.join(path))
        }
    }

    /// Move `cwd` to `path`; existence is the caller's concern.
    pub fn change_dir(&mut self, path: impl AsRef<Path>) {
        self.cwd = self.resolve(path);
    }
}

/// Drop `.` components and fold `..` into its parent without touching disk.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}
