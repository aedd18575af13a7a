//! clish — a small interactive command shell.
//!
//! A line is tokenized, expanded against the shell's variables, and run as a
//! pipeline of builtins and external programs.
//!
//! # Quick start
//!
//! ```no_run
//! use clish::environment::Environment;
//! use clish::filesystem::FileSystem;
//! use clish::io::IoEnvironment;
//! use clish::shell::{Shell, ShellState};
//!
//! # async fn example() {
//! let fs = FileSystem::from_process().unwrap();
//! let mut shell = Shell::new(ShellState::new(Environment::new(), fs));
//! let mut input: &[u8] = b"";
//! let (mut out, mut err) = (Vec::new(), Vec::new());
//! let mut io = IoEnvironment::new(&mut input, &mut out, &mut err);
//! shell.run_line("echo hello | wc -w", &mut io).await.unwrap();
//! # }
//! ```

pub mod build_info;
pub mod commands;
pub mod config;
pub mod environment;
pub mod error;
pub mod executor;
pub mod filesystem;
pub mod io;
pub mod logging;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod repl;
pub mod shell;
#[cfg(test)]
pub mod testsupport;
