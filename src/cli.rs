//! CLI argument parsing via clap.

use std::path::PathBuf;

use clap::Parser;
use clish::build_info;

/// A small interactive command shell with pipelines, variables and builtins.
#[derive(Debug, Parser)]
#[command(
    name = "clish",
    version,
    long_version = build_info::LONG_VERSION,
    after_help = build_info::HELP_BUILD_METADATA
)]
pub struct Args {
    /// Run one command line and exit with its status.
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    pub command: Option<String>,

    /// Path to config file (default: ./clish.toml or ~/.config/clish/clish.toml).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the prompt text.
    #[arg(long = "prompt")]
    pub prompt: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}
