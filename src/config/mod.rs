//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`CLISH_PROMPT`, `CLISH_NO_COLOR`, `CLISH_LOG`)
//! 2. TOML file specified via the `--config` CLI flag
//! 3. `./clish.toml` in the current directory
//! 4. `$XDG_CONFIG_HOME/clish/clish.toml` (or `~/.config/clish/clish.toml`)
//! 5. Built-in defaults

mod defaults;
mod env;
mod loader;
mod sources;
mod types;

pub use loader::load_config;
pub use sources::config_root_dir;
pub use types::{
    Config, ConfigSource, DisplayConfig, LoadedConfig, LoggingConfig, PromptConfig, ShellConfig,
};
