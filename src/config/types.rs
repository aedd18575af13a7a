//! Configuration data model.

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults::{DEFAULT_LOG_FILTER, DEFAULT_PROMPT};

/// Top-level runtime configuration, mirroring the TOML layout.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub prompt: PromptConfig,
    pub display: DisplayConfig,
    pub shell: ShellConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PromptConfig {
    pub text: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Style the interactive prompt.
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShellConfig {
    /// Seed shell variables from the process environment at startup.
    pub import_env: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self { import_env: true }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive string.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Where the active config text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicit `--config` path.
    Explicit(PathBuf),
    /// `./clish.toml`.
    Local,
    /// `<config root>/clish/clish.toml`.
    Global(PathBuf),
    /// No file found.
    BuiltInDefaults,
}

/// Resolved config plus the source it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}
