//! Default configuration values.

/// File name looked up in the working directory and the config root.
pub(super) const CONFIG_FILE_NAME: &str = "clish.toml";
/// Directory under the config root holding the global config file.
pub(super) const CONFIG_DIR_NAME: &str = "clish";
/// Prompt printed before each interactive line.
pub(super) const DEFAULT_PROMPT: &str = "> ";
/// Log filter used when neither config nor environment sets one.
pub(super) const DEFAULT_LOG_FILTER: &str = "warn";
