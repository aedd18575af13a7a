//! Environment variable overrides applied after the config file.

use super::Config;

pub(super) const PROMPT_ENV: &str = "CLISH_PROMPT";
pub(super) const NO_COLOR_ENV: &str = "CLISH_NO_COLOR";
pub(super) const LOG_ENV: &str = "CLISH_LOG";

pub(super) fn apply_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv)
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(prompt) = env_lookup(PROMPT_ENV) {
        config.prompt.text = prompt;
    }
    // Any non-empty value disables color.
    if env_lookup(NO_COLOR_ENV).is_some_and(|value| !value.is_empty()) {
        config.display.color = false;
    }
    if let Some(filter) = env_lookup(LOG_ENV) {
        if !filter.trim().is_empty() {
            config.logging.filter = filter;
        }
    }
}
