//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

/// Variable whose directives replace the configured filter when set.
pub const RUST_LOG_ENV: &str = "RUST_LOG";

/// Pick the filter directives: `RUST_LOG` when set, else `configured`.
pub fn filter_directives<FEnv>(configured: &str, env_lookup: FEnv) -> String
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(RUST_LOG_ENV)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}

/// Install the global subscriber. Invalid directives fall back to `warn`.
pub fn init(configured: &str) {
    let directives = filter_directives(configured, |name| std::env::var(name).ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second install (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
