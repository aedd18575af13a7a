//! Unified error types for the shell.

use std::fmt;

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

/// Syntax errors found while tokenizing a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A single or double quote was opened but never closed.
    UnclosedQuote,
    /// A pipeline stage between `|` operators has no words.
    EmptyPipe,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnclosedQuote => write!(
                f,
                "Syntax error: String literal is not properly closed with a matching quote"
            ),
            Self::EmptyPipe => write!(
                f,
                "Syntax error: Pipe operator '|' cannot be empty \
                 (missing command on one or both sides)"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// ShellError — top-level
// ---------------------------------------------------------------------------

/// Top-level error type for the shell.
#[derive(Debug)]
pub enum ShellError {
    Parse(ParseError),
    Config(ConfigError),
    /// A shell-owned stream (not a single command's) failed.
    Io(std::io::Error),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Parse errors are shown to users verbatim.
            Self::Parse(e) => write!(f, "{e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for ShellError {}

impl From<ParseError> for ShellError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<ConfigError> for ShellError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<std::io::Error> for ShellError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
