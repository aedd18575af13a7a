//! Parsed command-line data model.

use std::collections::BTreeMap;

/// A run of characters inside one word that shares a quoting mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPart {
    pub text: String,
    /// `false` for single-quoted or backslash-escaped text.
    pub expand: bool,
    /// `true` for text inside quotes or escaped by a backslash.
    pub quoted: bool,
}

/// One shell word as produced by the tokenizer, before variable expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Word {
    pub parts: Vec<WordPart>,
}

impl Word {
    /// Append one character, merging it into the trailing part when the
    /// quoting mode matches.
    pub fn push(&mut self, c: char, expand: bool, quoted: bool) {
        match self.parts.last_mut() {
            Some(last) if last.expand == expand && last.quoted == quoted => last.text.push(c),
            _ => self.parts.push(WordPart {
                text: c.to_string(),
                expand,
                quoted,
            }),
        }
    }

    /// Concatenated text with no expansion applied.
    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Options parsed from a command's words, keyed by option name.
///
/// A flag given without `=value` maps to an empty value list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    options: BTreeMap<String, Vec<String>>,
}

impl CommandOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options holding only value-less flags.
    pub fn with_flags<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = Self::new();
        for flag in flags {
            options.insert_flag(flag);
        }
        options
    }

    pub fn insert_flag(&mut self, key: impl Into<String>) {
        self.options.entry(key.into()).or_default();
    }

    pub fn insert_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.entry(key.into()).or_default().push(value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.options.get(key).map(Vec::as_slice)
    }

    /// First value given for `key`, if any.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.options
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// One pipeline stage ready for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    /// Positional arguments with options removed.
    pub args: Vec<String>,
    pub options: CommandOptions,
    /// Every expanded word after the name, options included, in order.
    pub argv: Vec<String>,
}

impl Command {
    /// Command with positional arguments only.
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        Self {
            name: name.into(),
            argv: args.clone(),
            args,
            options: CommandOptions::new(),
        }
    }

    pub fn with_options(mut self, options: CommandOptions) -> Self {
        self.options = options;
        self
    }
}

/// Stages of one command line, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    pub commands: Vec<Command>,
}

impl Pipeline {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
