//! Shell variable storage.

use std::collections::HashMap;

use crate::parser::is_identifier;

/// Variables visible to expansion and exported to child processes.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: HashMap<String, String>,
}

impl Environment {
    /// Empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment seeded from `vars`, typically `std::env::vars()`.
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            variables: vars.into_iter().collect(),
        }
    }

    /// Value of `name`, or `None` if it was never set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Insert or replace `name`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Identifier-named variables to pass to child processes.
    pub fn exported(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables
            .iter()
            .filter(|(name, _)| is_identifier(name))
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}
