//! `$VARIABLE` expansion over tokenized words.

use crate::environment::Environment;
use crate::model::{Word, WordPart};

/// Name of the variable holding the last pipeline status.
pub const STATUS_VARIABLE: &str = "?";

/// True for `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Expand every expandable part of `word` against `env`.
///
/// Unknown variables expand to the empty string.
pub fn expand_word(word: &Word, env: &Environment) -> String {
    word.parts
        .iter()
        .map(|part| expand_part(part, env))
        .collect()
}

fn expand_part(part: &WordPart, env: &Environment) -> String {
    if !part.expand {
        return part.text.clone();
    }

    let mut out = String::with_capacity(part.text.len());
    let mut chars = part.text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('?') => {
                chars.next();
                out.push_str(env.get(STATUS_VARIABLE).unwrap_or(""));
            }
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if !(next.is_ascii_alphanumeric() || next == '_') {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                out.push_str(env.get(&name).unwrap_or(""));
            }
            _ => out.push('$'),
        }
    }
    out
}

/// Split `NAME=value` off the front of `word` when the name is unquoted.
///
/// Returns the variable name and the word holding the value.
pub fn split_assignment(word: &Word) -> Option<(String, Word)> {
    let first = word.parts.first()?;
    if first.quoted {
        return None;
    }
    let (name, rest) = first.text.split_once('=')?;
    if !is_identifier(name) {
        return None;
    }

    let mut value = Word::default();
    if !rest.is_empty() {
        value.parts.push(WordPart {
            text: rest.to_string(),
            expand: true,
            quoted: false,
        });
    }
    value.parts.extend(word.parts.iter().skip(1).cloned());
    Some((name.to_string(), value))
}
