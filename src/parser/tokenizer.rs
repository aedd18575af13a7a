//! Splits a raw command line into pipeline stages and words.
//!
//! - Single quotes: content is literal.
//! - Double quotes: `$` still expands; `\` escapes `$`, `` ` ``, `"`, `\` and
//!   newline.
//! - Unquoted backslash: escapes whitespace, `|`, `$`, quotes and itself; before
//!   any other character the backslash is kept.
//! - Unquoted `|`: separates stages.
//!
//! ```text
//! echo 'hello $name' | echo "escaped: \$test"
//! => [["echo", "hello $name"], ["echo", "escaped: $test"]]
//! ```

use std::iter::Peekable;
use std::str::Chars;

use crate::error::ParseError;
use crate::model::Word;

/// Characters an unquoted backslash escapes.
fn is_unquoted_escapable(c: char) -> bool {
    c.is_whitespace() || matches!(c, '|' | '$' | '"' | '\'' | '\\')
}

/// Characters a backslash escapes inside double quotes.
fn is_double_quote_escapable(c: char) -> bool {
    matches!(c, '$' | '`' | '"' | '\\' | '\n')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

#[derive(Default)]
struct StageBuilder {
    stages: Vec<Vec<Word>>,
    words: Vec<Word>,
    /// `Some` once a word has started, even if it is still empty (`""`).
    current: Option<Word>,
}

impl StageBuilder {
    fn word(&mut self) -> &mut Word {
        self.current.get_or_insert_with(Word::default)
    }

    fn push(&mut self, c: char, expand: bool, quoted: bool) {
        self.word().push(c, expand, quoted);
    }

    fn finish_word(&mut self) {
        if let Some(word) = self.current.take() {
            self.words.push(word);
        }
    }

    fn finish_stage(&mut self) -> Result<(), ParseError> {
        self.finish_word();
        if self.words.is_empty() {
            return Err(ParseError::EmptyPipe);
        }
        self.stages.push(std::mem::take(&mut self.words));
        Ok(())
    }
}

/// Tokenize `input` into stages of words.
///
/// Blank input yields no stages.
pub fn tokenize(input: &str) -> Result<Vec<Vec<Word>>, ParseError> {
    let mut builder = StageBuilder::default();
    let mut quote = Quote::None;
    let mut chars: Peekable<Chars<'_>> = input.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => {
                if c == '\'' {
                    quote = Quote::None;
                } else {
                    builder.push(c, false, true);
                }
            }
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' => match chars.peek().copied() {
                    Some(next) if is_double_quote_escapable(next) => {
                        chars.next();
                        builder.push(next, false, true);
                    }
                    _ => builder.push('\\', false, true),
                },
                _ => builder.push(c, true, true),
            },
            Quote::None => match c {
                '\'' => {
                    builder.word();
                    quote = Quote::Single;
                }
                '"' => {
                    builder.word();
                    quote = Quote::Double;
                }
                '\\' => match chars.peek().copied() {
                    Some(next) if is_unquoted_escapable(next) => {
                        chars.next();
                        builder.push(next, false, true);
                    }
                    _ => builder.push('\\', false, false),
                },
                '|' => builder.finish_stage()?,
                c if c.is_whitespace() => builder.finish_word(),
                _ => builder.push(c, true, false),
            },
        }
    }

    if quote != Quote::None {
        return Err(ParseError::UnclosedQuote);
    }

    builder.finish_word();
    if builder.stages.is_empty() && builder.words.is_empty() {
        return Ok(Vec::new());
    }
    builder.finish_stage()?;
    Ok(builder.stages)
}
