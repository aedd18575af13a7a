//! Command-line parsing: tokenization, expansion, and option splitting.

pub mod expand;
pub mod tokenizer;

use crate::environment::Environment;
use crate::error::ParseError;
use crate::model::{Command, CommandOptions, Pipeline, Word};

pub use expand::{expand_word, is_identifier, STATUS_VARIABLE};
pub use tokenizer::tokenize;

/// Pseudo-command name that assignment stages are rewritten to.
pub const ASSIGNMENT_COMMAND: &str = "=";

/// Parse one input line into a pipeline, expanding variables from `env`.
pub fn parse(input: &str, env: &Environment) -> Result<Pipeline, ParseError> {
    let stages = tokenize(input)?;
    let commands = stages
        .iter()
        .map(|words| parse_stage(words, env))
        .collect();
    let pipeline = Pipeline::new(commands);
    tracing::debug!(stages = pipeline.commands.len(), "parsed input line");
    Ok(pipeline)
}

fn parse_stage(words: &[Word], env: &Environment) -> Command {
    let Some((head, rest)) = words.split_first() else {
        return Command::new(String::new(), Vec::<String>::new());
    };

    if let Some((name, value)) = expand::split_assignment(head) {
        let mut args = vec![name, expand_word(&value, env)];
        args.extend(rest.iter().map(|w| expand_word(w, env)));
        return Command::new(ASSIGNMENT_COMMAND, args);
    }

    let name = expand_word(head, env);
    let argv: Vec<String> = rest.iter().map(|w| expand_word(w, env)).collect();
    let (args, options) = split_options(&argv);
    Command {
        name,
        args,
        options,
        argv,
    }
}

/// Separate option words from positional arguments.
///
/// `--key[=value]` and grouped `-abc[=value]` are options; `--` ends option
/// parsing. A lone `-` and words like `-5` are positional.
pub fn split_options(words: &[String]) -> (Vec<String>, CommandOptions) {
    let mut args = Vec::new();
    let mut options = CommandOptions::new();
    let mut options_done = false;

    for word in words {
        if options_done {
            args.push(word.clone());
            continue;
        }
        if word == "--" {
            options_done = true;
            continue;
        }
        if let Some(body) = word.strip_prefix("--") {
            match body.split_once('=') {
                Some((key, value)) if !key.is_empty() => options.insert_value(key, value),
                Some(_) => args.push(word.clone()),
                None => options.insert_flag(body),
            }
            continue;
        }
        match word.strip_prefix('-') {
            Some(body) if is_short_group(body) => {
                let (letters, value) = match body.split_once('=') {
                    Some((letters, value)) => (letters, Some(value)),
                    None => (body, None),
                };
                let mut flags = letters.chars().peekable();
                while let Some(flag) = flags.next() {
                    match (flags.peek(), value) {
                        (None, Some(value)) => options.insert_value(flag.to_string(), value),
                        _ => options.insert_flag(flag.to_string()),
                    }
                }
            }
            _ => args.push(word.clone()),
        }
    }
    (args, options)
}

fn is_short_group(body: &str) -> bool {
    body.chars()
        .next()
        .is_some_and(|c| c != '=' && !c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(input: &str, env: &Environment) -> Command {
        let mut pipeline = parse(input, env).unwrap();
        assert_eq!(pipeline.commands.len(), 1, "expected one stage for {input:?}");
        pipeline.commands.remove(0)
    }

    #[test]
    fn long_options_with_values() {
        let command = parse_one(
            "command --option1=value1 --option2=value2 -o",
            &Environment::new(),
        );
        assert_eq!(command.name, "command");
        assert_eq!(command.options.first("option1"), Some("value1"));
        assert_eq!(command.options.first("option2"), Some("value2"));
        assert!(command.options.contains("o"));
        assert!(command.args.is_empty());
    }

    #[test]
    fn plain_arguments() {
        let command = parse_one("command arg1 arg2", &Environment::new());
        assert_eq!(command.args, vec!["arg1", "arg2"]);
        assert!(command.options.is_empty());
    }

    #[test]
    fn quoted_name_joins() {
        let command = parse_one("\"com\"'mand' arg1 arg2", &Environment::new());
        assert_eq!(command.name, "command");
        assert_eq!(command.args.len(), 2);
    }

    #[test]
    fn assignment_stage_in_pipeline() {
        let pipeline = parse("command | var=123 | cmd2", &Environment::new()).unwrap();
        assert_eq!(pipeline.commands.len(), 3);
        assert_eq!(pipeline.commands[0].name, "command");
        assert!(pipeline.commands[0].args.is_empty());
        assert_eq!(pipeline.commands[1].name, ASSIGNMENT_COMMAND);
        assert_eq!(pipeline.commands[1].args, vec!["var", "123"]);
        assert_eq!(pipeline.commands[2].name, "cmd2");
    }

    #[test]
    fn assignment_with_extra_words_keeps_them() {
        let command = parse_one("a=1 b c", &Environment::new());
        assert_eq!(command.name, ASSIGNMENT_COMMAND);
        assert_eq!(command.args, vec!["a", "1", "b", "c"]);
    }

    #[test]
    fn quoted_assignment_is_a_command_name() {
        let env = Environment::new();
        let command = parse_one("\"x=1\"", &env);
        assert_eq!(command.name, "x=1");
        assert!(command.args.is_empty());

        let command = parse_one("\"x\"=1 arg", &env);
        assert_eq!(command.name, "x=1");
        assert_eq!(command.args, vec!["arg"]);
    }

    #[test]
    fn empty_input_has_no_commands() {
        assert!(parse("", &Environment::new()).unwrap().is_empty());
    }

    #[test]
    fn variable_substitution() {
        let mut env = Environment::new();
        env.set("HOME", "/user/home");
        env.set("USER", "john");

        assert_eq!(
            parse_one("command $HOME $USER", &env).args.join(" "),
            "/user/home john"
        );
        assert_eq!(
            parse_one("command \"$HOME\" '$USER'", &env).args.join(" "),
            "/user/home $USER"
        );
        assert_eq!(parse_one("command $HOME$USER", &env).args, vec!["/user/homejohn"]);
        assert_eq!(
            parse_one("command $HOME arg2", &env).args.join(" "),
            "/user/home arg2"
        );
    }

    #[test]
    fn unset_variables_leave_empty_arguments() {
        let command = parse_one("command $HOME $USER", &Environment::new());
        assert_eq!(command.args, vec!["", ""]);
    }

    #[test]
    fn grouped_short_flags_attach_value_to_last() {
        let command = parse_one("command -abc=value", &Environment::new());
        assert!(command.options.contains("a"));
        assert!(command.options.contains("b"));
        assert_eq!(command.options.values("a"), Some(&[][..]));
        assert_eq!(command.options.values("c"), Some(&["value".to_string()][..]));
    }

    #[test]
    fn grouped_long_flag_is_one_option() {
        let command = parse_one("command --abc=value", &Environment::new());
        assert_eq!(command.options.values("abc"), Some(&["value".to_string()][..]));
        assert!(!command.options.contains("a"));
    }

    #[test]
    fn options_may_follow_arguments() {
        for input in ["echo -n arg", "echo arg -n"] {
            let command = parse_one(input, &Environment::new());
            assert_eq!(command.args, vec!["arg"]);
            assert!(command.options.contains("n"));
        }
    }

    #[test]
    fn argv_keeps_every_word() {
        let command = parse_one("ls -la --color=never src", &Environment::new());
        assert_eq!(command.argv, vec!["-la", "--color=never", "src"]);
        assert_eq!(command.args, vec!["src"]);
    }

    #[test]
    fn double_dash_and_numbers_are_positional() {
        let command = parse_one("grep -A 2 -- -x - -5", &Environment::new());
        assert!(command.options.contains("A"));
        assert_eq!(command.args, vec!["2", "-x", "-", "-5"]);
        assert!(!command.options.contains("x"));
    }
}
