//! CLI entry point for clish.

mod cli;

use std::io::IsTerminal;

use clap::Parser;
use clish::config::load_config;
use clish::environment::Environment;
use clish::error::ShellError;
use clish::filesystem::FileSystem;
use clish::logging;
use clish::repl::{self, ReplOptions};
use clish::shell::{Shell, ShellState};
use crossterm::style::Stylize;
use tokio::io::BufReader;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    let color = !args.no_color && std::io::stderr().is_terminal();
    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            if color {
                eprintln!("{} {e}", "error:".red().bold());
            } else {
                eprintln!("error: {e}");
            }
            1
        }
    };
    std::process::exit(code);
}

/// Load config, bind the process's stdio, and run the session.
async fn run(args: cli::Args) -> Result<i32, ShellError> {
    let loaded = load_config(args.config.as_deref())?;
    let mut config = loaded.config;
    if let Some(prompt) = args.prompt {
        config.prompt.text = prompt;
    }
    if args.no_color {
        config.display.color = false;
    }

    logging::init(&config.logging.filter);
    tracing::debug!(source = ?loaded.source, "loaded config");

    let env = if config.shell.import_env {
        Environment::from_vars(std::env::vars())
    } else {
        Environment::new()
    };
    let mut shell = Shell::new(ShellState::new(env, FileSystem::from_process()?));

    let interactive = std::io::stdin().is_terminal();
    let terminal_output = std::io::stdout().is_terminal();
    let options = ReplOptions {
        prompt: config.prompt.text,
        color: config.display.color && terminal_output,
        show_prompt: interactive,
        terminal_input: interactive,
        terminal_output,
    };

    let mut input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();
    let mut error = tokio::io::stderr();
    match args.command {
        Some(line) => {
            repl::run_once(&mut shell, &line, &mut input, &mut output, &mut error, &options).await
        }
        None => repl::run(&mut shell, &mut input, &mut output, &mut error, &options).await,
    }
}
