use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::{CommandContext, CommandError};
use todotxt_model_rs::error::TodoError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_message(&e));
            error_exit_code(&e)
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);
    let (verb, args) = cli.verb();
    if ctx.verbose {
        eprintln!("Running {} {:?}", verb.unwrap_or(dispatch::DEFAULT_VERB), args);
    }
    dispatch::execute(&ctx, verb, args)
}

/// Returns the line printed for an error.
///
/// Usage problems and unknown item numbers are reported bare, like getopt
/// does; everything else gets an `Error:` prefix.
fn error_message(e: &CommandError) -> String {
    match e {
        CommandError::Usage(message) => message.clone(),
        CommandError::Todo(TodoError::InvalidNumber { .. }) => e.to_string(),
        _ => format!("Error: {e}"),
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Usage(_) => ExitCode::from(2),
        CommandError::Todo(_) => ExitCode::from(1),
        CommandError::Filter(_) | CommandError::Sort(_) => ExitCode::from(1),
        CommandError::Json(_) => ExitCode::from(1),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Store(_) => ExitCode::from(3),
        CommandError::Config(_) => ExitCode::from(5),
    }
}
