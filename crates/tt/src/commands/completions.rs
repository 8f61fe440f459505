//! Shell completions command implementation.
//!
//! Generate shell completions for bash, zsh, fish, elvish and powershell.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use super::{CommandError, Result};
use crate::cli::Cli;

/// Parses a shell name as accepted by `tt completions <shell>`.
pub fn parse_shell(args: &[String]) -> Result<Shell> {
    let name = args
        .first()
        .ok_or_else(|| CommandError::Usage("Synopsis: completions <SHELL>".to_string()))?;
    name.parse::<Shell>()
        .map_err(|_| CommandError::Usage(format!("unknown shell '{name}'")))
}

/// Generate shell completions for the given shell and write to stdout.
///
/// # Errors
///
/// Returns a usage error for a missing or unknown shell.
pub fn execute(args: &[String]) -> Result<()> {
    let shell = parse_shell(args)?;
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "tt", &mut io::stdout());
    Ok(())
}
