//! CLI argument parsing using clap derive macros.
//!
//! Only the global flags are parsed by clap. Everything from the verb on is
//! handed to the verb's handler unchanged, so list queries such as
//! `-@home` or `-- -x` reach the handler intact.

use std::path::PathBuf;

use clap::Parser;

/// tt - query, sort and list todo.txt items
#[derive(Parser, Debug)]
#[command(name = "tt")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Commands: ls, add, append, config, completions, help")]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colors in output
    #[arg(long)]
    pub no_color: bool,

    /// todo.txt file to use (default: from config, then ~/todo.txt)
    #[arg(short = 'd', long = "file", env = "TT_FILE", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Config file to use (default: ~/.config/tt/config.toml)
    #[arg(long, env = "TT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Command followed by its arguments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub words: Vec<String>,
}

impl Cli {
    /// Splits the positional words into the verb and its arguments.
    pub fn verb(&self) -> (Option<&str>, &[String]) {
        match self.words.split_first() {
            Some((verb, args)) => (Some(verb.as_str()), args),
            None => (None, &[]),
        }
    }
}
