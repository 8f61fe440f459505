//! Command dispatch module for routing verbs to their handlers.
//!
//! The verb set is closed: every verb maps to one handler in [`VERBS`].

use strsim::levenshtein;

use crate::commands::{self, CommandContext, CommandError, Result};

/// Maximum Levenshtein distance to consider a verb as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Signature shared by all verb handlers.
pub type Handler = fn(&CommandContext, &[String]) -> Result<()>;

/// Verb table.
pub const VERBS: &[(&str, Handler)] = &[
    ("ls", commands::list::execute),
    ("list", commands::list::execute),
    ("add", commands::add::execute),
    ("append", commands::append::execute),
    ("config", dispatch_config),
    ("completions", dispatch_completions),
    ("help", help),
];

/// Verb run when none is given.
pub const DEFAULT_VERB: &str = "ls";

/// Looks up the handler for a verb.
pub fn handler(verb: &str) -> Option<Handler> {
    VERBS
        .iter()
        .find(|(name, _)| *name == verb)
        .map(|(_, handler)| *handler)
}

/// Runs a verb with its arguments.
///
/// # Errors
///
/// Returns a usage error for unknown verbs, suggesting the closest one.
pub fn execute(ctx: &CommandContext, verb: Option<&str>, args: &[String]) -> Result<()> {
    let verb = verb.unwrap_or(DEFAULT_VERB);
    match handler(verb) {
        Some(handler) => handler(ctx, args),
        None => Err(CommandError::Usage(unknown_verb_message(verb))),
    }
}

/// Finds the closest known verb.
fn suggest(verb: &str) -> Option<&'static str> {
    let verb = verb.to_lowercase();
    VERBS
        .iter()
        .map(|(name, _)| (*name, levenshtein(&verb, name)))
        .min_by_key(|(_, distance)| *distance)
        .filter(|(_, distance)| *distance <= MAX_SUGGESTION_DISTANCE)
        .map(|(name, _)| name)
}

fn unknown_verb_message(verb: &str) -> String {
    let base = format!("unknown command '{verb}'");
    match suggest(verb) {
        Some(s) => format!("{base}. Did you mean '{s}'?"),
        None => format!("{base}. Run 'tt help' for a list of commands."),
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("show") | None => commands::config::execute_show(ctx),
        Some("path") => commands::config::execute_path(ctx),
        Some(other) => Err(CommandError::Usage(format!(
            "unknown config command '{other}'. Use 'show' or 'path'."
        ))),
    }
}

fn dispatch_completions(_ctx: &CommandContext, args: &[String]) -> Result<()> {
    commands::completions::execute(args)
}

fn help(ctx: &CommandContext, _args: &[String]) -> Result<()> {
    if !ctx.quiet {
        println!("tt - query, sort and list todo.txt items");
        println!();
        println!("  ls [FLAGS] [EXPRESSION]   List items (run 'tt ls help' for flags)");
        println!("  add <TEXT>                Add an item");
        println!("  append <NUMBER> <TEXT>    Append text to an item");
        println!("  config [show|path]        Show the configuration");
        println!("  completions <SHELL>       Print shell completions");
        println!();
        println!("Use --help for global options");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_verb_has_a_handler() {
        for verb in ["ls", "list", "add", "append", "config", "completions", "help"] {
            assert!(handler(verb).is_some(), "{verb}");
        }
        assert!(handler("sync").is_none());
    }

    #[test]
    fn test_suggestion() {
        assert_eq!(suggest("lst"), Some("ls"));
        assert_eq!(suggest("apend"), Some("append"));
        assert_eq!(suggest("ADD"), Some("add"));
        assert_eq!(suggest("frobnicate"), None);
    }

    #[test]
    fn test_unknown_verb_message() {
        assert_eq!(
            unknown_verb_message("apend"),
            "unknown command 'apend'. Did you mean 'append'?"
        );
        assert!(unknown_verb_message("zzzzzzzz").contains("tt help"));
    }
}
