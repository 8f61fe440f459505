//! Append command implementation.
//!
//! Adds text to the end of an existing item.

use todotxt_model_rs::ids::Identifiers;

use super::config::load_config;
use super::{CommandContext, CommandError, Result};
use crate::output::format_appended_item;

const USAGE: &str = "Synopsis: append <NUMBER> <TEXT>";

/// Executes the append command.
///
/// The item is named by its line number, or by its text id when those are
/// configured. Empty text is accepted and changes nothing.
///
/// # Errors
///
/// Returns a usage error when the number or text is missing,
/// `Invalid todo number given.` for an unknown item, or an error when the
/// todo file cannot be read or written.
pub fn execute(ctx: &CommandContext, args: &[String]) -> Result<()> {
    let (raw_number, words) = match args.split_first() {
        Some((first, _)) if first == "help" => {
            return Err(CommandError::Usage(USAGE.to_string()))
        }
        Some((first, rest)) if !rest.is_empty() => (first, rest),
        _ => return Err(CommandError::Usage(USAGE.to_string())),
    };

    let config = load_config(ctx.config_path.as_deref())?;
    let store = ctx.store(&config)?;
    let mut list = store.load_or_default()?;

    let number = Identifiers::new(&list, config.identifiers()).resolve_or_err(raw_number)?;
    let text = words.join(" ");
    if text.trim().is_empty() {
        return Ok(());
    }

    list.append(number, &text)?;
    store.save(&list)?;

    if !ctx.quiet {
        let ids = Identifiers::new(&list, config.identifiers());
        if let (Some(item), Some(label)) = (list.item(number), ids.label(number)) {
            println!("{}", format_appended_item(label, item, ctx.colors(&config)));
        }
    }
    Ok(())
}
