//! Add command implementation.
//!
//! Appends a new line to the todo file, prefixed with today's date when
//! `auto_creation_date` is on.

use chrono::{Local, NaiveDate};
use todotxt_model_rs::ids::Identifiers;
use todotxt_model_rs::models::Item;

use super::config::load_config;
use super::{CommandContext, CommandError, Result};
use crate::output::format_created_item;

const USAGE: &str = "Synopsis: add <TEXT>";

/// Inserts a creation date after the priority, unless the line already has
/// one or is completed.
pub fn with_creation_date(line: &str, today: NaiveDate) -> Result<String> {
    let item = Item::parse(line)?;
    let line = line.trim();
    if item.is_completed() || item.creation_date().is_some() {
        return Ok(line.to_string());
    }

    Ok(match (item.priority(), line.split_once(char::is_whitespace)) {
        (Some(_), Some((priority, rest))) => format!("{priority} {today} {}", rest.trim_start()),
        _ => format!("{today} {line}"),
    })
}

/// Executes the add command.
///
/// # Errors
///
/// Returns a usage error without text, or an error when the todo file
/// cannot be read or written.
pub fn execute(ctx: &CommandContext, args: &[String]) -> Result<()> {
    let text = args.join(" ");
    if text.trim().is_empty() || text.trim() == "help" {
        return Err(CommandError::Usage(USAGE.to_string()));
    }

    let config = load_config(ctx.config_path.as_deref())?;
    let store = ctx.store(&config)?;
    let mut list = store.load_or_default()?;

    let line = if config.add.auto_creation_date() {
        with_creation_date(&text, Local::now().date_naive())?
    } else {
        text
    };
    let number = list.add(&line)?;
    store.save(&list)?;

    if !ctx.quiet {
        let ids = Identifiers::new(&list, config.identifiers());
        if let (Some(item), Some(label)) = (list.item(number), ids.label(number)) {
            println!("{}", format_created_item(label, item, ctx.colors(&config)));
        }
    }
    Ok(())
}
