//! Common helper functions for output formatting.

use owo_colors::OwoColorize;
use todotxt_model_rs::models::Item;

/// Row template used when `list_format` is not configured.
pub const DEFAULT_LIST_FORMAT: &str = "|%i| %s";

/// Formats a listing row from a template.
///
/// `%i` is the identifier right-aligned in a three wide column, `%I` the
/// bare identifier, `%s` the item text and `%%` a literal percent sign.
/// Any other character is copied as is.
pub fn format_row(format: &str, label: &str, text: &str) -> String {
    let mut row = String::with_capacity(format.len() + text.len() + 4);
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            row.push(c);
            continue;
        }
        match chars.next() {
            Some('i') => row.push_str(&format!("{label:>3}")),
            Some('I') => row.push_str(label),
            Some('s') => row.push_str(text),
            Some('%') => row.push('%'),
            Some(other) => {
                row.push('%');
                row.push(other);
            }
            None => row.push('%'),
        }
    }
    row
}

/// Colors a rendered line by the item's state and priority.
pub fn colorize(line: &str, item: &Item, use_colors: bool) -> String {
    if !use_colors {
        return line.to_string();
    }

    if item.is_completed() {
        return line.dimmed().to_string();
    }

    match item.priority().map(|p| p.letter()) {
        Some('A') => line.red().to_string(),
        Some('B') => line.yellow().to_string(),
        Some('C') => line.cyan().to_string(),
        _ => line.to_string(),
    }
}

/// Formats a group header.
pub fn format_header(label: &str, use_colors: bool) -> String {
    if use_colors {
        label.bold().to_string()
    } else {
        label.to_string()
    }
}
