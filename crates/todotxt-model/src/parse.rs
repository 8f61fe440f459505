//! Parser for single todo.txt lines.
//!
//! ```text
//! line      ::= completed | open
//! completed ::= "x " [date " " [date " "]] text
//! open      ::= ["(" A-Z ") "] [date " "] text
//! date      ::= YYYY-MM-DD
//! ```
//!
//! Inside `text`, words starting with `@` are contexts, words starting with
//! `+` are projects and `key:value` words are tags.

use chrono::NaiveDate;

use crate::error::{Result, TodoError};
use crate::models::{Item, Priority, Tag, DATE_FORMAT};

/// Parses one todo.txt line into an [`Item`].
///
/// Leading and trailing whitespace is ignored.
///
/// # Errors
///
/// Returns `TodoError::EmptyText` if nothing but whitespace is given.
pub fn parse_line(line: &str) -> Result<Item> {
    let source = line.trim();
    if source.is_empty() {
        return Err(TodoError::EmptyText);
    }

    let mut rest = source;
    let mut priority = None;
    let mut completed = false;
    let mut completion_date = None;
    let mut creation_date = None;

    if let Some(after_marker) = rest.strip_prefix("x ") {
        completed = true;
        rest = after_marker.trim_start();

        if let Some((date, after)) = take_date(rest) {
            completion_date = Some(date);
            rest = after;

            if let Some((date, after)) = take_date(rest) {
                creation_date = Some(date);
                rest = after;
            }
        }
    } else {
        if let Some((p, after)) = take_priority(rest) {
            priority = Some(p);
            rest = after;
        }

        if let Some((date, after)) = take_date(rest) {
            creation_date = Some(date);
            rest = after;
        }
    }

    let mut contexts = Vec::new();
    let mut projects = Vec::new();
    let mut tags = Vec::new();

    for word in rest.split_whitespace() {
        if let Some(name) = word.strip_prefix('@').filter(|n| !n.is_empty()) {
            contexts.push(name.to_string());
        } else if let Some(name) = word.strip_prefix('+').filter(|n| !n.is_empty()) {
            projects.push(name.to_string());
        } else if let Some(tag) = parse_tag(word) {
            tags.push(tag);
        }
    }

    Ok(Item {
        source: source.to_string(),
        text: rest.to_string(),
        priority,
        completed,
        completion_date,
        creation_date,
        contexts,
        projects,
        tags,
    })
}

/// Splits a leading `YYYY-MM-DD` word off the input.
fn take_date(input: &str) -> Option<(NaiveDate, &str)> {
    let (word, rest) = split_first_word(input);
    if word.len() != 10 {
        return None;
    }
    let date = NaiveDate::parse_from_str(word, DATE_FORMAT).ok()?;
    Some((date, rest))
}

/// Splits a leading `(X)` priority off the input.
fn take_priority(input: &str) -> Option<(Priority, &str)> {
    let (word, rest) = split_first_word(input);
    let mut chars = word.chars();
    match (chars.next(), chars.next(), chars.next(), chars.next()) {
        (Some('('), Some(letter), Some(')'), None) if letter.is_ascii_uppercase() => {
            Some((Priority::new(letter)?, rest))
        }
        _ => None,
    }
}

/// Returns the first whitespace-delimited word and the trimmed remainder.
fn split_first_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

/// Recognizes a `key:value` word.
///
/// Both sides must be non-empty and URL-like values (`http://...`) are not
/// tags.
fn parse_tag(word: &str) -> Option<Tag> {
    let (key, value) = word.split_once(':')?;
    if key.is_empty() || value.is_empty() || value.starts_with("//") {
        return None;
    }
    Some(Tag::new(key, value))
}
