//! Todo item model.
//!
//! This module defines the [`Item`] struct and the small value types it is
//! made of. Contexts, projects and tags are always derived from the source
//! line, so they cannot drift from the text.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parse::parse_line;

/// Date format used by todo.txt for creation, completion and tag dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single-letter priority from `A` (most important) to `Z`.
///
/// Ordering follows the letter, so `A < B` and an ascending sort lists the
/// most important items first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(char);

impl Priority {
    /// Creates a priority from a letter, accepting lower case input.
    ///
    /// Returns `None` for anything outside `A`-`Z`.
    pub fn new(letter: char) -> Option<Self> {
        let upper = letter.to_ascii_uppercase();
        upper.is_ascii_uppercase().then_some(Self(upper))
    }

    /// Returns the priority letter.
    pub fn letter(self) -> char {
        self.0
    }

    /// Returns the importance rank: 26 for `A` down to 1 for `Z`.
    pub fn importance(self) -> u8 {
        b'Z' - self.0 as u8 + 1
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A `key:value` tag found in the item text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// The tag key (text before the first colon).
    pub key: String,
    /// The tag value (text after the first colon).
    pub value: String,
}

impl Tag {
    /// Creates a new tag.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A todo item parsed from one line of a todo.txt file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// The full source line, as written in the file.
    pub(crate) source: String,

    /// The item text without completion marker, priority and leading dates.
    pub(crate) text: String,

    /// The priority, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) priority: Option<Priority>,

    /// Whether the item starts with the `x ` completion marker.
    #[serde(default)]
    pub(crate) completed: bool,

    /// The date the item was completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) completion_date: Option<NaiveDate>,

    /// The date the item was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) creation_date: Option<NaiveDate>,

    /// Contexts (`@name`) in order of appearance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) contexts: Vec<String>,

    /// Projects (`+name`) in order of appearance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) projects: Vec<String>,

    /// Tags (`key:value`) in order of appearance. Keys may repeat.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) tags: Vec<Tag>,
}

impl Item {
    /// Parses an item from a todo.txt line.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::EmptyText` if the line is empty or whitespace only.
    ///
    /// # Example
    ///
    /// ```
    /// use todotxt_model_rs::models::Item;
    ///
    /// let item = Item::parse("(B) 2024-03-01 Write report +Work @office due:2024-03-08").unwrap();
    /// assert_eq!(item.priority().map(|p| p.letter()), Some('B'));
    /// assert_eq!(item.projects(), ["Work"]);
    /// assert_eq!(item.tag_value("due"), Some("2024-03-08"));
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        parse_line(line)
    }

    /// Returns the full source line.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the text after the completion marker, priority and dates.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the priority, if any.
    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns true if the item is completed.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the completion date, if any.
    pub fn completion_date(&self) -> Option<NaiveDate> {
        self.completion_date
    }

    /// Returns the creation date, if any.
    pub fn creation_date(&self) -> Option<NaiveDate> {
        self.creation_date
    }

    /// Returns the contexts in order of appearance.
    pub fn contexts(&self) -> &[String] {
        &self.contexts
    }

    /// Returns the projects in order of appearance.
    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    /// Returns all tags in order of appearance.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns true if the item has at least one tag with the given key.
    pub fn has_tag(&self, key: &str) -> bool {
        self.tags.iter().any(|t| t.key == key)
    }

    /// Returns every value recorded for the given tag key.
    pub fn tag_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tags
            .iter()
            .filter(move |t| t.key == key)
            .map(|t| t.value.as_str())
    }

    /// Returns the first value recorded for the given tag key.
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }

    /// Parses the first value of a tag as a date.
    pub fn tag_date(&self, key: &str) -> Option<NaiveDate> {
        self.tag_value(key)
            .and_then(|v| NaiveDate::parse_from_str(v, DATE_FORMAT).ok())
    }

    /// Returns the due date (`due:` tag), if present and valid.
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.tag_date("due")
    }

    /// Returns the start date (`t:` tag), if present and valid.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.tag_date("t")
    }

    /// Returns true if the item carries the `h:1` hidden marker.
    pub fn is_hidden(&self) -> bool {
        self.tag_values("h").any(|v| v == "1")
    }

    /// Returns the source line with the given tag keys removed.
    ///
    /// Used for display only; filtering always sees the full source.
    pub fn display_text(&self, hidden_tags: &[String]) -> String {
        if hidden_tags.is_empty() {
            return self.source.clone();
        }

        self.source
            .split_whitespace()
            .filter(|word| {
                !word
                    .split_once(':')
                    .is_some_and(|(key, value)| {
                        !value.is_empty() && hidden_tags.iter().any(|h| h == key)
                    })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Appends text to the item, re-deriving every attribute from the new line.
    pub fn append(&mut self, text: &str) -> Result<()> {
        let line = format!("{} {}", self.source, text.trim());
        *self = parse_line(&line)?;
        Ok(())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_priority_ordering_puts_a_first() {
        let a = Priority::new('A').unwrap();
        let c = Priority::new('c').unwrap();
        assert!(a < c);
        assert_eq!(c.letter(), 'C');
        assert_eq!(a.importance(), 26);
        assert_eq!(Priority::new('Z').unwrap().importance(), 1);
        assert!(Priority::new('1').is_none());
    }

    #[test]
    fn test_tag_accessors() {
        let item = Item::parse("Pay bills due:2024-05-01 id:4 id:5 h:1").unwrap();
        assert!(item.has_tag("id"));
        assert_eq!(item.tag_values("id").collect::<Vec<_>>(), vec!["4", "5"]);
        assert_eq!(item.tag_value("id"), Some("4"));
        assert_eq!(item.due_date(), Some(date("2024-05-01")));
        assert!(item.is_hidden());
        assert!(item.start_date().is_none());
    }

    #[test]
    fn test_tag_value_outlives_key() {
        fn lookup<'a>(item: &'a Item, key: &str) -> Option<&'a str> {
            let owned = key.to_string();
            item.tag_value(&owned)
        }

        let item = Item::parse("Call mom id:7 ical:abc").unwrap();
        assert_eq!(lookup(&item, "ical"), Some("abc"));
        assert_eq!(lookup(&item, "id"), Some("7"));
        assert_eq!(lookup(&item, "due"), None);
    }

    #[test]
    fn test_invalid_tag_date_is_absent() {
        let item = Item::parse("Thing due:soon").unwrap();
        assert_eq!(item.tag_value("due"), Some("soon"));
        assert!(item.due_date().is_none());
    }

    #[test]
    fn test_display_text_hides_tags() {
        let item = Item::parse("(C) Baz @Context1 +Project1 id:1 key:value").unwrap();
        let hidden = vec!["id".to_string(), "p".to_string()];
        assert_eq!(
            item.display_text(&hidden),
            "(C) Baz @Context1 +Project1 key:value"
        );
        assert_eq!(item.display_text(&[]), item.source());
    }

    #[test]
    fn test_display_text_keeps_bare_key_words() {
        let item = Item::parse("Note id: stays").unwrap();
        let hidden = vec!["id".to_string()];
        assert_eq!(item.display_text(&hidden), "Note id: stays");
    }

    #[test]
    fn test_append_rederives_attributes() {
        let mut item = Item::parse("Foo").unwrap();
        item.append("Bar @home").unwrap();
        assert_eq!(item.source(), "Foo Bar @home");
        assert_eq!(item.contexts(), ["home"]);
    }

    #[test]
    fn test_item_serializes_to_json() {
        let item = Item::parse("(A) 2024-01-01 Call @phone").unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["priority"], "A");
        assert_eq!(json["creation_date"], "2024-01-01");
        assert_eq!(json["contexts"][0], "phone");
        assert!(json.get("tags").is_none());
    }
}
