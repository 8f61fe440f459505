//! Multi-key sorting of todo items.
//!
//! A sort expression is a comma separated list of keys, each written as
//! `[group:][asc:|desc:]field`, for example `group:state,desc:due,priority`.
//! Earlier keys take precedence and ties keep the input order.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;
use todotxt_model_rs::models::{Item, DATE_FORMAT};

/// The sort expression used when none is configured.
pub const DEFAULT_SORT: &str = "group:state,priority";

/// Errors from parsing a sort expression.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SortError {
    /// The field name is not one of the sortable attributes.
    #[error("unknown sort field '{field}'")]
    UnknownField {
        /// The field as written.
        field: String,
    },
}

/// Attributes an item can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Priority,
    Created,
    Completed,
    Due,
    Text,
    Context,
    Project,
    /// Completion state, open items first when ascending.
    State,
}

impl SortField {
    fn parse(name: &str) -> Result<Self, SortError> {
        match name.to_lowercase().as_str() {
            "priority" => Ok(SortField::Priority),
            "created" | "creation" => Ok(SortField::Created),
            "completed" | "completion" => Ok(SortField::Completed),
            "due" => Ok(SortField::Due),
            "text" => Ok(SortField::Text),
            "context" => Ok(SortField::Context),
            "project" => Ok(SortField::Project),
            "state" | "done" => Ok(SortField::State),
            _ => Err(SortError::UnknownField {
                field: name.to_string(),
            }),
        }
    }

    fn name(self) -> &'static str {
        match self {
            SortField::Priority => "priority",
            SortField::Created => "created",
            SortField::Completed => "completed",
            SortField::Due => "due",
            SortField::Text => "text",
            SortField::Context => "context",
            SortField::Project => "project",
            SortField::State => "state",
        }
    }
}

/// Sort direction for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

/// One ranked sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: Direction,
    /// Partition output into contiguous blocks sharing this key's value.
    pub group: bool,
}

impl SortKey {
    /// Creates an ascending, ungrouped key.
    pub fn new(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
            group: false,
        }
    }

    fn compare(&self, a: &Item, b: &Item) -> Ordering {
        match self.field {
            SortField::Priority => directed(a.priority(), b.priority(), self.direction),
            SortField::Created => directed(a.creation_date(), b.creation_date(), self.direction),
            SortField::Completed => {
                directed(a.completion_date(), b.completion_date(), self.direction)
            }
            SortField::Due => directed(a.due_date(), b.due_date(), self.direction),
            SortField::Text => self
                .direction
                .apply(a.text().to_lowercase().cmp(&b.text().to_lowercase())),
            SortField::Context => directed(
                first_lowercase(a.contexts()),
                first_lowercase(b.contexts()),
                self.direction,
            ),
            SortField::Project => directed(
                first_lowercase(a.projects()),
                first_lowercase(b.projects()),
                self.direction,
            ),
            SortField::State => self
                .direction
                .apply(a.is_completed().cmp(&b.is_completed())),
        }
    }

    /// Describes the item's value for this key, used for group headers.
    fn label(&self, item: &Item) -> String {
        fn date_label(title: &str, date: Option<NaiveDate>) -> String {
            match date {
                Some(date) => format!("{title}: {}", date.format(DATE_FORMAT)),
                None => format!("{title}: none"),
            }
        }

        match self.field {
            SortField::Priority => match item.priority() {
                Some(priority) => format!("Priority: {priority}"),
                None => "Priority: none".to_string(),
            },
            SortField::Created => date_label("Created", item.creation_date()),
            SortField::Completed => date_label("Completed", item.completion_date()),
            SortField::Due => date_label("Due", item.due_date()),
            SortField::Text => item.text().to_string(),
            SortField::Context => match item.contexts().first() {
                Some(context) => format!("Context: {context}"),
                None => "Context: none".to_string(),
            },
            SortField::Project => match item.projects().first() {
                Some(project) => format!("Project: {project}"),
                None => "Project: none".to_string(),
            },
            SortField::State => {
                if item.is_completed() {
                    "Completed".to_string()
                } else {
                    "Open".to_string()
                }
            }
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group {
            f.write_str("group:")?;
        }
        if self.direction == Direction::Desc {
            f.write_str("desc:")?;
        }
        f.write_str(self.field.name())
    }
}

/// Compares optional values; absent values sort last in either direction.
fn directed<T: Ord>(a: Option<T>, b: Option<T>, direction: Direction) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn first_lowercase(names: &[String]) -> Option<String> {
    names.first().map(|name| name.to_lowercase())
}

/// A contiguous run of sorted items sharing the values of all group keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    /// Header describing the shared values, empty without group keys.
    pub label: String,
    pub items: Vec<&'a Item>,
}

/// Orders items by ranked sort keys.
///
/// # Example
///
/// ```
/// use todotxt_model_rs::models::Item;
/// use todotxt_view_rs::sort::Sorter;
///
/// let items = vec![
///     Item::parse("x (A) done").unwrap(),
///     Item::parse("(B) later").unwrap(),
///     Item::parse("(A) first").unwrap(),
/// ];
///
/// let sorted = Sorter::default().sort(&items);
/// let texts: Vec<&str> = sorted.iter().map(|item| item.source()).collect();
/// assert_eq!(texts, vec!["(A) first", "(B) later", "x (A) done"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sorter {
    keys: Vec<SortKey>,
}

impl Sorter {
    /// Creates a sorter from explicit keys.
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    /// Parses a sort expression such as `group:state,desc:due,priority`.
    ///
    /// Empty segments are skipped; an empty expression keeps input order.
    pub fn parse(expression: &str) -> Result<Self, SortError> {
        let mut keys = Vec::new();

        for segment in expression.split(',').map(str::trim) {
            if segment.is_empty() {
                continue;
            }

            let (group, rest) = match segment.strip_prefix("group:") {
                Some(rest) => (true, rest),
                None => (false, segment),
            };
            let (direction, field) = if let Some(field) = rest.strip_prefix("desc:") {
                (Direction::Desc, field)
            } else if let Some(field) = rest.strip_prefix("asc:") {
                (Direction::Asc, field)
            } else {
                (Direction::Asc, rest)
            };

            keys.push(SortKey {
                field: SortField::parse(field)?,
                direction,
                group,
            });
        }

        Ok(Self { keys })
    }

    /// Returns the keys in the order they were given.
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Returns true if any key groups its output.
    pub fn is_grouped(&self) -> bool {
        self.keys.iter().any(|key| key.group)
    }

    /// Keys in evaluation order: group keys first, then the rest.
    fn ranked(&self) -> impl Iterator<Item = &SortKey> {
        let grouped = self.keys.iter().filter(|key| key.group);
        let plain = self.keys.iter().filter(|key| !key.group);
        grouped.chain(plain)
    }

    /// Compares two items; equal means "keep input order".
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        self.ranked()
            .map(|key| key.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Returns the items in sorted order. The sort is stable and the input
    /// is left untouched.
    pub fn sort<'a, I>(&self, items: I) -> Vec<&'a Item>
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let mut sorted: Vec<&'a Item> = items.into_iter().collect();
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }

    /// Splits already sorted items into contiguous groups.
    ///
    /// Without group keys everything lands in one unlabeled group.
    pub fn groups<'a>(&self, items: &[&'a Item]) -> Vec<Group<'a>> {
        let group_keys: Vec<&SortKey> = self.keys.iter().filter(|key| key.group).collect();
        let mut groups: Vec<Group<'a>> = Vec::new();

        for &item in items {
            let label = group_keys
                .iter()
                .map(|key| key.label(item))
                .collect::<Vec<_>>()
                .join(", ");

            match groups.last_mut() {
                Some(last) if last.label == label => last.items.push(item),
                _ => groups.push(Group {
                    label,
                    items: vec![item],
                }),
            }
        }

        groups
    }
}

impl Default for Sorter {
    fn default() -> Self {
        Self {
            keys: vec![
                SortKey {
                    field: SortField::State,
                    direction: Direction::Asc,
                    group: true,
                },
                SortKey::new(SortField::Priority),
            ],
        }
    }
}

impl fmt::Display for Sorter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.keys.iter().map(SortKey::to_string).collect();
        f.write_str(&keys.join(","))
    }
}
