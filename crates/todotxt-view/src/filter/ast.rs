//! Abstract Syntax Tree (AST) for filter expressions.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use regex::Regex;
use todotxt_model_rs::models::Priority;

/// Represents a parsed filter expression.
///
/// A compiled tree is immutable and can be evaluated against any number of
/// items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Logical AND of two filters.
    And(Box<Filter>, Box<Filter>),

    /// Logical OR of two filters.
    Or(Box<Filter>, Box<Filter>),

    /// Logical NOT of a filter.
    Not(Box<Filter>),

    /// A parenthesized sub-expression, or one command-line argument.
    Group(Box<Filter>),

    /// A single predicate.
    Atom(Atom),
}

/// A single predicate over one item attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    /// Case-insensitive substring of the source line. Stored lowercased.
    Text(String),

    /// The item has a context equal to the name.
    Context(String),

    /// The item has a project equal to the name.
    Project(String),

    /// The item has at least one tag with this key (`key:`).
    HasTag(String),

    /// Some value of the tag compares true against the operand.
    Tag {
        /// Tag key.
        key: String,
        /// Comparison operator.
        op: CompareOp,
        /// Operand as written.
        value: String,
    },

    /// Priority comparison, e.g. `(<C)`.
    Priority {
        /// Comparison operator.
        op: CompareOp,
        /// Priority to compare against.
        priority: Priority,
    },

    /// Completion state (`is:done` / `is:open`).
    Completed(bool),

    /// Date comparison on a date attribute.
    Date {
        /// The attribute to read.
        field: DateField,
        /// Comparison operator.
        op: CompareOp,
        /// Resolved date operand.
        date: NaiveDate,
    },

    /// Regular expression over the source line (`/pattern/`).
    Regex(Pattern),
}

/// Comparison operators usable in `key:value` and priority atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Eq,
    Ge,
    Gt,
    Ne,
}

impl CompareOp {
    /// Splits a leading operator off a value. Defaults to `Eq`.
    ///
    /// Returns the operator, the remaining value and whether an operator was
    /// written explicitly.
    pub fn split(value: &str) -> (Self, &str, bool) {
        const PREFIXES: [(&str, CompareOp); 7] = [
            ("<=", CompareOp::Le),
            (">=", CompareOp::Ge),
            ("!=", CompareOp::Ne),
            ("<", CompareOp::Lt),
            (">", CompareOp::Gt),
            ("=", CompareOp::Eq),
            ("!", CompareOp::Ne),
        ];

        PREFIXES
            .iter()
            .find_map(|(prefix, op)| value.strip_prefix(prefix).map(|rest| (*op, rest, true)))
            .unwrap_or((CompareOp::Eq, value, false))
    }

    /// Returns true if an ordering of `actual` relative to the operand
    /// satisfies this operator.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ge => ordering != Ordering::Less,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ne => ordering != Ordering::Equal,
        }
    }
}

/// Date attributes a date atom can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    /// Creation date (`created:`).
    Created,
    /// Completion date (`completed:`).
    Completed,
    /// `due:` tag.
    Due,
    /// `t:` start date tag.
    Start,
}

impl DateField {
    /// Maps a structural key to its date field.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "created" => Some(DateField::Created),
            "completed" => Some(DateField::Completed),
            "due" => Some(DateField::Due),
            "t" => Some(DateField::Start),
            _ => None,
        }
    }

    /// Returns true for fields stored as tags, which fall back to a plain
    /// tag comparison when the operand is not a date.
    pub fn is_tag(self) -> bool {
        matches!(self, DateField::Due | DateField::Start)
    }
}

/// A compiled regular expression, compared by its source pattern.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Wraps a compiled regex.
    pub fn new(regex: Regex) -> Self {
        Self(regex)
    }

    /// Returns true if the pattern matches anywhere in the text.
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }

    /// Returns the pattern source.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.0.as_str())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl Filter {
    /// Creates an AND filter from two filters.
    ///
    /// # Example
    ///
    /// ```
    /// use todotxt_view_rs::filter::Filter;
    ///
    /// let filter = Filter::and(Filter::text("foo"), Filter::context("home"));
    /// assert!(matches!(filter, Filter::And(_, _)));
    /// ```
    pub fn and(left: Filter, right: Filter) -> Self {
        Filter::And(Box::new(left), Box::new(right))
    }

    /// Creates an OR filter from two filters.
    pub fn or(left: Filter, right: Filter) -> Self {
        Filter::Or(Box::new(left), Box::new(right))
    }

    /// Creates a NOT filter from another filter.
    pub fn negate(inner: Filter) -> Self {
        Filter::Not(Box::new(inner))
    }

    /// Wraps a filter in a group.
    pub fn group(inner: Filter) -> Self {
        Filter::Group(Box::new(inner))
    }

    /// Creates a free-text atom. The needle is lowercased.
    pub fn text(needle: &str) -> Self {
        Filter::Atom(Atom::Text(needle.to_lowercase()))
    }

    /// Creates a context atom.
    pub fn context(name: impl Into<String>) -> Self {
        Filter::Atom(Atom::Context(name.into()))
    }

    /// Creates a project atom.
    pub fn project(name: impl Into<String>) -> Self {
        Filter::Atom(Atom::Project(name.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_operator() {
        assert_eq!(CompareOp::split("<10"), (CompareOp::Lt, "10", true));
        assert_eq!(CompareOp::split("<=10"), (CompareOp::Le, "10", true));
        assert_eq!(CompareOp::split("!x"), (CompareOp::Ne, "x", true));
        assert_eq!(CompareOp::split("!=x"), (CompareOp::Ne, "x", true));
        assert_eq!(CompareOp::split("10"), (CompareOp::Eq, "10", false));
        assert_eq!(CompareOp::split(""), (CompareOp::Eq, "", false));
    }

    #[test]
    fn test_operator_holds() {
        assert!(CompareOp::Lt.holds(Ordering::Less));
        assert!(!CompareOp::Lt.holds(Ordering::Equal));
        assert!(CompareOp::Le.holds(Ordering::Equal));
        assert!(CompareOp::Ge.holds(Ordering::Greater));
        assert!(CompareOp::Ne.holds(Ordering::Less));
        assert!(!CompareOp::Ne.holds(Ordering::Equal));
    }

    #[test]
    fn test_pattern_equality_by_source() {
        let a = Pattern::new(Regex::new("fo+").unwrap());
        let b = Pattern::new(Regex::new("fo+").unwrap());
        assert_eq!(a, b);
        assert_eq!(format!("{a:?}"), "/fo+/");
    }
}
