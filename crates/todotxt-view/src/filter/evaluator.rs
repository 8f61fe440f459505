//! Filter evaluation against todo items.
//!
//! Evaluation is total: a missing attribute makes an atom false, it never
//! raises an error.
//!
//! # Example
//!
//! ```
//! use todotxt_model_rs::models::Item;
//! use todotxt_view_rs::filter::{FilterEvaluator, FilterParser};
//!
//! let filter = FilterParser::parse("@home OR +garden").unwrap();
//! let items = vec![
//!     Item::parse("Water plants @home").unwrap(),
//!     Item::parse("Call mom @phone").unwrap(),
//! ];
//!
//! let evaluator = FilterEvaluator::new(&filter);
//! let matching = evaluator.filter_items(&items);
//! assert_eq!(matching.len(), 1);
//! ```

use std::cmp::Ordering;

use chrono::NaiveDate;
use todotxt_model_rs::models::{Item, DATE_FORMAT};

use super::ast::{Atom, CompareOp, DateField, Filter};

/// Evaluates a compiled filter against one item.
pub fn evaluate(filter: &Filter, item: &Item) -> bool {
    match filter {
        Filter::And(left, right) => evaluate(left, item) && evaluate(right, item),
        Filter::Or(left, right) => evaluate(left, item) || evaluate(right, item),
        Filter::Not(inner) => !evaluate(inner, item),
        Filter::Group(inner) => evaluate(inner, item),
        Filter::Atom(atom) => evaluate_atom(atom, item),
    }
}

/// Evaluates a parsed filter against items.
#[derive(Debug, Clone, Copy)]
pub struct FilterEvaluator<'a> {
    filter: &'a Filter,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new filter evaluator.
    pub fn new(filter: &'a Filter) -> Self {
        Self { filter }
    }

    /// Returns true if the item matches the filter.
    pub fn matches(&self, item: &Item) -> bool {
        evaluate(self.filter, item)
    }

    /// Filters a slice of items, returning only those that match.
    pub fn filter_items<'b>(&self, items: &'b [Item]) -> Vec<&'b Item> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

fn evaluate_atom(atom: &Atom, item: &Item) -> bool {
    match atom {
        Atom::Text(needle) => item.source().to_lowercase().contains(needle.as_str()),
        Atom::Context(name) => item.contexts().iter().any(|c| c == name),
        Atom::Project(name) => item.projects().iter().any(|p| p == name),
        Atom::HasTag(key) => item.has_tag(key),
        Atom::Tag { key, op, value } => item
            .tag_values(key)
            .any(|have| op.holds(compare_values(have, value))),
        Atom::Priority { op, priority } => {
            let have = item.priority().map_or(0, |p| p.importance());
            op.holds(have.cmp(&priority.importance()))
        }
        Atom::Completed(done) => item.is_completed() == *done,
        Atom::Date { field, op, date } => {
            date_of(item, *field).is_some_and(|have| op.holds(have.cmp(date)))
        }
        Atom::Regex(pattern) => pattern.is_match(item.source()),
    }
}

fn date_of(item: &Item, field: DateField) -> Option<NaiveDate> {
    match field {
        DateField::Created => item.creation_date(),
        DateField::Completed => item.completion_date(),
        DateField::Due => item.due_date(),
        DateField::Start => item.start_date(),
    }
}

/// Compares a tag value with an operand: numerically when both are numbers,
/// as dates when both are dates, otherwise as strings.
fn compare_values(have: &str, want: &str) -> Ordering {
    if let (Ok(a), Ok(b)) = (have.parse::<f64>(), want.parse::<f64>()) {
        return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    }

    if let (Ok(a), Ok(b)) = (
        NaiveDate::parse_from_str(have, DATE_FORMAT),
        NaiveDate::parse_from_str(want, DATE_FORMAT),
    ) {
        return a.cmp(&b);
    }

    have.cmp(want)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values_numeric() {
        assert_eq!(compare_values("5", "10"), Ordering::Less);
        assert_eq!(compare_values("15", "10"), Ordering::Greater);
        assert_eq!(compare_values("1.0", "1"), Ordering::Equal);
    }

    #[test]
    fn test_compare_values_dates() {
        assert_eq!(compare_values("2015-11-05", "2016-01-01"), Ordering::Less);
    }

    #[test]
    fn test_compare_values_falls_back_to_strings() {
        assert_eq!(compare_values("abc", "abd"), Ordering::Less);
        assert_eq!(compare_values("10", "abc"), Ordering::Less);
        assert!(CompareOp::Ne.holds(compare_values("value", "other")));
    }
}
