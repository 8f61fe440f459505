//! Filter expression parser and evaluator for todo.txt queries.
//!
//! # Supported Syntax
//!
//! ## Terms
//! - `word` - Case-insensitive substring of the item's line
//! - `"a phrase"` - Verbatim substring, even if it looks like an operator
//! - `@context` / `+project` - Items with that context or project
//! - `key:value` - Tag comparison, `key:` alone means "has the tag"
//! - `(A)`, `(<C)`, `(>=B)` - Priority comparison (`<` means less important)
//! - `/regex/` - Regular expression over the item's line
//!
//! ## Tag operators
//! `key:<v`, `key:<=v`, `key:>v`, `key:>=v`, `key:=v`, `key:!v`. Values are
//! compared as numbers, then dates, then strings.
//!
//! ## Structural keys
//! - `created:`, `completed:` - Item dates
//! - `due:`, `t:` - Date tags (`today`, `tomorrow`, `mon`, `3d`, `-1w` ...)
//! - `is:done`, `is:open` - Completion state
//!
//! ## Boolean Operators
//! - adjacency or `AND` - AND
//! - `OR` - OR
//! - `-term` or `NOT term` - NOT
//! - `()` - Grouping
//! - a leading `--` - the rest is one group
//!
//! # Example
//!
//! ```
//! use todotxt_model_rs::models::Item;
//! use todotxt_view_rs::filter::{compile, evaluate};
//!
//! let filter = compile("p:<10 -@home").unwrap();
//!
//! assert!(evaluate(&filter, &Item::parse("Call back p:5 @work").unwrap()));
//! assert!(!evaluate(&filter, &Item::parse("Call back p:15 @work").unwrap()));
//! assert!(!evaluate(&filter, &Item::parse("Call back @work").unwrap()));
//! ```

mod ast;
mod dates;
mod error;
mod evaluator;
mod lexer;
mod parser;
mod rules;

use chrono::NaiveDate;

pub use ast::{Atom, CompareOp, DateField, Filter, Pattern};
pub use dates::resolve_date;
pub use error::{FilterError, FilterResult};
pub use evaluator::{evaluate, FilterEvaluator};
pub use parser::FilterParser;
pub use rules::ViewFilter;

/// Compiles a query string into a filter tree.
pub fn compile(query: &str) -> FilterResult<Filter> {
    FilterParser::parse(query)
}

/// Compiles a query string, resolving relative dates against `today`.
pub fn compile_with_today(query: &str, today: NaiveDate) -> FilterResult<Filter> {
    FilterParser::parse_with_today(query, today)
}


#[cfg(test)]
mod evaluator_tests;
