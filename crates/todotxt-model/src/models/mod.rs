//! Data types for todo.txt items.
//!
//! An [`Item`] is parsed once from a line and exposes read-only accessors for
//! everything the query and sort engine needs.

mod item;

pub use item::*;
