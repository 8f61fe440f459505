//! Item model for todo.txt files.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use todotxt_model_rs::prelude::*;
//!
//! let list = TodoList::from_lines(["(A) Call mom @phone", "x 2024-01-02 Pay rent"]).unwrap();
//! assert_eq!(list.len(), 2);
//! assert!(list.items()[1].is_completed());
//! ```
//!
//! This re-exports the most commonly used types including [`Item`](models::Item),
//! [`TodoList`](list::TodoList) and the error types.

pub mod error;
pub mod ids;
pub mod list;
pub mod models;
pub mod parse;
pub mod prelude;
