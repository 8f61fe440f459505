//! Error types for the todo.txt model.

use thiserror::Error;

/// A specialized Result type for model operations.
pub type Result<T> = std::result::Result<T, TodoError>;

/// Errors that can occur when building or changing todo items.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoError {
    /// The todo text is empty or whitespace only.
    #[error("todo text cannot be empty")]
    EmptyText,

    /// No item exists with the given list number.
    #[error("Invalid todo number given.")]
    InvalidNumber {
        /// The number that was looked up.
        number: String,
    },
}

impl TodoError {
    /// Creates an invalid number error.
    pub fn invalid_number(number: impl Into<String>) -> Self {
        TodoError::InvalidNumber {
            number: number.into(),
        }
    }
}
