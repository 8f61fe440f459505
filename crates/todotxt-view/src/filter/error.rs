//! Query compilation errors.

use thiserror::Error;

/// Result of compiling a query.
pub type FilterResult<T> = Result<T, FilterError>;

/// Why a query could not be compiled.
///
/// Evaluation never fails; every error is raised while compiling a query.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// Nothing to match on.
    #[error("filter expression is empty")]
    EmptyExpression,

    /// A token where none of its kind may appear.
    #[error("unexpected token: {token}")]
    UnexpectedToken {
        /// The offending token.
        token: String,
    },

    /// The query ended mid-expression.
    #[error("unexpected end of expression")]
    UnexpectedEndOfInput,

    /// `(` without a matching `)`.
    #[error("unclosed parenthesis")]
    UnclosedParenthesis,

    /// A comparison operator was given without a value, e.g. `due:<`.
    #[error("missing operand after operator in '{token}'")]
    MissingOperand {
        /// The offending word.
        token: String,
    },

    /// A date field was compared against something that is not a date.
    #[error("invalid date '{value}' for {field}")]
    InvalidDate {
        /// The date field name.
        field: String,
        /// The value that could not be read as a date.
        value: String,
    },

    /// A `/regex/` atom did not compile.
    #[error("invalid regular expression '{pattern}': {message}")]
    InvalidRegex {
        /// The pattern as written.
        pattern: String,
        /// The regex engine's message.
        message: String,
    },

    /// The lexer could not tokenize part of the input.
    #[error("{message} at position {position}")]
    Lexer {
        /// What went wrong.
        message: String,
        /// Byte offset where the problem starts.
        position: usize,
    },
}

impl FilterError {
    /// Shorthand for [`FilterError::UnexpectedToken`].
    pub fn unexpected_token(token: impl Into<String>) -> Self {
        FilterError::UnexpectedToken {
            token: token.into(),
        }
    }

    /// Creates a missing operand error.
    pub fn missing_operand(token: impl Into<String>) -> Self {
        FilterError::MissingOperand {
            token: token.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(field: impl Into<String>, value: impl Into<String>) -> Self {
        FilterError::InvalidDate {
            field: field.into(),
            value: value.into(),
        }
    }
}
