//! Prelude module for convenient imports.
//!
//! ```
//! use todotxt_model_rs::prelude::*;
//!
//! // Now you have access to:
//! // - Item, Priority, Tag (data models)
//! // - TodoList (the collection)
//! // - Identifiers, IdentifierStyle (line numbers or text ids)
//! // - TodoError, Result (error handling)
//! ```

pub use crate::error::{Result, TodoError};
pub use crate::ids::{IdentifierStyle, Identifiers};
pub use crate::list::TodoList;
pub use crate::models::{Item, Priority, Tag, DATE_FORMAT};
