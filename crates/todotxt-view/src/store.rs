//! todo.txt file storage.
//!
//! The list is stored one item per line, by default at `~/todo.txt`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;
use todotxt_model_rs::error::TodoError;
use todotxt_model_rs::list::TodoList;

/// Default todo filename, placed in the home directory.
const TODO_FILENAME: &str = "todo.txt";

/// Errors that can occur while reading or writing the todo file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to determine the home directory.
    #[error("failed to determine todo file location: no valid home directory found")]
    NoHomeDir,

    /// The todo file could not be read.
    #[error("failed to read todo file '{path}': {source}")]
    ReadError {
        /// File that was read.
        path: PathBuf,
        /// Cause.
        #[source]
        source: io::Error,
    },

    /// The todo file could not be written.
    #[error("failed to write todo file '{path}': {source}")]
    WriteError {
        /// File that was written.
        path: PathBuf,
        /// Cause.
        #[source]
        source: io::Error,
    },

    /// The todo file's directory could not be created.
    #[error("failed to create directory '{path}': {source}")]
    CreateDirError {
        /// Directory that was created.
        path: PathBuf,
        /// Cause.
        #[source]
        source: io::Error,
    },

    /// A line could not be turned into an item.
    #[error("invalid todo file: {0}")]
    Parse(#[from] TodoError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Reads and writes a todo.txt file.
///
/// # Example
///
/// ```no_run
/// use todotxt_view_rs::store::TodoStore;
///
/// let store = TodoStore::new()?;
/// let mut list = store.load_or_default()?;
/// list.add("(A) Call mom @phone")?;
/// store.save(&list)?;
/// # Ok::<(), todotxt_view_rs::store::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TodoStore {
    path: PathBuf,
}

impl TodoStore {
    /// Creates a store for `~/todo.txt`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoHomeDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: Self::default_path()?,
        })
    }

    /// Creates a store for a custom path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default todo file path, `~/todo.txt`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoHomeDir` if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let base_dirs = BaseDirs::new().ok_or(StoreError::NoHomeDir)?;
        Ok(base_dirs.home_dir().join(TODO_FILENAME))
    }

    /// Returns the path of the todo file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the todo file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the list from disk. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// - Returns `StoreError::ReadError` if the file cannot be read, including
    ///   when it does not exist. Use `load_or_default()` to treat a missing
    ///   file as an empty list.
    pub fn load(&self) -> Result<TodoList> {
        let contents = fs::read_to_string(&self.path).map_err(|e| StoreError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(TodoList::from_lines(contents.lines())?)
    }

    /// Loads the list, returning an empty one if the file doesn't exist.
    pub fn load_or_default(&self) -> Result<TodoList> {
        match self.load() {
            Ok(list) => Ok(list),
            Err(StoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok(TodoList::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Writes the list to disk atomically (temp file + rename), one item per
    /// line with a trailing newline.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self, list: &TodoList) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::CreateDirError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut contents = String::new();
        for line in list.lines() {
            contents.push_str(line);
            contents.push('\n');
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, contents).map_err(|e| StoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }
}
