//! Command implementations for the tt CLI.
//!
//! This module contains the actual command handlers that are invoked through
//! the verb table in [`crate::dispatch`].

pub mod add;
pub mod append;
pub mod completions;
pub mod config;
pub mod list;

use std::path::PathBuf;

use todotxt_view_rs::store::TodoStore;

use crate::cli::Cli;

/// Anything a verb can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// todo file error.
    #[error("{0}")]
    Store(#[from] todotxt_view_rs::store::StoreError),

    /// Item or list error.
    #[error("{0}")]
    Todo(#[from] todotxt_model_rs::error::TodoError),

    /// Bad query.
    #[error("filter error: {0}")]
    Filter(#[from] todotxt_view_rs::filter::FilterError),

    /// Sort expression error.
    #[error("sort error: {0}")]
    Sort(#[from] todotxt_view_rs::sort::SortError),

    /// Bad command-line usage.
    #[error("{0}")]
    Usage(String),

    /// Unreadable or unsupported config file.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failed.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of running a verb.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Settings shared by every verb, taken from the global flags.
pub struct CommandContext {
    /// Colored output allowed by flags and environment.
    pub use_colors: bool,
    /// Print errors only.
    pub quiet: bool,
    /// Print diagnostics to stderr.
    pub verbose: bool,
    /// todo.txt path given on the command line or via `TT_FILE`.
    pub file: Option<PathBuf>,
    /// Config path given on the command line or via `TT_CONFIG`.
    pub config_path: Option<PathBuf>,
}

impl CommandContext {
    /// Builds the context from parsed flags.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            use_colors: !cli.no_color
                && std::env::var_os("NO_COLOR").is_none()
                && console::colors_enabled(),
            quiet: cli.quiet,
            verbose: cli.verbose,
            file: cli.file.clone(),
            config_path: cli.config.clone(),
        }
    }

    /// Whether colors are on once the config file has had its say.
    pub fn colors(&self, config: &config::Config) -> bool {
        self.use_colors && config.output.color.unwrap_or(true)
    }

    /// Opens the todo store: command line first, then config, then
    /// `~/todo.txt`.
    pub fn store(&self, config: &config::Config) -> Result<TodoStore> {
        let store = match (&self.file, &config.file) {
            (Some(path), _) => TodoStore::with_path(path.clone()),
            (None, Some(path)) => TodoStore::with_path(config::expand_home(path)),
            (None, None) => TodoStore::new()?,
        };
        if self.verbose {
            eprintln!("Using todo file {}", store.path().display());
        }
        Ok(store)
    }
}
