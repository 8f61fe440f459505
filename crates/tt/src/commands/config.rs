//! Configuration file and the `config` verb.
//!
//! View configuration settings.
//! Config file is located at ~/.config/tt/config.toml.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use todotxt_model_rs::ids::IdentifierStyle;
use todotxt_view_rs::limit::RESERVED_PROMPT_LINES;
use todotxt_view_rs::sort::DEFAULT_SORT;

use super::{CommandContext, CommandError, Result};
use crate::output::helpers::DEFAULT_LIST_FORMAT;

/// Schema version written to new files.
const CONFIG_VERSION: u32 = 1;

/// Tags hidden from listings unless configured otherwise.
const DEFAULT_HIDE_TAGS: [&str; 3] = ["id", "p", "ical"];

/// Contents of `config.toml`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Schema version, current when missing.
    #[serde(default = "default_version")]
    pub version: u32,

    /// todo.txt location; `~/` is expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// `linenumber` (default) or `text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<IdentifierStyle>,

    /// Listing settings.
    #[serde(default)]
    pub ls: ListConfig,

    /// Add settings.
    #[serde(default)]
    pub add: AddConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            file: None,
            identifiers: None,
            ls: ListConfig::default(),
            add: AddConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn identifiers(&self) -> IdentifierStyle {
        self.identifiers.unwrap_or_default()
    }
}

/// `[ls]` section.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ListConfig {
    /// Sort expression, e.g. `group:state,priority`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Tag keys removed from displayed lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_tags: Option<Vec<String>>,

    /// Default number of items; negative shows all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_limit: Option<i64>,

    /// Print a header per sort group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<bool>,

    /// Terminal lines kept free by `ls -N`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_lines: Option<usize>,

    /// Row template: `%i` padded id, `%I` bare id, `%s` text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_format: Option<String>,
}

impl ListConfig {
    pub fn sort(&self) -> &str {
        self.sort.as_deref().unwrap_or(DEFAULT_SORT)
    }

    pub fn hide_tags(&self) -> Vec<String> {
        match &self.hide_tags {
            Some(tags) => tags.clone(),
            None => DEFAULT_HIDE_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn list_limit(&self) -> i64 {
        self.list_limit.unwrap_or(-1)
    }

    pub fn group(&self) -> bool {
        self.group.unwrap_or(false)
    }

    pub fn reserved_lines(&self) -> usize {
        self.reserved_lines.unwrap_or(RESERVED_PROMPT_LINES)
    }

    pub fn list_format(&self) -> &str {
        self.list_format.as_deref().unwrap_or(DEFAULT_LIST_FORMAT)
    }
}

/// `[add]` section.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AddConfig {
    /// Prefix new items with today's date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_creation_date: Option<bool>,
}

impl AddConfig {
    pub fn auto_creation_date(&self) -> bool {
        self.auto_creation_date.unwrap_or(true)
    }
}

/// `[output]` section.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Resolves where the config file lives.
/// Uses XDG-style paths: ~/.config/tt/config.toml on all platforms.
pub fn get_config_path(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }

    // Use XDG_CONFIG_HOME if set, otherwise ~/.config/tt
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("tt").join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("tt").join("config.toml"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Loads the configuration from disk. A missing file means defaults.
pub fn load_config(override_path: Option<&Path>) -> Result<Config> {
    let path = get_config_path(override_path)?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    migrate_config(config)
}

/// Brings an older config up to the current schema.
fn migrate_config(mut config: Config) -> Result<Config> {
    if config.version > CONFIG_VERSION {
        return Err(CommandError::Config(format!(
            "config version {} is newer than supported version {}",
            config.version, CONFIG_VERSION
        )));
    }

    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Expands a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), BaseDirs::new()) {
        (Some(rest), Some(dirs)) => dirs.home_dir().join(rest),
        _ => PathBuf::from(path),
    }
}

/// Prints the effective settings.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path(ctx.config_path.as_deref())?;
    let config = load_config(Some(&path))?;

    if ctx.quiet {
        return Ok(());
    }

    use owo_colors::OwoColorize;

    let header = "Configuration";
    if ctx.use_colors {
        println!("{}\n", header.green().bold());
    } else {
        println!("{}\n", header);
    }

    println!("File: {}", path.display());
    println!("Exists: {}\n", path.exists());

    if let Some(ref file) = config.file {
        println!("file: {}", file);
    }
    let identifiers = match config.identifiers() {
        IdentifierStyle::LineNumber => "linenumber",
        IdentifierStyle::Text => "text",
    };
    println!("identifiers: {}", identifiers);

    println!("[ls]");
    println!("  sort: {}", config.ls.sort());
    println!("  hide_tags: {}", config.ls.hide_tags().join(","));
    println!("  list_limit: {}", config.ls.list_limit());
    println!("  group: {}", config.ls.group());
    println!("  reserved_lines: {}", config.ls.reserved_lines());
    println!("  list_format: {}", config.ls.list_format());

    println!("\n[add]");
    println!("  auto_creation_date: {}", config.add.auto_creation_date());

    println!("\n[output]");
    println!("  color: {}", config.output.color.unwrap_or(true));

    Ok(())
}

/// Prints the config file location.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path(ctx.config_path.as_deref())?;
    if !ctx.quiet {
        println!("{}", path.display());
    }
    Ok(())
}
