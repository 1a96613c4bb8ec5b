//! Configuration file loading with precedence handling.

use crate::model::ColumnFilter;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "TABLESYNC_CONFIG";

/// Environment variable overriding the log file path.
pub const LOG_FILE_ENV_VAR: &str = "TABLESYNC_LOG_FILE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/tablesync/config.toml`:
///
/// ```toml
/// rows = 300
/// columns = 20
/// hidden_columns = [1, 3]
///
/// [[filters]]
/// column = 2
/// operator = "gt"
/// args = [10]
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Rows in the demo grid.
    #[serde(default)]
    pub rows: Option<usize>,

    /// Columns in the demo grid.
    #[serde(default)]
    pub columns: Option<usize>,

    /// Columns hidden by default (the table's default hidden-columns prop).
    #[serde(default)]
    pub hidden_columns: Option<Vec<usize>>,

    /// Rows hidden at startup.
    #[serde(default)]
    pub hidden_rows: Option<Vec<usize>>,

    /// Filters applied at startup.
    #[serde(default)]
    pub filters: Option<Vec<ColumnFilter>>,

    /// Treat action-script errors as fatal.
    #[serde(default)]
    pub strict: Option<bool>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Rows in the demo grid.
    pub rows: usize,
    /// Columns in the demo grid.
    pub columns: usize,
    /// Columns hidden by default.
    pub hidden_columns: Vec<usize>,
    /// Rows hidden at startup.
    pub hidden_rows: Vec<usize>,
    /// Filters applied at startup.
    pub filters: Vec<ColumnFilter>,
    /// Treat action-script errors as fatal.
    pub strict: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_file_path: default_log_path(),
            rows: 300,
            columns: 20,
            hidden_columns: Vec::new(),
            hidden_rows: Vec::new(),
            filters: Vec::new(),
            strict: false,
        }
    }
}

/// CLI values that override the resolved config when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--rows`
    pub rows: Option<usize>,
    /// `--columns`
    pub columns: Option<usize>,
    /// `--strict`
    pub strict: Option<bool>,
    /// `--log-file`
    pub log_file_path: Option<PathBuf>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/tablesync/tablesync.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("tablesync").join("tablesync.log")
    } else {
        PathBuf::from("tablesync.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/tablesync/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tablesync").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `TABLESYNC_CONFIG` environment variable
/// 3. Default path `~/.config/tablesync/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TABLESYNC_LOG_FILE`: Override log file path
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(path) = std::env::var(LOG_FILE_ENV_VAR) {
        if !path.is_empty() {
            config.log_file_path = PathBuf::from(path);
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        rows: config.rows.unwrap_or(defaults.rows),
        columns: config.columns.unwrap_or(defaults.columns),
        hidden_columns: config.hidden_columns.unwrap_or(defaults.hidden_columns),
        hidden_rows: config.hidden_rows.unwrap_or(defaults.hidden_rows),
        filters: config.filters.unwrap_or(defaults.filters),
        strict: config.strict.unwrap_or(defaults.strict),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(rows) = overrides.rows {
        config.rows = rows;
    }

    if let Some(columns) = overrides.columns {
        config.columns = columns;
    }

    if let Some(strict) = overrides.strict {
        config.strict = strict;
    }

    if let Some(path) = overrides.log_file_path {
        config.log_file_path = path;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
