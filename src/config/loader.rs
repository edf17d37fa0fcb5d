//! Optional TOML settings for the command-line host.
//!
//! Sources are layered: built-in defaults, then a config file, then
//! environment variables, then command-line flags.

use crate::lifecycle::DEFAULT_RETRY_DELAYS_MS;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "COMMENT_OVERLAY_CONFIG";

/// Environment variable overriding the log file path.
pub const LOG_ENV_VAR: &str = "COMMENT_OVERLAY_LOG";

/// Why a config file could not be used.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config location itself is unusable.
    #[error("Unusable config location: {0}")]
    InvalidPath(String),

    /// The file exists but could not be read.
    #[error("Cannot read config {path}: {reason}")]
    ReadError {
        /// File that was being read.
        path: PathBuf,
        /// I/O error text.
        reason: String,
    },

    /// The file is not valid TOML or has unknown keys.
    #[error("Malformed config {path}: {reason}")]
    ParseError {
        /// File that was being parsed.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
}

/// On-disk settings. Every key may be omitted.
///
/// Example `~/.config/comment-overlay/config.toml`:
///
/// ```toml
/// log_file_path = "/tmp/comment-overlay.log"
/// deferred_retries_ms = [50, 250, 1000]
/// pretty = false
///
/// [tokens]
/// --comment-gap = "0.75rem"
/// --comment-overlap-shift = "12px"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Where diagnostics are appended.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Delays after startup at which layout is re-run.
    #[serde(default)]
    pub deferred_retries_ms: Option<Vec<u64>>,

    /// Pretty-print the JSON report.
    #[serde(default)]
    pub pretty: Option<bool>,

    /// Root layout tokens applied over the snapshot's own.
    #[serde(default)]
    pub tokens: Option<BTreeMap<String, String>>,
}

/// Settings after every source has been layered in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Where diagnostics are appended.
    pub log_file_path: PathBuf,
    /// Deferred retry delays in milliseconds.
    pub deferred_retries_ms: Vec<u64>,
    /// Pretty-print the JSON report.
    pub pretty: bool,
    /// Token overrides, property name to raw CSS length.
    pub tokens: BTreeMap<String, String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_file_path: default_log_path(),
            deferred_retries_ms: DEFAULT_RETRY_DELAYS_MS.to_vec(),
            pretty: true,
            tokens: BTreeMap::new(),
        }
    }
}

impl ResolvedConfig {
    /// Retry delays as durations.
    pub fn retry_delays(&self) -> Vec<Duration> {
        self.deferred_retries_ms
            .iter()
            .copied()
            .map(Duration::from_millis)
            .collect()
    }
}

/// `<state dir>/comment-overlay/comment-overlay.log`, or a file in the
/// working directory on platforms without a state dir.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("comment-overlay").join("comment-overlay.log")
    } else {
        PathBuf::from("comment-overlay.log")
    }
}

/// Read and parse the config at `path`.
///
/// A missing file yields `Ok(None)`.
///
/// # Errors
///
/// [`ConfigError::ReadError`] or [`ConfigError::ParseError`] for a file that
/// exists but cannot be used.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

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

/// Returns `~/.config/comment-overlay/config.toml` on Unix, the platform
/// equivalent elsewhere, or `None` if no config directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("comment-overlay").join("config.toml"))
}

/// Find and load the config file.
///
/// The first of these that is set decides which file is read:
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `COMMENT_OVERLAY_CONFIG` environment variable
/// 3. Default path `~/.config/comment-overlay/config.toml`
///
/// Whichever file is chosen may be absent; that yields `Ok(None)`.
///
/// # Errors
///
/// Returns error if the env var is set to an empty path, or if a config
/// file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Some(env_path) = std::env::var_os(CONFIG_ENV_VAR) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!(
                "{} is set but empty",
                CONFIG_ENV_VAR
            )));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Layer file settings over the defaults, key by key.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        deferred_retries_ms: config
            .deferred_retries_ms
            .unwrap_or(defaults.deferred_retries_ms),
        pretty: config.pretty.unwrap_or(defaults.pretty),
        tokens: config.tokens.unwrap_or(defaults.tokens),
    }
}

/// Layer `COMMENT_OVERLAY_LOG` over the log path. An empty value is ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(path) = std::env::var_os(LOG_ENV_VAR).filter(|p| !p.is_empty()) {
        config.log_file_path = PathBuf::from(path);
    }

    config
}

/// Layer command-line flags over everything else.
///
/// `--token` pairs are merged into the token map, later pairs winning;
/// `--compact` turns pretty-printing off.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    token_overrides: Vec<(String, String)>,
    compact: bool,
) -> ResolvedConfig {
    config.tokens.extend(token_overrides);

    if compact {
        config.pretty = false;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
