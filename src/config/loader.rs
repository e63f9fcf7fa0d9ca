//! Configuration file loading with precedence handling.

use crate::model::Overlap;
use crate::state::FlagScope;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "MULTIPAGE_CONFIG";

/// Environment variable overriding the page overlap.
pub const OVERLAP_ENV_VAR: &str = "MULTIPAGE_OVERLAP";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// An override variable holds something that is not a valid value.
    #[error("Invalid value {value:?} in ${name}: {reason}")]
    InvalidEnvValue {
        /// Variable name.
        name: &'static str,
        /// Raw value found.
        value: String,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; anything missing falls back to the default.
/// Corresponds to `~/.config/multipage/config.toml`:
///
/// ```toml
/// overlap = 1
/// flag_scope = "document"
/// log_file_path = "/tmp/multipage.log"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Lines shared between adjacent pages.
    #[serde(default)]
    pub overlap: Option<Overlap>,

    /// Whether enabling reaches every group showing the document.
    #[serde(default)]
    pub flag_scope: Option<FlagScope>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Lines shared between adjacent pages.
    pub overlap: Overlap,
    /// Reach of the enabled flag.
    pub flag_scope: FlagScope,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            overlap: Overlap::DEFAULT,
            flag_scope: FlagScope::default(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/multipage/multipage.log` on Linux, or the
/// platform's state directory elsewhere. Falls back to the current directory
/// when no state directory is known.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("multipage").join("multipage.log"),
        None => PathBuf::from("multipage.log"),
    }
}

/// Resolve default config file path.
///
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("multipage").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist; defaults apply then.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
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

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `MULTIPAGE_CONFIG` environment variable
/// 3. Default path `~/.config/multipage/config.toml`
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

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `MULTIPAGE_OVERLAP` (a non-negative integer).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvValue`] if the variable is set but does
/// not parse.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var(OVERLAP_ENV_VAR) {
        let lines = raw
            .trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                name: OVERLAP_ENV_VAR,
                value: raw.clone(),
                reason: e.to_string(),
            })?;
        config.overlap = Overlap::new(lines);
    }

    Ok(config)
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        overlap: config.overlap.unwrap_or(defaults.overlap),
        flag_scope: config.flag_scope.unwrap_or(defaults.flag_scope),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// Only flags the user actually passed are applied.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    overlap_override: Option<Overlap>,
) -> ResolvedConfig {
    if let Some(overlap) = overlap_override {
        config.overlap = overlap;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
