//! # Configuration Module
//!
//! This module provides configuration support for spdxify, letting a project
//! pin its license, copyright holder, and ignore patterns in one place so
//! runs stay consistent across invocations.
//!
//! Configuration can be specified in a `.spdxify.toml` file or via the
//! `SPDXIFY_CONFIG` environment variable.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".spdxify.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "SPDXIFY_CONFIG";

/// Main configuration struct for spdxify.
///
/// All fields are optional; CLI arguments take precedence over config
/// values.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// SPDX license identifier to apply (e.g., "MIT", "Apache-2.0").
  #[serde(default)]
  pub license: Option<String>,

  /// Copyright holder name.
  #[serde(default)]
  pub author: Option<String>,

  /// Copyright year. Defaults to the current year when unset.
  #[serde(default)]
  pub year: Option<i32>,

  /// Path to a notice template file, resolved relative to the config file's
  /// directory.
  #[serde(default, rename = "notice-template")]
  pub notice_template: Option<PathBuf>,

  /// Path to an ignore file, resolved relative to the config file's
  /// directory. Overrides the `.licenseignore`/`.gitignore` discovery.
  #[serde(default, rename = "ignore-file")]
  pub ignore_file: Option<PathBuf>,

  /// Additional ignore patterns, appended after any ignore file's patterns.
  #[serde(default)]
  pub ignore: Vec<String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// The config file named via `SPDXIFY_CONFIG` or `--config` is missing.
  #[error("Config file '{path}' does not exist")]
  NotFound { path: PathBuf },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    // Paths in the config are relative to the config file's directory.
    if let Some(dir) = path.parent() {
      config.notice_template = config.notice_template.map(|p| absolutize(dir, p));
      config.ignore_file = config.ignore_file.map(|p| absolutize(dir, p));
    }

    Ok(config)
  }
}

fn absolutize(dir: &Path, path: PathBuf) -> PathBuf {
  if path.is_absolute() { path } else { dir.join(path) }
}

/// Loads configuration for a run.
///
/// Resolution order: explicit `--config` path, then the `SPDXIFY_CONFIG`
/// environment variable, then `.spdxify.toml` in the scan root. An explicit
/// path that does not exist is an error; the implicit locations are simply
/// skipped when absent. `no_config` disables loading entirely.
pub fn load_config(explicit: Option<&Path>, root: &Path, no_config: bool) -> Result<Option<Config>, ConfigError> {
  if no_config {
    return Ok(None);
  }

  if let Some(path) = explicit {
    if !path.exists() {
      return Err(ConfigError::NotFound {
        path: path.to_path_buf(),
      });
    }
    return Config::load(path).map(Some);
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(env_path);
    if !path.exists() {
      return Err(ConfigError::NotFound { path });
    }
    return Config::load(&path).map(Some);
  }

  let default_path = root.join(DEFAULT_CONFIG_FILENAME);
  if default_path.exists() {
    return Config::load(&default_path).map(Some);
  }

  Ok(None)
}
