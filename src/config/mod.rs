// SPDX-License-Identifier: MPL-2.0
//! This module handles the stack configuration, loaded from a
//! `settings.toml` file and overridable from the environment.
//!
//! # Configuration Sections
//!
//! - `[stack]` - Capacity and living time of the alert stack
//!
//! # Precedence
//!
//! Environment variables (`ALERT_STACK_MAX_LEN`,
//! `ALERT_STACK_LIVING_TIME_SECS`) override file values, which override the
//! built-in defaults.
//!
//! # Examples
//!
//! ```no_run
//! use alert_stack::config;
//!
//! let (mut config, _warning) = config::load();
//! config.apply_env_overrides().expect("invalid environment override");
//! let settings = config.stack_settings().expect("invalid stack settings");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::domain::alert::{Capacity, LivingTime, StackSettings};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Alert stack settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StackConfig {
    /// Maximum number of alerts held at once.
    #[serde(default = "default_max_len")]
    pub max_len: usize,

    /// Seconds between two timer-driven evictions.
    #[serde(default = "default_living_time_secs")]
    pub living_time_secs: u64,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
            living_time_secs: DEFAULT_LIVING_TIME_SECS,
        }
    }
}

// =============================================================================
// Main Config Struct
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub stack: StackConfig,
}

impl Config {
    /// Validates the stack section.
    ///
    /// Zero values are rejected, never clamped.
    pub fn stack_settings(&self) -> Result<StackSettings> {
        Ok(StackSettings::new(
            Capacity::new(self.stack.max_len)?,
            LivingTime::from_secs(self.stack.living_time_secs)?,
        ))
    }

    /// Applies `ALERT_STACK_*` environment overrides.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`.
    ///
    /// Unset or empty values are skipped; unparsable ones are an error.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(max_len) = parse_override(&lookup, ENV_MAX_LEN)? {
            self.stack.max_len = max_len;
        }
        if let Some(secs) = parse_override(&lookup, ENV_LIVING_TIME_SECS)? {
            self.stack.living_time_secs = secs;
        }
        Ok(())
    }
}

fn parse_override<F, V>(lookup: &F, key: &str) -> Result<Option<V>>
where
    F: Fn(&str) -> Option<String>,
    V: std::str::FromStr,
    V::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("{key}={raw}: {e}"))),
        _ => Ok(None),
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_max_len() -> usize {
    DEFAULT_MAX_LEN
}

fn default_living_time_secs() -> u64 {
    DEFAULT_LIVING_TIME_SECS
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional directory override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("ignoring {}: {}", path.display(), err)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
