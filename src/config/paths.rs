// SPDX-License-Identifier: MPL-2.0
//! Config directory resolution.
//!
//! # Resolution Order
//!
//! 1. **Explicit override** - parameter to [`get_config_dir_with_override`]
//!    (CLI `--config-dir`, tests)
//! 2. **Environment variable** (`ALERT_STACK_CONFIG_DIR`)
//! 3. **Platform default** - via `dirs` crate

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "AlertStack";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ALERT_STACK_CONFIG_DIR";

/// Returns the config directory path.
///
/// - Linux: `~/.config/AlertStack/`
/// - macOS: `~/Library/Application Support/AlertStack/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\AlertStack\`
///
/// Returns `None` if the config directory cannot be determined.
pub fn get_config_dir() -> Option<PathBuf> {
    get_config_dir_with_override(None)
}

/// Returns the config directory path with an optional override.
pub fn get_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
