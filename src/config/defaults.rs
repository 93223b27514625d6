// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.

// ==========================================================================
// Stack Defaults
// ==========================================================================

/// Default maximum number of alerts held at once.
pub const DEFAULT_MAX_LEN: usize = 3;

/// Default time between two timer-driven evictions (in seconds).
pub const DEFAULT_LIVING_TIME_SECS: u64 = 5;

// ==========================================================================
// Environment Overrides
// ==========================================================================

/// Overrides `[stack] max_len`.
pub const ENV_MAX_LEN: &str = "ALERT_STACK_MAX_LEN";

/// Overrides `[stack] living_time_secs`.
pub const ENV_LIVING_TIME_SECS: &str = "ALERT_STACK_LIVING_TIME_SECS";
