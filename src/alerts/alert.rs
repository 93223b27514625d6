// SPDX-License-Identifier: MPL-2.0
//! Alert payload.
//!
//! This module defines the `Alert` struct and `Severity` enum that producers
//! push onto an [`AlertStack`](super::AlertStack).

use std::fmt;
use std::str::FromStr;

/// Unique identifier for an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlertId(u64);

impl AlertId {
    /// Allocates a new unique alert ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level of an alert banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed successfully.
    Success,
    /// Informational message.
    #[default]
    Info,
    /// Something looks off but nothing failed.
    Warning,
    /// Something failed.
    Danger,
}

impl Severity {
    /// Returns the lowercase name used for parsing and display.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSeverity(pub String);

impl fmt::Display for UnknownSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown severity: {}", self.0)
    }
}

impl std::error::Error for UnknownSeverity {}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" => Ok(Severity::Success),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "danger" | "error" => Ok(Severity::Danger),
            other => Err(UnknownSeverity(other.to_string())),
        }
    }
}

/// An alert to be shown to the user.
///
/// Alerts are immutable once created. Two alerts with the same text are
/// still distinct: identity is the [`AlertId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    id: AlertId,
    severity: Severity,
    message: String,
}

impl Alert {
    /// Creates a new alert with the given severity and message.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: AlertId::new(),
            severity,
            message: message.into(),
        }
    }

    /// Creates a success alert.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    /// Creates an info alert.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    /// Creates a warning alert.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Creates a danger alert.
    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(Severity::Danger, message)
    }

    /// Parses a `"<severity>: <message>"` line.
    ///
    /// Lines without a recognised severity prefix become `Info` alerts
    /// carrying the whole line.
    pub fn parse_line(line: &str) -> Self {
        let line = line.trim();
        if let Some((prefix, rest)) = line.split_once(':') {
            if let Ok(severity) = prefix.parse::<Severity>() {
                return Self::new(severity, rest.trim());
            }
        }
        Self::info(line)
    }

    #[must_use]
    pub fn id(&self) -> AlertId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_ids_are_unique_for_equal_text() {
        let a1 = Alert::info("same");
        let a2 = Alert::info("same");
        assert_ne!(a1.id(), a2.id());
        assert_ne!(a1, a2);
    }

    #[test]
    fn constructors_set_correct_severity() {
        assert_eq!(Alert::success("").severity(), Severity::Success);
        assert_eq!(Alert::info("").severity(), Severity::Info);
        assert_eq!(Alert::warning("").severity(), Severity::Warning);
        assert_eq!(Alert::danger("").severity(), Severity::Danger);
    }

    #[test]
    fn severity_parses_names_and_aliases() {
        assert_eq!("Success".parse::<Severity>(), Ok(Severity::Success));
        assert_eq!(" warn ".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("error".parse::<Severity>(), Ok(Severity::Danger));
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn parse_line_reads_severity_prefix() {
        let alert = Alert::parse_line("danger: disk full");
        assert_eq!(alert.severity(), Severity::Danger);
        assert_eq!(alert.message(), "disk full");
    }

    #[test]
    fn parse_line_falls_back_to_info() {
        let alert = Alert::parse_line("note: saved at 10:30");
        assert_eq!(alert.severity(), Severity::Info);
        assert_eq!(alert.message(), "note: saved at 10:30");
    }

    #[test]
    fn display_shows_severity_and_message() {
        assert_eq!(Alert::warning("low battery").to_string(), "[warning] low battery");
    }
}
