// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// A stack configuration value that cannot describe a working stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidConfiguration {
    /// `max_len` was zero.
    ZeroCapacity,
    /// `living_time` was zero.
    ZeroLivingTime,
}

impl fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidConfiguration::ZeroCapacity => write!(f, "max_len must be at least 1"),
            InvalidConfiguration::ZeroLivingTime => {
                write!(f, "living_time must be longer than zero")
            }
        }
    }
}

impl std::error::Error for InvalidConfiguration {}
