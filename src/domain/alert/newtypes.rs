// SPDX-License-Identifier: MPL-2.0
//! Alert stack newtypes.
//!
//! Both values must be strictly positive. Unlike the clamping newtypes used
//! for user-facing sliders, these reject bad input: a zero capacity or a
//! zero living time cannot describe a working stack.

use crate::domain::error::InvalidConfiguration;
use std::time::Duration;

// =============================================================================
// Capacity
// =============================================================================

/// Maximum number of alerts held at once (`maxLen`).
///
/// # Example
///
/// ```
/// use alert_stack::domain::alert::Capacity;
///
/// let capacity = Capacity::new(3).unwrap();
/// assert_eq!(capacity.value(), 3);
///
/// assert!(Capacity::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity(usize);

impl Capacity {
    /// Creates a capacity, rejecting zero.
    pub fn new(value: usize) -> Result<Self, InvalidConfiguration> {
        if value == 0 {
            return Err(InvalidConfiguration::ZeroCapacity);
        }
        Ok(Self(value))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

// =============================================================================
// LivingTime
// =============================================================================

/// Time between two consecutive timer-driven evictions (`livingTime`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivingTime(Duration);

impl LivingTime {
    /// Creates a living time, rejecting a zero duration.
    pub fn new(value: Duration) -> Result<Self, InvalidConfiguration> {
        if value.is_zero() {
            return Err(InvalidConfiguration::ZeroLivingTime);
        }
        Ok(Self(value))
    }

    /// Creates a living time from whole seconds.
    pub fn from_secs(secs: u64) -> Result<Self, InvalidConfiguration> {
        Self::new(Duration::from_secs(secs))
    }

    /// Returns the living time as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        self.0
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_rejects_zero() {
        assert_eq!(Capacity::new(0), Err(InvalidConfiguration::ZeroCapacity));
    }

    #[test]
    fn capacity_accepts_positive_values_unchanged() {
        assert_eq!(Capacity::new(1).map(Capacity::value), Ok(1));
        assert_eq!(Capacity::new(10_000).map(Capacity::value), Ok(10_000));
    }

    #[test]
    fn living_time_rejects_zero() {
        assert_eq!(
            LivingTime::new(Duration::ZERO),
            Err(InvalidConfiguration::ZeroLivingTime)
        );
        assert_eq!(
            LivingTime::from_secs(0),
            Err(InvalidConfiguration::ZeroLivingTime)
        );
    }

    #[test]
    fn living_time_keeps_sub_second_precision() {
        let living_time = LivingTime::new(Duration::from_millis(250)).unwrap();
        assert_eq!(living_time.as_duration(), Duration::from_millis(250));
    }

    #[test]
    fn from_secs_converts_correctly() {
        let living_time = LivingTime::from_secs(5).unwrap();
        assert_eq!(living_time.as_duration(), Duration::from_secs(5));
    }
}
