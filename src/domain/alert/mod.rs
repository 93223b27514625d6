// SPDX-License-Identifier: MPL-2.0
//! Alert stack value objects.

mod newtypes;

pub use newtypes::{Capacity, LivingTime};

use super::error::InvalidConfiguration;
use std::time::Duration;

/// Validated, immutable configuration of one alert stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackSettings {
    capacity: Capacity,
    living_time: LivingTime,
}

impl StackSettings {
    /// Creates settings from already validated parts.
    #[must_use]
    pub fn new(capacity: Capacity, living_time: LivingTime) -> Self {
        Self {
            capacity,
            living_time,
        }
    }

    /// Validates raw values, failing fast on zero.
    pub fn try_from_raw(
        max_len: usize,
        living_time: Duration,
    ) -> Result<Self, InvalidConfiguration> {
        Ok(Self::new(Capacity::new(max_len)?, LivingTime::new(living_time)?))
    }

    #[must_use]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    #[must_use]
    pub fn living_time(&self) -> LivingTime {
        self.living_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_from_raw_reports_capacity_before_living_time() {
        assert_eq!(
            StackSettings::try_from_raw(0, Duration::ZERO),
            Err(InvalidConfiguration::ZeroCapacity)
        );
        assert_eq!(
            StackSettings::try_from_raw(3, Duration::ZERO),
            Err(InvalidConfiguration::ZeroLivingTime)
        );
    }

    #[test]
    fn try_from_raw_accepts_positive_values() {
        let settings = StackSettings::try_from_raw(3, Duration::from_secs(5)).unwrap();
        assert_eq!(settings.capacity().value(), 3);
        assert_eq!(settings.living_time().as_duration(), Duration::from_secs(5));
    }
}
