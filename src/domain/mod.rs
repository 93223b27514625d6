// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value objects with ZERO external dependencies.
//!
//! # Modules
//!
//! - [`alert`]: Stack configuration types ([`Capacity`](alert::Capacity),
//!   [`LivingTime`](alert::LivingTime), [`StackSettings`](alert::StackSettings))
//! - [`error`]: Domain error types ([`InvalidConfiguration`](error::InvalidConfiguration))

pub mod alert;
pub mod error;
