// SPDX-License-Identifier: MPL-2.0
//! `alert_stack` keeps a bounded, self-draining stack of alerts.
//!
//! Producers push alerts, the oldest one is dropped every living time (or as
//! soon as capacity is exceeded), and renderers subscribe to the ordered
//! content. Rendering itself is left to the consumer.

pub mod alerts;
pub mod config;
pub mod domain;
pub mod error;
