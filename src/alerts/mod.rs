// SPDX-License-Identifier: MPL-2.0
//! Bounded, self-draining alert stack.
//!
//! Producers push alerts; the stack keeps at most `max_len` of them and drops
//! the oldest one every `living_time` until it is empty. Renderers subscribe
//! to the ordered content and redraw on every change.
//!
//! # Components
//!
//! - [`alert`] - `Alert` payload with severity levels
//! - [`queue`] - `AlertQueue`, the runtime-free state machine
//! - [`stack`] - `AlertStack`, which drives the eviction timer on tokio
//!
//! # Usage
//!
//! ```no_run
//! use alert_stack::alerts::{Alert, AlertStack};
//! use alert_stack::domain::alert::StackSettings;
//! use std::time::Duration;
//!
//! # async fn demo() -> alert_stack::error::Result<()> {
//! let settings = StackSettings::try_from_raw(3, Duration::from_secs(5))?;
//! let stack = AlertStack::new(settings)?;
//! let mut updates = stack.subscribe();
//!
//! stack.insert(Alert::success("Saved"));
//! updates.changed().await.ok();
//! for alert in updates.borrow().iter() {
//!     println!("{alert}");
//! }
//! # Ok(())
//! # }
//! ```

mod alert;
mod queue;
mod stack;

pub use alert::{Alert, AlertId, Severity, UnknownSeverity};
pub use queue::{AlertQueue, Entry, Epoch, Expiry, Insertion, Phase};
pub use stack::{AlertStack, Command};
