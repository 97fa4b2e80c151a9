//! # notifying-list
//!
//! An ordered, append-only list that synchronously notifies observers when
//! items are added.
//!
//! ## Overview
//!
//! `notifying-list` is a small building block for components that must react
//! the moment new items arrive, such as a driver keeping track of the
//! peripherals it has discovered:
//! - Single and batch appends, each followed by exactly one notification
//! - Observers invoked in subscription order, on the appending thread
//! - Fail-fast dispatch: an observer error stops the round and reaches the appender
//! - A caller-managed [`SyncRoot`](core::SyncRoot) token for multi-step atomicity
//!
//! ## Quick Start
//!
//! ```rust
//! use notifying_list::prelude::*;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<()> {
//! let devices = Arc::new(NotifyingList::new());
//!
//! let watcher = Arc::downgrade(&devices);
//! devices.subscribe(move || {
//!     if let Some(devices) = watcher.upgrade() {
//!         println!("{} device(s) attached", devices.len());
//!     }
//! });
//!
//! devices.append_one("keyboard")?;
//! devices.append_many(["mouse", "gamepad"])?;
//!
//! // Make "check, then append" atomic against other cooperating callers.
//! {
//!     let _guard = devices.sync_handle().lock();
//!     if !devices.contains(&"tablet") {
//!         devices.append_one("tablet")?;
//!     }
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Feature Flags
//!
//! - `tracing` (default): emit `tracing` events for appends, subscriptions
//!   and observer failures
//! - `metrics`: record OpenTelemetry metrics through
//!   [`ListMetrics`](metrics::ListMetrics)

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod notify;

#[cfg(feature = "metrics")]
pub mod metrics;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{NotifyingList, NotifyingListBuilder, SyncRoot};
    pub use crate::error::{ListError, ObserverError, Result};
    pub use crate::notify::{Observer, Subscription, SubscriptionId};
}
