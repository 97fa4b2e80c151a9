//! Built-in metrics for list operations.
//!
//! Provides OpenTelemetry metrics tracking:
//! - Append calls and appended items
//! - Notification rounds dispatched
//! - Observer failures
//! - Active observers
//!
//! # Examples
//!
//! ```rust,no_run
//! use notifying_list::prelude::*;
//! use notifying_list::metrics::ListMetrics;
//! use opentelemetry::global;
//!
//! let meter = global::meter("my-driver");
//!
//! let devices: NotifyingList<String> = NotifyingList::builder()
//!     .with_metrics(ListMetrics::new(meter))
//!     .build();
//! ```

mod list_metrics;

pub use list_metrics::ListMetrics;
