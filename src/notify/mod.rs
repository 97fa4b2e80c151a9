//! Item-added notification system.
//!
//! Provides the [`Observer`] trait and the ordered registry that dispatches
//! notifications to observers.

pub mod observer;
pub mod registry;

pub use observer::Observer;
pub use registry::{ObserverRegistry, Subscription, SubscriptionId};
