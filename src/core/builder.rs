//! Builder for constructing NotifyingList instances.

use crate::core::{NotifyingList, SyncRoot};
use crate::notify::Observer;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use crate::metrics::ListMetrics;

/// Builder for constructing a `NotifyingList`.
///
/// Nothing set on the builder triggers a notification: initial elements are
/// present before any observer is registered.
///
/// # Examples
///
/// ```rust
/// use notifying_list::prelude::*;
///
/// let shared = SyncRoot::new();
///
/// let inputs: NotifyingList<&str> = NotifyingList::builder()
///     .with_capacity(16)
///     .with_elements(["keyboard", "mouse"])
///     .with_sync_root(shared.clone())
///     .build();
///
/// let outputs: NotifyingList<&str> = NotifyingList::builder()
///     .with_sync_root(shared.clone())
///     .build();
///
/// assert_eq!(inputs.len(), 2);
/// assert!(inputs.sync_handle().same_as(outputs.sync_handle()));
/// ```
pub struct NotifyingListBuilder<T> {
    elements: Vec<T>,
    capacity: Option<usize>,
    sync_root: Option<SyncRoot>,
    observers: Vec<Arc<dyn Observer>>,
    #[cfg(feature = "metrics")]
    metrics: Option<ListMetrics>,
}

impl<T> NotifyingListBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            capacity: None,
            sync_root: None,
            observers: Vec::new(),
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }

    /// Reserve room for at least `capacity` items in total.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Start the list with these items, in order.
    ///
    /// May be called repeatedly; later calls add after earlier ones.
    pub fn with_elements<I>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        self.elements.extend(elements);
        self
    }

    /// Use an existing token instead of creating a fresh one.
    ///
    /// Lists sharing a token can be locked together by one guard.
    pub fn with_sync_root(mut self, sync_root: SyncRoot) -> Self {
        self.sync_root = Some(sync_root);
        self
    }

    /// Register an observer from the start.
    ///
    /// No id is handed out for it, so it stays registered for the lifetime
    /// of the list. Use [`NotifyingList::subscribe_observer`] when it must be
    /// removable.
    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Record list activity into the given metrics collector.
    #[cfg(feature = "metrics")]
    pub fn with_metrics(mut self, metrics: ListMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the list.
    pub fn build(self) -> NotifyingList<T> {
        let mut elements = self.elements;
        if let Some(capacity) = self.capacity {
            elements.reserve(capacity.saturating_sub(elements.len()));
        }

        let list = NotifyingList::from_parts(elements, self.sync_root.unwrap_or_default());

        #[cfg(feature = "metrics")]
        let list = match self.metrics {
            Some(metrics) => list.with_metrics(metrics),
            None => list,
        };

        for observer in self.observers {
            list.subscribe_observer(observer);
        }

        list
    }
}

impl<T> Default for NotifyingListBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ObserverError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Tally(AtomicUsize);

    impl Observer for Tally {
        fn items_added(&self) -> Result<(), ObserverError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_builder_accumulates_elements() {
        let list = NotifyingListBuilder::new()
            .with_elements([1, 2])
            .with_elements(vec![3])
            .build();

        assert_eq!(list.snapshot(), vec![1, 2, 3]);
    }

    #[test]
    fn test_builder_capacity() {
        let list: NotifyingList<u32> = NotifyingListBuilder::new().with_capacity(64).build();
        assert!(list.is_empty());
        assert!(list.into_inner().capacity() >= 64);
    }

    #[test]
    fn test_builder_observers_not_notified_on_build() {
        let tally = Arc::new(Tally(AtomicUsize::new(0)));

        let list = NotifyingListBuilder::new()
            .with_elements(["a"])
            .with_observer(tally.clone())
            .build();
        assert_eq!(list.observer_count(), 1);
        assert_eq!(tally.0.load(Ordering::SeqCst), 0);

        list.append_one("b").unwrap();
        assert_eq!(tally.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_builder_fresh_sync_root_by_default() {
        let a: NotifyingList<()> = NotifyingListBuilder::new().build();
        let b: NotifyingList<()> = NotifyingListBuilder::new().build();
        assert!(!a.sync_handle().same_as(b.sync_handle()));
    }
}
