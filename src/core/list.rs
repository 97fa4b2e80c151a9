//! The notifying list itself.

use crate::core::{NotifyingListBuilder, SyncRoot};
use crate::error::{ListError, ObserverError, Result};
use crate::notify::observer::{CallbackObserver, FallibleObserver};
use crate::notify::{Observer, ObserverRegistry, Subscription, SubscriptionId};
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use crate::metrics::ListMetrics;

/// Read-only view of a list's elements.
///
/// Derefs to `[T]`, so indexing, `len()` and `iter()` all work on it. Appends
/// to the same list block until the view is dropped.
pub type ElementsGuard<'a, T> = MappedRwLockReadGuard<'a, [T]>;

/// An ordered, append-only list that notifies observers when items are added.
///
/// Every append call, single or batch, makes its items visible first and then
/// invokes each registered observer exactly once, in subscription order, on
/// the calling thread. The notification carries no payload.
///
/// Each operation is individually thread-safe. Making a sequence of
/// operations atomic is the caller's job: take the token returned by
/// [`sync_handle`](Self::sync_handle) around the sequence. The list never
/// takes that token on its own.
///
/// # Examples
///
/// ```rust
/// use notifying_list::prelude::*;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// # fn example() -> Result<()> {
/// let list = NotifyingList::new();
/// let added = Arc::new(AtomicUsize::new(0));
///
/// let added_clone = Arc::clone(&added);
/// list.subscribe(move || {
///     added_clone.fetch_add(1, Ordering::SeqCst);
/// });
///
/// list.append_one(5)?;
/// list.append_many([6, 7, 8])?;
///
/// assert_eq!(list.snapshot(), vec![5, 6, 7, 8]);
/// assert_eq!(added.load(Ordering::SeqCst), 2);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct NotifyingList<T> {
    elements: RwLock<Vec<T>>,
    observers: ObserverRegistry,
    sync_root: SyncRoot,
    #[cfg(feature = "metrics")]
    metrics: Option<ListMetrics>,
}

impl<T> NotifyingList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), SyncRoot::new())
    }

    /// Create an empty list with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_parts(Vec::with_capacity(capacity), SyncRoot::new())
    }

    /// Create a builder for configuring a new list.
    pub fn builder() -> NotifyingListBuilder<T> {
        NotifyingListBuilder::new()
    }

    pub(crate) fn from_parts(elements: Vec<T>, sync_root: SyncRoot) -> Self {
        Self {
            elements: RwLock::new(elements),
            observers: ObserverRegistry::new(),
            sync_root,
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }

    #[cfg(feature = "metrics")]
    pub(crate) fn with_metrics(mut self, metrics: ListMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Append one item and notify observers.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::ObserverFailed`] if an observer fails. The item
    /// stays appended in that case.
    pub fn append_one(&self, item: T) -> Result<()> {
        self.elements.write().push(item);
        self.after_append(1)
    }

    /// Append every item of `items`, in order, and notify observers once.
    ///
    /// The batch is collected before the list is locked and becomes visible
    /// all at once. An empty batch leaves the list unchanged but still
    /// notifies.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::ObserverFailed`] if an observer fails. The whole
    /// batch stays appended in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use notifying_list::prelude::*;
    /// let list = NotifyingList::new();
    /// list.append_many(vec![1, 2, 3]).unwrap();
    /// list.append_many(Vec::new()).unwrap();
    /// assert_eq!(list.snapshot(), vec![1, 2, 3]);
    /// ```
    pub fn append_many<I>(&self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let mut batch: Vec<T> = items.into_iter().collect();
        let added = batch.len();
        self.elements.write().append(&mut batch);
        self.after_append(added)
    }

    /// Append a batch that may be absent.
    ///
    /// Behaves like [`append_many`](Self::append_many) for `Some`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidArgument`] for `None`, without touching
    /// the list or notifying anyone. Otherwise fails as `append_many` does.
    pub fn try_append_many<I>(&self, items: Option<I>) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        match items {
            Some(items) => self.append_many(items),
            None => Err(ListError::invalid_argument(
                "batch to append must not be absent",
            )),
        }
    }

    fn after_append(&self, added: usize) -> Result<()> {
        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            metrics.record_append(added);
            metrics.update_observer_count(self.observers.len());
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(added, observers = self.observers.len(), "items appended");
        #[cfg(not(feature = "tracing"))]
        let _ = added;

        match self.observers.notify_all() {
            Ok(_notified) => {
                #[cfg(feature = "metrics")]
                if let Some(metrics) = &self.metrics {
                    metrics.record_notification(_notified);
                }
                Ok(())
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %err, "observer failed, remaining observers skipped");
                #[cfg(feature = "metrics")]
                if let Some(metrics) = &self.metrics {
                    metrics.record_observer_failure();
                }
                Err(ListError::ObserverFailed(err))
            }
        }
    }

    /// Register a callback invoked after every append.
    ///
    /// The same callback may be registered more than once; each registration
    /// is invoked separately.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribe_observer(Arc::new(CallbackObserver(callback)))
    }

    /// Register a callback that may fail.
    ///
    /// An `Err` from the callback aborts the notification round and surfaces
    /// from the append call that triggered it.
    pub fn try_subscribe<F, E>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() -> std::result::Result<(), E> + Send + Sync + 'static,
        E: Into<ObserverError>,
    {
        self.subscribe_observer(Arc::new(FallibleObserver(callback)))
    }

    /// Register a shared observer.
    ///
    /// The list keeps a strong reference until the observer is unsubscribed.
    pub fn subscribe_observer(&self, observer: Arc<dyn Observer>) -> SubscriptionId {
        let id = self.observers.subscribe(observer);
        self.observers_changed(id, "subscribed");
        id
    }

    /// Register a callback for as long as the returned guard lives.
    pub fn subscribe_scoped<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let subscription = self
            .observers
            .subscribe_scoped(Arc::new(CallbackObserver(callback)));
        self.observers_changed(subscription.id(), "subscribed");
        subscription
    }

    /// Remove a registration. Unknown or already removed ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        if self.observers.unsubscribe(id) {
            self.observers_changed(id, "unsubscribed");
        }
    }

    fn observers_changed(&self, _id: SubscriptionId, _what: &'static str) {
        #[cfg(feature = "tracing")]
        tracing::debug!(id = %_id, observers = self.observers.len(), "observer {}", _what);

        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            metrics.update_observer_count(self.observers.len());
        }
    }

    /// Whether `id` is still registered.
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.observers.contains(id)
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// The caller-managed synchronization token for this list.
    ///
    /// See [`SyncRoot`] for the locking discipline. Clone the token to hold
    /// it independently of the list.
    pub fn sync_handle(&self) -> &SyncRoot {
        &self.sync_root
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.elements.read().len()
    }

    /// Returns `true` if no items have been appended.
    pub fn is_empty(&self) -> bool {
        self.elements.read().is_empty()
    }

    /// Borrow the items as a slice.
    ///
    /// Do not append to the same list while the view is alive on this
    /// thread: the append waits for the view and the thread deadlocks.
    pub fn read(&self) -> ElementsGuard<'_, T> {
        RwLockReadGuard::map(self.elements.read(), Vec::as_slice)
    }

    /// Clone of the item at `index`.
    pub fn get(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        self.elements.read().get(index).cloned()
    }

    /// Whether an equal item has been appended.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.elements.read().contains(item)
    }

    /// Clone of all items, in insertion order.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.elements.read().clone()
    }

    /// Consume the list and return its items. Observers are dropped.
    pub fn into_inner(self) -> Vec<T> {
        self.elements.into_inner()
    }
}

impl<T> Default for NotifyingList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for NotifyingList<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::from_parts(elements, SyncRoot::new())
    }
}

impl<T> FromIterator<T> for NotifyingList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> IntoIterator for NotifyingList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_inner().into_iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for NotifyingList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyingList")
            .field("elements", &&*self.read())
            .field("observers", &self.observers.len())
            .finish()
    }
}
