//! Ordered registry of observers.

use crate::error::ObserverError;
use crate::notify::Observer;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Ids are unique across all registries, so an id from one list can never
/// remove an observer from another.
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Identifies one registration in an [`ObserverRegistry`].
///
/// Registering the same observer twice yields two distinct ids, and each
/// registration is invoked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Internal registry state.
struct RegistryInner {
    observers: Vec<(SubscriptionId, Arc<dyn Observer>)>,
}

impl RegistryInner {
    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub_id, _)| *sub_id != id);
        self.observers.len() != before
    }
}

/// Subscription guard that unsubscribes when dropped.
///
/// Removal happens synchronously inside `drop`, so no notification issued
/// after the drop returns will reach the observer.
#[must_use = "dropping a Subscription immediately unsubscribes the observer"]
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<RwLock<RegistryInner>>,
}

impl Subscription {
    /// The id of the underlying registration.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Keep the observer registered after this guard goes away.
    ///
    /// The returned id can still be passed to `unsubscribe` later.
    pub fn detach(mut self) -> SubscriptionId {
        self.registry = Weak::new();
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.write().remove(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &(self.registry.strong_count() > 0))
            .finish()
    }
}

/// Registry of observers, invoked in subscription order.
///
/// Dispatch works on a snapshot of the registry taken when
/// [`notify_all`](Self::notify_all) starts, and no lock is held while an
/// observer runs. Observers may therefore subscribe, unsubscribe, or read
/// whatever they observe from inside their callback. Changes they make to the
/// registry take effect from the next round.
///
/// # Examples
///
/// ```rust
/// use notifying_list::notify::ObserverRegistry;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let registry = ObserverRegistry::new();
/// let hits = Arc::new(AtomicUsize::new(0));
///
/// let hits_clone = Arc::clone(&hits);
/// let id = registry.subscribe_fn(move || {
///     hits_clone.fetch_add(1, Ordering::SeqCst);
/// });
///
/// registry.notify_all().unwrap();
/// registry.unsubscribe(id);
/// registry.notify_all().unwrap();
///
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
pub struct ObserverRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl ObserverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                observers: Vec::new(),
            })),
        }
    }

    /// Register an observer and return its id.
    pub fn subscribe(&self, observer: Arc<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId(NEXT_ID.fetch_add(1, Ordering::Relaxed));
        self.inner.write().observers.push((id, observer));
        id
    }

    /// Register an infallible callback.
    pub fn subscribe_fn<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(crate::notify::observer::CallbackObserver(callback)))
    }

    /// Register an observer behind a guard that unsubscribes on drop.
    pub fn subscribe_scoped(&self, observer: Arc<dyn Observer>) -> Subscription {
        let id = self.subscribe(observer);
        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Remove a registration.
    ///
    /// Returns `false` if the id was unknown or already removed; that case is
    /// otherwise a no-op.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.write().remove(id)
    }

    /// Whether `id` is currently registered.
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.inner
            .read()
            .observers
            .iter()
            .any(|(sub_id, _)| *sub_id == id)
    }

    /// Number of active registrations.
    pub fn len(&self) -> usize {
        self.inner.read().observers.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().observers.is_empty()
    }

    fn snapshot(&self) -> Vec<Arc<dyn Observer>> {
        self.inner
            .read()
            .observers
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect()
    }

    /// Invoke every registered observer once, in subscription order.
    ///
    /// Stops at the first observer that returns an error and returns that
    /// error; observers after it are skipped. On success, returns the number
    /// of observers invoked.
    pub fn notify_all(&self) -> Result<usize, ObserverError> {
        let observers = self.snapshot();
        for observer in &observers {
            observer.items_added()?;
        }
        Ok(observers.len())
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicUsize;

    fn counting(counter: &Arc<AtomicUsize>) -> impl Fn() + Send + Sync + 'static {
        let counter = Arc::clone(counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Failing;

    impl Observer for Failing {
        fn items_added(&self) -> Result<(), ObserverError> {
            Err("refused".into())
        }
    }

    #[test]
    fn test_subscribe_and_notify() {
        let registry = ObserverRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        registry.subscribe_fn(counting(&counter));

        assert_eq!(registry.notify_all().unwrap(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        registry.notify_all().unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invocation_follows_subscription_order() {
        let registry = ObserverRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            registry.subscribe_fn(move || order.lock().push(tag));
        }

        registry.notify_all().unwrap();
        assert_eq!(*order.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_same_observer_twice_is_invoked_twice() {
        let registry = ObserverRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let observer: Arc<dyn Observer> =
            Arc::new(crate::notify::observer::CallbackObserver(counting(&counter)));

        let a = registry.subscribe(Arc::clone(&observer));
        let b = registry.subscribe(observer);
        assert_ne!(a, b);

        registry.notify_all().unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unsubscribe_unknown_is_noop() {
        let registry = ObserverRegistry::new();
        let id = registry.subscribe_fn(|| {});

        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ids_do_not_cross_registries() {
        let first = ObserverRegistry::new();
        let second = ObserverRegistry::new();
        let a = first.subscribe_fn(|| {});
        let b = second.subscribe_fn(|| {});

        assert_ne!(a, b);
        assert!(!second.unsubscribe(a));
        assert!(second.contains(b));
    }

    #[test]
    fn test_failure_skips_later_observers() {
        let registry = ObserverRegistry::new();
        let before = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));

        registry.subscribe_fn(counting(&before));
        registry.subscribe(Arc::new(Failing));
        registry.subscribe_fn(counting(&after));

        let err = registry.notify_all().unwrap_err();
        assert_eq!(err.to_string(), "refused");
        assert_eq!(before.load(Ordering::SeqCst), 1);
        assert_eq!(after.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_scoped_subscription_drop() {
        let registry = ObserverRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let handle = registry.subscribe_scoped(Arc::new(
            crate::notify::observer::CallbackObserver(counting(&counter)),
        ));
        assert!(registry.contains(handle.id()));

        registry.notify_all().unwrap();
        drop(handle);

        // Removal is synchronous, no waiting needed.
        registry.notify_all().unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_detached_subscription_survives() {
        let registry = ObserverRegistry::new();
        let handle = registry.subscribe_scoped(Arc::new(
            crate::notify::observer::CallbackObserver(|| {}),
        ));

        let id = handle.detach();
        assert!(registry.contains(id));
        assert!(registry.unsubscribe(id));
    }

    #[test]
    fn test_guard_outliving_registry() {
        let registry = ObserverRegistry::new();
        let handle = registry.subscribe_scoped(Arc::new(
            crate::notify::observer::CallbackObserver(|| {}),
        ));
        drop(registry);
        drop(handle);
    }

    #[test]
    fn test_observer_can_unsubscribe_itself() {
        let registry = Arc::new(ObserverRegistry::new());
        let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));
        let counter = Arc::new(AtomicUsize::new(0));

        let registry_clone = Arc::clone(&registry);
        let slot_clone = Arc::clone(&slot);
        let counter_clone = Arc::clone(&counter);
        let id = registry.subscribe_fn(move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
            if let Some(id) = *slot_clone.lock() {
                registry_clone.unsubscribe(id);
            }
        });
        *slot.lock() = Some(id);

        registry.notify_all().unwrap();
        registry.notify_all().unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
