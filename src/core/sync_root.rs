//! Caller-managed synchronization token.

use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::sync::Arc;

/// Opaque token for coordinating access to a list across several calls.
///
/// The list never acquires this lock itself. Each individual list operation
/// is already safe to call from any thread; the token exists so that callers
/// can make a *sequence* of operations atomic with respect to other callers
/// following the same discipline (for example "read the length, then append").
///
/// Clones refer to the same underlying lock. The lock is not reentrant:
/// taking it again on a thread that already holds it, including from inside
/// an observer triggered by the guarded append, deadlocks.
///
/// # Examples
///
/// ```rust
/// use notifying_list::prelude::*;
///
/// let list = NotifyingList::new();
/// {
///     let _guard = list.sync_handle().lock();
///     if list.is_empty() {
///         list.append_one("first").unwrap();
///     }
/// }
/// assert_eq!(list.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct SyncRoot {
    lock: Arc<Mutex<()>>,
}

/// Guard returned by [`SyncRoot::lock`]; releases the token on drop.
#[must_use = "the token is released as soon as the guard is dropped"]
pub struct SyncGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl SyncRoot {
    /// Create a fresh, unshared token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the token is acquired.
    pub fn lock(&self) -> SyncGuard<'_> {
        SyncGuard {
            _guard: self.lock.lock(),
        }
    }

    /// Acquire the token if it is free right now.
    pub fn try_lock(&self) -> Option<SyncGuard<'_>> {
        self.lock.try_lock().map(|guard| SyncGuard { _guard: guard })
    }

    /// Whether some caller currently holds the token.
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// Whether two tokens refer to the same lock.
    pub fn same_as(&self, other: &SyncRoot) -> bool {
        Arc::ptr_eq(&self.lock, &other.lock)
    }
}

impl fmt::Debug for SyncRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncRoot")
            .field("locked", &self.is_locked())
            .finish()
    }
}

impl fmt::Debug for SyncGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SyncGuard")
    }
}
