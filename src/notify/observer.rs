//! The observer seam and closure adapters.

use crate::error::ObserverError;

/// Something that wants to hear about items being added to a list.
///
/// The notification carries no payload: an observer that needs to know what
/// was added has to read the list itself. Observers run synchronously on the
/// appending thread, after the items are already visible.
///
/// Returning `Err` stops the current notification round. The error is
/// handed back to whoever performed the append.
pub trait Observer: Send + Sync {
    /// Called once per append call, single or batch.
    fn items_added(&self) -> Result<(), ObserverError>;
}

/// Adapter for callbacks that cannot fail.
pub(crate) struct CallbackObserver<F>(pub(crate) F);

impl<F> Observer for CallbackObserver<F>
where
    F: Fn() + Send + Sync,
{
    fn items_added(&self) -> Result<(), ObserverError> {
        (self.0)();
        Ok(())
    }
}

/// Adapter for callbacks returning a `Result`.
pub(crate) struct FallibleObserver<F>(pub(crate) F);

impl<F, E> Observer for FallibleObserver<F>
where
    F: Fn() -> Result<(), E> + Send + Sync,
    E: Into<ObserverError>,
{
    fn items_added(&self) -> Result<(), ObserverError> {
        (self.0)().map_err(Into::into)
    }
}
