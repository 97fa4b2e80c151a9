//! Error types for notifying-list.

/// Result type alias for notifying-list operations.
pub type Result<T> = std::result::Result<T, ListError>;

/// Error returned by an observer callback.
///
/// Any error type can be boxed into this; the list never inspects it and
/// hands it back to the appender unchanged inside [`ListError::ObserverFailed`].
pub type ObserverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when appending to a list.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    /// An argument was absent or otherwise unusable.
    ///
    /// Raised by [`try_append_many`](crate::core::NotifyingList::try_append_many)
    /// when no batch is supplied. The list is left untouched.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An observer failed while being notified of an append.
    ///
    /// The appended items are already in the list when this is returned.
    /// Observers after the failing one were not invoked for that append.
    #[error("Observer failed: {0}")]
    ObserverFailed(#[source] ObserverError),
}

impl ListError {
    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Returns `true` if this error came from an observer.
    pub fn is_observer_failure(&self) -> bool {
        matches!(self, Self::ObserverFailed(_))
    }
}

impl From<ObserverError> for ListError {
    fn from(err: ObserverError) -> Self {
        ListError::ObserverFailed(err)
    }
}
