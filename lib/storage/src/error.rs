use std::sync::PoisonError;

/// An error raised by the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A writer panicked while holding the dataset lock.
    #[error("graph store lock poisoned by a panicking writer")]
    Poisoned,
    /// The backend rejected the operation.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl<T> From<PoisonError<T>> for StorageError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}
