use thiserror::Error;

/// Errors surfaced by storage backends and the object store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The device storage rejected a read or write, either because it is
    /// unavailable or because its quota is exhausted. The slot keeps its
    /// previous contents; there are no partial writes.
    #[error("storage unavailable for slot `{slot}`: {reason}")]
    StorageUnavailable { slot: String, reason: String },
}

impl StoreError {
    /// Build a [`StoreError::StorageUnavailable`] for `slot`.
    pub fn unavailable(slot: &str, reason: impl std::fmt::Display) -> Self {
        Self::StorageUnavailable {
            slot: slot.to_string(),
            reason: reason.to_string(),
        }
    }
}
