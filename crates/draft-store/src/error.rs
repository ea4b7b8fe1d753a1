use thiserror::Error;

/// Errors that can occur when interacting with the draft store.
///
/// A missing draft is not an error; `load` returns `None` for it.
#[derive(Debug, Error)]
pub enum DraftStoreError {
    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for draft store operations.
pub type Result<T> = std::result::Result<T, DraftStoreError>;
