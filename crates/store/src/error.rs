//! Error types for store operations

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by a document store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The caller is not allowed to touch this collection.
    #[error("permission denied for collection '{0}'")]
    PermissionDenied(String),

    /// The backend could not be reached or refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Document body could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The live subscription was closed by the store.
    #[error("subscription closed")]
    SubscriptionClosed,
}
