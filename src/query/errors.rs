//! # Query Repository Errors

use thiserror::Error;

use crate::store::StoreError;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Query repository errors
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// No document under the key derived from this id
    #[error("Query not found: {0}")]
    NotFound(String),

    /// The store answered a write with something other than its success reply
    #[error("Store did not acknowledge write to {key}: {reply:?}")]
    WriteRejected { key: String, reply: String },

    #[error("Failed to serialize query: {0}")]
    Serialize(String),

    /// A stored document does not decode as a query
    #[error("Failed to decode document {key}: {message}")]
    Deserialize { key: String, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}
