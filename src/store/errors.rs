//! # Document Store Errors

use thiserror::Error;

/// Result type for document store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    // Connection errors
    #[error("Invalid store address: {0}")]
    InvalidAddress(String),

    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Store is closed")]
    Closed,

    // Operation errors
    #[error("Store operation timed out after {0} ms")]
    Timeout(u64),

    #[error("Store command failed: {0}")]
    Command(String),

    #[error("Unsupported document path: {0}")]
    UnsupportedPath(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_connection_refusal() || e.is_io_error() || e.is_connection_dropped() {
            StoreError::Connection(e.to_string())
        } else {
            StoreError::Command(e.to_string())
        }
    }
}

impl From<deadpool_redis::PoolError> for StoreError {
    fn from(e: deadpool_redis::PoolError) -> Self {
        match e {
            deadpool_redis::PoolError::Backend(inner) => StoreError::from(inner),
            deadpool_redis::PoolError::Closed => StoreError::Closed,
            other => StoreError::Pool(other.to_string()),
        }
    }
}
