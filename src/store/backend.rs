//! # Document Store Trait

use async_trait::async_trait;

use super::errors::StoreResult;

/// Path addressing the whole document.
pub const ROOT_PATH: &str = ".";

/// Reply a document store sends back for a successful write.
pub const WRITE_ACK: &str = "OK";

/// Backend trait for JSON document stores
///
/// Documents are addressed by key and a path inside the document. Values
/// cross this boundary as serialized JSON text so implementations never need
/// to know the shape of what they store.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Write `json` at `path` inside the document stored under `key`.
    ///
    /// Returns the store's reply, which is [`WRITE_ACK`] on success.
    async fn set_document(&self, key: &str, path: &str, json: &str) -> StoreResult<String>;

    /// Read the JSON at `path` inside the document under `key`.
    ///
    /// Returns `None` when the key does not exist.
    async fn get_document(&self, key: &str, path: &str) -> StoreResult<Option<String>>;

    /// List keys matching a glob pattern, in store order.
    async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>>;

    /// Round trip to the store.
    async fn ping(&self) -> StoreResult<()>;

    /// Stop handing out connections.
    fn close(&self);
}
