//! # Query Repository
//!
//! Maps [`Query`] documents onto store keys. Nothing is cached: every call
//! round-trips to the store.
//!
//! Creation keys documents by name (`query:<name>`) while lookup by id reads
//! `query:<id>`. The two only meet when a query's name equals its generated
//! id; this mirrors the behavior existing clients were built against.

use std::sync::Arc;

use uuid::Uuid;

use super::errors::{RepositoryError, RepositoryResult};
use super::model::Query;
use crate::store::{DocumentStore, ROOT_PATH, WRITE_ACK};

/// Prefix shared by every query document key
pub const KEY_PREFIX: &str = "query:";

/// Store key for a name or id
pub fn query_key(suffix: &str) -> String {
    format!("{}{}", KEY_PREFIX, suffix)
}

/// Repository for query documents
#[derive(Debug, Clone)]
pub struct QueryRepository {
    store: Arc<dyn DocumentStore>,
}

impl QueryRepository {
    /// Create a repository over `store`
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Store a new query under `query:<name>`.
    ///
    /// `query_id` is always replaced with a fresh UUID v4, whatever the
    /// caller put there. A document already stored under the same name is
    /// overwritten. Returns the stored query and the store acknowledgment.
    pub async fn create(&self, mut query: Query) -> RepositoryResult<(Query, String)> {
        query.query_id = Uuid::new_v4().to_string();

        let key = query_key(&query.name);
        let json =
            serde_json::to_string(&query).map_err(|e| RepositoryError::Serialize(e.to_string()))?;

        let reply = self.store.set_document(&key, ROOT_PATH, &json).await?;
        if reply != WRITE_ACK {
            return Err(RepositoryError::WriteRejected { key, reply });
        }

        tracing::debug!(key = %key, query_id = %query.query_id, "query stored");
        Ok((query, reply))
    }

    /// Every stored query, in store scan order.
    ///
    /// The first document that fails to load fails the whole listing. Keys
    /// removed between the scan and the read are skipped.
    pub async fn list_all(&self) -> RepositoryResult<Vec<Query>> {
        let pattern = format!("{}*", KEY_PREFIX);
        let keys = self.store.scan_keys(&pattern).await?;

        let mut queries = Vec::with_capacity(keys.len());
        for key in keys {
            match self.load(&key).await? {
                Some(query) => queries.push(query),
                None => tracing::debug!(key = %key, "key vanished during listing"),
            }
        }

        Ok(queries)
    }

    /// The query stored under `query:<id>`
    pub async fn get_by_id(&self, id: &str) -> RepositoryResult<Query> {
        let key = query_key(id);
        self.load(&key)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn load(&self, key: &str) -> RepositoryResult<Option<Query>> {
        let Some(json) = self.store.get_document(key, ROOT_PATH).await? else {
            return Ok(None);
        };

        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| RepositoryError::Deserialize {
                key: key.to_string(),
                message: e.to_string(),
            })
    }
}
