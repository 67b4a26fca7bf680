//! # In-Memory Document Store
//!
//! Keeps documents in process. Behaves like the Redis backend for the subset
//! of commands the service uses: whole-document writes at the root path,
//! glob key scans and an `OK` acknowledgment.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;

use super::backend::{DocumentStore, ROOT_PATH, WRITE_ACK};
use super::errors::{StoreError, StoreResult};

#[derive(Debug, Default)]
struct Documents {
    by_key: HashMap<String, Value>,
    // first-write order, used as scan order
    order: Vec<String>,
}

/// In-memory document store
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Documents>,
    closed: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents
            .read()
            .map(|docs| docs.by_key.len())
            .unwrap_or(0)
    }

    /// Whether the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }

    fn check_path(path: &str) -> StoreResult<()> {
        if path == ROOT_PATH || path == "$" {
            Ok(())
        } else {
            Err(StoreError::UnsupportedPath(path.to_string()))
        }
    }

    fn lock_error() -> StoreError {
        StoreError::Command("document map lock poisoned".to_string())
    }
}

/// Translate a store glob (`*`, `?`, `[...]`, `\` escapes) into an anchored regex.
fn glob_to_regex(pattern: &str) -> StoreResult<Regex> {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push('^');

    let mut chars = pattern.chars();
    let mut in_class = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    out.push_str(&regex::escape(&next.to_string()));
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push('[');
                if let Some(first) = chars.next() {
                    match first {
                        '^' => out.push('^'),
                        ']' => {
                            in_class = false;
                            out.push_str("\\]]");
                        }
                        other => out.push_str(&regex::escape(&other.to_string())),
                    }
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(']');
            }
            '-' if in_class => out.push('-'),
            '*' if !in_class => out.push_str(".*"),
            '?' if !in_class => out.push('.'),
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }

    if in_class {
        out.push(']');
    }
    out.push('$');

    Regex::new(&out).map_err(|e| StoreError::Command(format!("invalid pattern {pattern:?}: {e}")))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn set_document(&self, key: &str, path: &str, json: &str) -> StoreResult<String> {
        self.ensure_open()?;
        Self::check_path(path)?;

        let value: Value =
            serde_json::from_str(json).map_err(|e| StoreError::InvalidDocument(e.to_string()))?;

        let mut docs = self.documents.write().map_err(|_| Self::lock_error())?;
        if docs.by_key.insert(key.to_string(), value).is_none() {
            docs.order.push(key.to_string());
        }

        Ok(WRITE_ACK.to_string())
    }

    async fn get_document(&self, key: &str, path: &str) -> StoreResult<Option<String>> {
        self.ensure_open()?;
        Self::check_path(path)?;

        let docs = self.documents.read().map_err(|_| Self::lock_error())?;
        match docs.by_key.get(key) {
            Some(value) if path == "$" => Ok(Some(Value::Array(vec![value.clone()]).to_string())),
            Some(value) => Ok(Some(value.to_string())),
            None => Ok(None),
        }
    }

    async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        self.ensure_open()?;
        let matcher = glob_to_regex(pattern)?;

        let docs = self.documents.read().map_err(|_| Self::lock_error())?;
        Ok(docs
            .order
            .iter()
            .filter(|key| matcher.is_match(key))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.ensure_open()
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
