//! # Document Store Client
//!
//! Pooled access to a JSON document store. The service only needs three
//! primitives: write a document at a path, read a document at a path, and
//! enumerate keys matching a glob.
//!
//! - [`RedisStore`] talks to Redis with the JSON module through a bounded,
//!   authenticated connection pool.
//! - [`MemoryStore`] keeps documents in process for tests and local runs.

pub mod backend;
pub mod config;
pub mod errors;
pub mod memory;
pub mod redis_store;

pub use backend::{DocumentStore, ROOT_PATH, WRITE_ACK};
pub use config::StoreConfig;
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
