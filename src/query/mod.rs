//! # Query Documents
//!
//! The domain entity and its repository.

pub mod errors;
pub mod model;
pub mod repository;

pub use errors::{RepositoryError, RepositoryResult};
pub use model::{Group, Query, Response, Rule};
pub use repository::{query_key, QueryRepository, KEY_PREFIX};
