//! querystore - stores rule-based query documents in a JSON document store
//!
//! Request flow: `http_server` decodes the request, `query` maps it onto
//! document keys, `store` talks to the document store.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod store;
