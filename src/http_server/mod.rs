//! # querystore HTTP Server Module
//!
//! JSON over HTTP/1.1. Every response carries `Content-Type:
//! application/json` and `Access-Control-Allow-Origin: *`.
//!
//! # Endpoints
//!
//! - `POST /v1/query` - Store a query
//! - `GET /v1/query` - List all queries
//! - `GET /v1/query/:id` - Fetch one query
//! - `/health` - Health check

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod query_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::{build_router, shutdown_signal, HttpServer};
