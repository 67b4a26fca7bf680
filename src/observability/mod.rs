//! Observability for querystore
//!
//! Structured logging through `tracing`. HTTP requests are traced by the
//! server's `TraceLayer`; store and repository calls emit their own events.
//!
//! # Usage
//!
//! ```ignore
//! use querystore::observability::{self, LogFormat};
//!
//! observability::init(LogFormat::Json)?;
//! tracing::info!(port = 8090, "listening");
//! ```

mod logger;

pub use logger::{init, subscriber, LogFormat, DEFAULT_FILTER};
