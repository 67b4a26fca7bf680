//! Observability HTTP Routes
//!
//! Health check reporting store reachability.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use super::errors::method_not_allowed_handler;
use crate::store::DocumentStore;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: String,
}

/// Health check route
pub fn health_routes(store: Arc<dyn DocumentStore>) -> Router {
    Router::new()
        .route(
            "/health",
            get(health_handler).fallback(method_not_allowed_handler),
        )
        .with_state(store)
}

/// 200 when the store answers a ping, 503 otherwise
async fn health_handler(State(store): State<Arc<dyn DocumentStore>>) -> impl IntoResponse {
    let (status, store_status, code) = match store.ping().await {
        Ok(()) => ("ok", "ok", StatusCode::OK),
        Err(e) => {
            tracing::warn!(error = %e, "store health check failed");
            ("degraded", "unreachable", StatusCode::SERVICE_UNAVAILABLE)
        }
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store_status.to_string(),
    };

    (code, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            store: "ok".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["store"], "ok");
    }
}
