//! Query HTTP Routes
//!
//! Create, list and fetch query documents.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        DefaultBodyLimit, Path, State,
    },
    routing::{get, post},
    Json, Router,
};

use super::errors::{method_not_allowed_handler, ApiError, ApiResult};
use crate::query::{Query, QueryRepository};

// ==================
// Query Routes
// ==================

/// Create query routes
///
/// Request bodies are unbounded unless `max_body_bytes` is set.
pub fn query_routes(repository: QueryRepository, max_body_bytes: Option<usize>) -> Router {
    let body_limit = match max_body_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route(
            "/query",
            post(create_query_handler)
                .get(list_queries_handler)
                .fallback(method_not_allowed_handler),
        )
        .route(
            "/query/:id",
            get(get_query_handler).fallback(method_not_allowed_handler),
        )
        .layer(body_limit)
        .with_state(repository)
}

// ==================
// Handlers
// ==================

/// Store a new query. Responds with the store acknowledgment.
///
/// The body is decoded whatever its content type; a body that is not a
/// query never reaches the store.
async fn create_query_handler(
    State(repository): State<QueryRepository>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<String>> {
    let body = body.map_err(|e| {
        tracing::debug!(error = %e, "failed to read query body");
        ApiError::InvalidRequest
    })?;

    let query: Query = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "rejected query body");
        ApiError::InvalidRequest
    })?;

    let (stored, ack) = repository
        .create(query)
        .await
        .map_err(ApiError::from_write)?;

    tracing::info!(name = %stored.name, query_id = %stored.query_id, "query created");
    Ok(Json(ack))
}

async fn list_queries_handler(
    State(repository): State<QueryRepository>,
) -> ApiResult<Json<Vec<Query>>> {
    let queries = repository.list_all().await.map_err(ApiError::from_read)?;
    Ok(Json(queries))
}

async fn get_query_handler(
    State(repository): State<QueryRepository>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Query>> {
    let Path(id) = id.map_err(|e| {
        tracing::debug!(error = %e, "rejected query id");
        ApiError::InvalidRequest
    })?;

    let query = repository.get_by_id(&id).await.map_err(ApiError::from_read)?;
    Ok(Json(query))
}
