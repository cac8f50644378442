//! API Handlers
//!
//! HTTP request handlers for each admin endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{AiResponseCache, CacheStats, ImportSummary, Snapshot};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, InvalidatePatternRequest,
    InvalidateSubjectRequest, RemovedResponse, SetRequest, SetResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The cache; all locking happens inside it
    pub cache: Arc<AiResponseCache>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: AiResponseCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration, with the cleanup
    /// scheduler running. Must be called inside a tokio runtime.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(AiResponseCache::start(config.clone()))
    }
}

/// Handler for PUT /entries
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.cache.set(req.key.clone(), req.value, req.ttl).await?;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /entries/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(&key).await {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /entries/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if state.cache.delete(&key).await {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for DELETE /entries
pub async fn clear_handler(State(state): State<AppState>) -> Json<RemovedResponse> {
    Json(RemovedResponse::new(state.cache.clear().await))
}

/// Handler for POST /cleanup
pub async fn cleanup_handler(State(state): State<AppState>) -> Json<RemovedResponse> {
    Json(RemovedResponse::new(state.cache.cleanup().await))
}

/// Handler for POST /invalidate
pub async fn invalidate_pattern_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidatePatternRequest>,
) -> Result<Json<RemovedResponse>> {
    let removed = state.cache.invalidate_pattern(&req.pattern).await?;
    Ok(Json(RemovedResponse::new(removed)))
}

/// Handler for POST /invalidate/subject
pub async fn invalidate_subject_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateSubjectRequest>,
) -> Result<Json<RemovedResponse>> {
    let removed = state.cache.invalidate_by_subject(&req.subject).await?;
    Ok(Json(RemovedResponse::new(removed)))
}

/// Handler for GET /snapshot
pub async fn export_handler(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.cache.export().await)
}

/// Handler for POST /snapshot
///
/// Takes the raw body so that malformed entries can be skipped instead of
/// failing the whole request.
pub async fn import_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportSummary>> {
    let summary = state.cache.import_json(&body).await?;
    Ok(Json(summary))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
