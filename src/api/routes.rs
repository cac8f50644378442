//! API Routes
//!
//! Configures the Axum router with all admin endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cleanup_handler, clear_handler, delete_handler, export_handler, get_handler, health_handler,
    import_handler, invalidate_pattern_handler, invalidate_subject_handler, set_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /entries` - Store an entry
/// - `DELETE /entries` - Clear the cache
/// - `GET /entries/:key` - Retrieve an entry
/// - `DELETE /entries/:key` - Delete an entry
/// - `POST /invalidate` - Delete entries whose key matches a pattern
/// - `POST /invalidate/subject` - Delete entries derived from a subject
/// - `POST /cleanup` - Sweep expired entries now
/// - `GET /snapshot` - Export a snapshot
/// - `POST /snapshot` - Import a snapshot
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/entries", put(set_handler).delete(clear_handler))
        .route("/entries/:key", get(get_handler).delete(delete_handler))
        .route("/invalidate", post(invalidate_pattern_handler))
        .route("/invalidate/subject", post(invalidate_subject_handler))
        .route("/cleanup", post(cleanup_handler))
        .route("/snapshot", get(export_handler).post(import_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
