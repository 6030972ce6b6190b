//! Route definitions for the Deskfolio HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(filesystem_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        // Headroom for multipart framing around the payload itself.
        .layer(DefaultBodyLimit::max(max_upload + 64 * 1024))
        .with_state(state)
}

/// Filesystem listing and mutation endpoints
fn filesystem_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/filesystem",
            get(handlers::filesystem::list_root).post(handlers::filesystem::create_synthetic),
        )
        .route("/filesystem/upload", post(handlers::filesystem::upload))
        // Mutations live under /items/{id} rather than /{id}: a bare {id}
        // segment would shadow the {*path} catch-all for single-segment
        // GET listings.
        .route(
            "/filesystem/items/{id}",
            put(handlers::filesystem::update_item),
        )
        .route(
            "/filesystem/items/{id}",
            delete(handlers::filesystem::delete_item),
        )
        .route("/filesystem/{*path}", get(handlers::filesystem::list_path))
}

/// Health check endpoints
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
