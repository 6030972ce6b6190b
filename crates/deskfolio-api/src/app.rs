//! Application builder — wires router, middleware, and state into an Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use deskfolio_core::config::AppConfig;
use deskfolio_core::config::app::CorsConfig;
use deskfolio_core::error::AppError;
use deskfolio_core::traits::blob::BlobStore;
use deskfolio_database::repositories::item::ItemRepository;
use deskfolio_database::{connection, migration};
use deskfolio_service::FilesystemService;
use deskfolio_service::filesystem::bootstrap;
use deskfolio_storage::providers::local::LocalBlobStore;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Construct the full application state from configuration.
///
/// Opens the database, runs migrations, prepares the blob store, and seeds
/// the base folders. Shared between the server binary and the integration
/// test harness.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let db_pool = connection::create_pool(&config.database).await?;
    migration::run_migrations(&db_pool).await?;

    let blob_store: Arc<dyn BlobStore> =
        Arc::new(LocalBlobStore::new(&config.storage.root_path).await?);

    let item_repo = Arc::new(ItemRepository::new(db_pool.clone()));
    bootstrap::ensure_base_folders(&item_repo).await?;

    let filesystem_service = Arc::new(FilesystemService::new(
        Arc::clone(&item_repo),
        Arc::clone(&blob_store),
    ));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        blob_store,
        item_repo,
        filesystem_service,
    })
}

/// Runs the Deskfolio server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Deskfolio server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

/// Build CORS layer from configuration
fn build_cors_layer(cors_config: &CorsConfig) -> CorsLayer {
    use http::Method;
    use tower_http::cors::Any;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors = cors
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    cors
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
