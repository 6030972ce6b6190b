//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use deskfolio_core::config::AppConfig;
use deskfolio_core::traits::blob::BlobStore;
use deskfolio_database::repositories::item::ItemRepository;
use deskfolio_service::FilesystemService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// SQLite connection pool.
    pub db_pool: SqlitePool,
    /// Physical byte storage.
    pub blob_store: Arc<dyn BlobStore>,
    /// Item repository.
    pub item_repo: Arc<ItemRepository>,
    /// Filesystem service.
    pub filesystem_service: Arc<FilesystemService>,
}
