//! Blob store trait for physical file bytes.
//!
//! The virtual tree lives entirely in the database; the blob store is a
//! flat namespace of byte payloads keyed by item id. Only "real" files
//! have a blob — synthetic records never touch this boundary.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for physical byte storage backends.
///
/// Implementations exist for the local filesystem and an in-memory store
/// used by tests and demo seeding. The trait is defined here in
/// `deskfolio-core` and implemented in `deskfolio-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write bytes under the given key, replacing any existing blob.
    async fn write(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Read a blob into memory as a complete byte vector.
    async fn read_bytes(&self, key: &str) -> AppResult<Bytes>;

    /// Delete the blob under the given key. Missing blobs are not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a blob exists under the given key.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}
