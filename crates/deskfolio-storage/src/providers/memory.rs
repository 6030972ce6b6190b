//! In-memory blob store for tests and demo seeding.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use deskfolio_core::error::AppError;
use deskfolio_core::result::AppResult;
use deskfolio_core::traits::blob::BlobStore;

/// Blob store that keeps everything in a process-local map.
///
/// Tests use the operation counters to assert that a code path did (or
/// did not) touch the byte store at all.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Bytes>>,
    writes: Mutex<u64>,
    deletes: Mutex<u64>,
}

impl MemoryBlobStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.lock().expect("blob map poisoned").len()
    }

    /// Whether the store holds no blobs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total write operations performed.
    pub fn write_count(&self) -> u64 {
        *self.writes.lock().expect("counter poisoned")
    }

    /// Total delete operations performed.
    pub fn delete_count(&self) -> u64 {
        *self.deletes.lock().expect("counter poisoned")
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn write(&self, key: &str, data: Bytes) -> AppResult<()> {
        *self.writes.lock().expect("counter poisoned") += 1;
        self.blobs
            .lock()
            .expect("blob map poisoned")
            .insert(key.to_string(), data);
        Ok(())
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        self.blobs
            .lock()
            .expect("blob map poisoned")
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::file_not_found(format!("Blob not found: {key}")))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        *self.deletes.lock().expect("counter poisoned") += 1;
        self.blobs.lock().expect("blob map poisoned").remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self
            .blobs
            .lock()
            .expect("blob map poisoned")
            .contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counters_track_operations() {
        let store = MemoryBlobStore::new();

        store.write("a", Bytes::from("x")).await.unwrap();
        store.write("b", Bytes::from("y")).await.unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.write_count(), 2);

        store.delete("a").await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.delete_count(), 1);
        assert!(!store.exists("a").await.unwrap());
        assert!(store.exists("b").await.unwrap());
    }
}
