//! Filesystem operations over path-indexed item records.
//!
//! All path inputs are validated and normalized before any repository
//! access, and every mutation consults [`MutationPolicy`] so the
//! protected-folder and folder-immutability rules live in one place.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use deskfolio_core::error::AppError;
use deskfolio_core::path;
use deskfolio_core::result::AppResult;
use deskfolio_core::traits::blob::BlobStore;
use deskfolio_core::types::{SortDirection, SortKey};
use deskfolio_database::repositories::item::ItemRepository;
use deskfolio_entity::item::model::{CreateItem, FilesystemItem, ItemType};
use deskfolio_entity::item::policy::MutationPolicy;

/// One level of the tree, as returned by the listing operation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FolderListing {
    /// Direct children of the requested path, service-sorted.
    pub items: Vec<FilesystemItem>,
    /// Number of direct children.
    pub total_count: u64,
    /// The normalized requested path.
    pub path: String,
    /// The folder record itself; `None` at root.
    pub parent: Option<FilesystemItem>,
}

/// Partial update applied to an item.
///
/// `owner_id` is doubly optional: the outer `None` means "leave the owner
/// alone", `Some(None)` clears it (public item).
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateFileRequest {
    /// New display name.
    pub name: Option<String>,
    /// New parent folder path (root is `/`).
    pub parent_path: Option<String>,
    /// New owner assignment.
    pub owner_id: Option<Option<Uuid>>,
}

/// Orchestrates listing and mutation of the virtual filesystem.
#[derive(Clone)]
pub struct FilesystemService {
    /// Item repository.
    items: Arc<ItemRepository>,
    /// Physical byte storage for real files.
    blobs: Arc<dyn BlobStore>,
}

impl std::fmt::Debug for FilesystemService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilesystemService").finish()
    }
}

impl FilesystemService {
    /// Creates a new filesystem service.
    pub fn new(items: Arc<ItemRepository>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { items, blobs }
    }

    /// List the direct children of a folder.
    ///
    /// The path must normalize to root or to an existing folder record.
    /// Items come back sorted purely by the requested key; folder-first
    /// grouping is a presentation concern of the navigator.
    pub async fn get_items(
        &self,
        raw_path: &str,
        sort_by: SortKey,
        sort_order: SortDirection,
    ) -> AppResult<FolderListing> {
        let target = validate_path(raw_path)?;
        let parent = self.resolve_folder(&target).await?;

        let parent_key = (target != path::ROOT).then_some(target.as_str());
        let items = self
            .items
            .list_children(parent_key, sort_by, sort_order)
            .await?;
        let total_count = self.items.count_children(parent_key).await?;

        Ok(FolderListing {
            items,
            total_count,
            path: target,
            parent,
        })
    }

    /// Upload a real file: bytes first, then the record.
    ///
    /// The write-then-insert ordering bounds the failure mode to orphan
    /// bytes; a record referencing missing bytes can never be created.
    pub async fn upload_file(
        &self,
        raw_path: &str,
        file_name: &str,
        data: Bytes,
        owner_id: Option<Uuid>,
    ) -> AppResult<FilesystemItem> {
        let target = validate_path(raw_path)?;
        self.resolve_folder(&target).await?;
        let (item_path, name) = self.prepare_create(&target, file_name).await?;

        let id = Uuid::new_v4();
        let extension = path::get_extension(&name);
        let item_type = ItemType::from_extension(extension.as_deref());
        let size = data.len() as i64;

        self.blobs.write(&id.to_string(), data).await?;

        let record = CreateItem {
            id,
            name,
            item_type,
            path: item_path,
            parent_path: parent_key(&target),
            size: Some(size),
            extension,
            is_real: true,
            owner_id,
        };

        let item = match self.items.insert(&record).await {
            Ok(item) => item,
            Err(e) => {
                // The blob is unreferenced; external GC can reclaim it.
                warn!(blob_key = %id, path = %record.path, "Orphan blob left after failed insert");
                return Err(e);
            }
        };

        info!(item_id = %item.id, path = %item.path, size, "File uploaded");
        Ok(item)
    }

    /// Create a synthetic (database-only) record without touching the
    /// blob store. With `item_type = FOLDER` this is how folders are made.
    pub async fn create_synthetic_file(
        &self,
        raw_path: &str,
        file_name: &str,
        item_type: ItemType,
        owner_id: Option<Uuid>,
    ) -> AppResult<FilesystemItem> {
        let target = validate_path(raw_path)?;
        self.resolve_folder(&target).await?;
        let (item_path, name) = self.prepare_create(&target, file_name).await?;

        let extension = match item_type {
            ItemType::Folder => None,
            _ => path::get_extension(&name),
        };

        let record = CreateItem {
            id: Uuid::new_v4(),
            name,
            item_type,
            path: item_path,
            parent_path: parent_key(&target),
            size: None,
            extension,
            is_real: false,
            owner_id,
        };

        let item = self.items.insert(&record).await?;
        info!(item_id = %item.id, path = %item.path, ?item_type, "Synthetic item created");
        Ok(item)
    }

    /// Apply a rename, move, and/or owner reassignment to an item.
    pub async fn update_file(
        &self,
        id: Uuid,
        req: UpdateFileRequest,
    ) -> AppResult<FilesystemItem> {
        let mut item = self
            .items
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::file_not_found(format!("Item {id} not found")))?;

        let policy = MutationPolicy::for_item(&item);
        let protected = item.is_protected();
        let old_path = item.path.clone();

        if let Some(raw_parent) = &req.parent_path {
            let destination = validate_path(raw_parent)?;
            if Some(destination.as_str()) != item.parent_path.as_deref()
                && !(destination == path::ROOT && item.parent_path.is_none())
            {
                if protected {
                    return Err(AppError::protected(format!(
                        "'{}' is a protected folder and cannot be moved",
                        item.name
                    )));
                }
                if !policy.relocate {
                    return Err(AppError::invalid_move(
                        "Folders cannot be moved to a different parent",
                    ));
                }
                if destination == item.path
                    || destination.starts_with(&format!("{}/", item.path))
                {
                    return Err(AppError::invalid_move(
                        "Cannot move an item into its own subtree",
                    ));
                }
                self.resolve_folder(&destination).await?;

                item.parent_path = parent_key(&destination);
                item.path = path::join_path([destination.as_str(), item.name.as_str()]);
            }
        }

        if let Some(raw_name) = &req.name {
            let supplied = raw_name.trim();
            if supplied.is_empty() {
                return Err(AppError::validation("Item name cannot be empty"));
            }
            if supplied.contains('/') {
                return Err(AppError::validation("Item name cannot contain '/'"));
            }
            if supplied != item.name {
                if protected {
                    return Err(AppError::protected(format!(
                        "'{}' is a protected folder and cannot be renamed",
                        item.name
                    )));
                }
                let new_name = preserve_extension(&item, supplied);
                let base = item.parent_path.clone().unwrap_or_else(|| path::ROOT.into());
                let new_path = path::join_path([base.as_str(), new_name.as_str()]);
                if !path::is_valid_path(&new_path) {
                    return Err(AppError::invalid_path(format!(
                        "Resulting path '{new_path}' is not valid"
                    )));
                }
                item.name = new_name;
                item.path = new_path;
            }
        }

        if let Some(new_owner) = req.owner_id {
            if new_owner != item.owner_id {
                if protected {
                    return Err(AppError::protected(format!(
                        "'{}' is a protected folder and cannot be reassigned",
                        item.name
                    )));
                }
                if !policy.reassign {
                    return Err(AppError::validation("Folders cannot be reassigned"));
                }
                item.owner_id = new_owner;
            }
        }

        if item.path != old_path {
            if let Some(existing) = self.items.find_by_path(&item.path).await? {
                if existing.id != item.id {
                    return Err(AppError::already_exists(format!(
                        "An item at path '{}' already exists",
                        item.path
                    )));
                }
            }
        }

        item.date_modified = Utc::now();

        // A folder's path is the key prefix of its whole subtree, so the
        // record update and the descendant rewrite must land atomically.
        let updated = if item.is_folder() && item.path != old_path {
            let (updated, rewritten) = self.items.update_with_subtree(&item, &old_path).await?;
            info!(
                item_id = %updated.id,
                old_path = %old_path,
                new_path = %updated.path,
                rewritten,
                "Folder subtree paths rewritten"
            );
            updated
        } else {
            self.items.update(&item).await?
        };

        info!(item_id = %updated.id, path = %updated.path, "Item updated");
        Ok(updated)
    }

    /// Delete an item; folders cascade to their whole subtree.
    ///
    /// Record deletion is transactional; physical bytes of real files are
    /// removed afterwards, best effort, since unreferenced blobs are
    /// recoverable garbage.
    pub async fn delete_file(&self, id: Uuid) -> AppResult<()> {
        let item = self
            .items
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::file_not_found(format!("Item {id} not found")))?;

        if item.is_protected() {
            return Err(AppError::protected(format!(
                "'{}' is a protected folder and cannot be deleted",
                item.name
            )));
        }

        if item.is_folder() {
            let subtree = self.items.list_subtree(&item.path).await?;
            let deleted = self.items.delete_subtree(&item.path).await?;

            for record in subtree.iter().filter(|r| r.is_real) {
                if let Err(e) = self.blobs.delete(&record.id.to_string()).await {
                    warn!(blob_key = %record.id, error = %e, "Failed to delete blob for removed item");
                }
            }

            info!(item_id = %item.id, path = %item.path, deleted, "Folder deleted with cascade");
        } else {
            self.items.delete_by_path(&item.path).await?;
            if item.is_real {
                if let Err(e) = self.blobs.delete(&item.id.to_string()).await {
                    warn!(blob_key = %item.id, error = %e, "Failed to delete blob for removed item");
                }
            }
            info!(item_id = %item.id, path = %item.path, "File deleted");
        }

        Ok(())
    }

    /// Resolve a normalized path to its folder record.
    ///
    /// Root resolves to `None`; any other path must name an existing
    /// FOLDER item.
    async fn resolve_folder(&self, target: &str) -> AppResult<Option<FilesystemItem>> {
        if target == path::ROOT {
            return Ok(None);
        }
        let record = self
            .items
            .find_by_path(target)
            .await?
            .ok_or_else(|| {
                AppError::directory_not_found(format!("No folder exists at '{target}'"))
            })?;
        if !record.is_folder() {
            return Err(AppError::directory_not_found(format!(
                "'{target}' is not a folder"
            )));
        }
        Ok(Some(record))
    }

    /// Validate a new item name against its target folder and compute the
    /// item path, failing on collision.
    async fn prepare_create(
        &self,
        target: &str,
        file_name: &str,
    ) -> AppResult<(String, String)> {
        let name = file_name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Item name cannot be empty"));
        }
        if name.contains('/') {
            return Err(AppError::validation("Item name cannot contain '/'"));
        }

        let item_path = path::join_path([target, name]);
        if !path::is_valid_path(&item_path) {
            return Err(AppError::invalid_path(format!(
                "Resulting path '{item_path}' is not valid"
            )));
        }
        if self.items.find_by_path(&item_path).await?.is_some() {
            return Err(AppError::already_exists(format!(
                "An item at path '{item_path}' already exists"
            )));
        }
        Ok((item_path, name.to_string()))
    }
}

/// The `parent_path` column value for items created under `target`.
fn parent_key(target: &str) -> Option<String> {
    (target != path::ROOT).then(|| target.to_string())
}

/// Apply the extension-preservation rule to a supplied rename target.
///
/// Extensions are not user-editable: the supplied name contributes only
/// its stem, and the item's original extension (or lack of one) is kept.
/// Folders use the supplied name verbatim.
fn preserve_extension(item: &FilesystemItem, supplied: &str) -> String {
    if item.is_folder() {
        return supplied.to_string();
    }
    let stem = match supplied.rfind('.') {
        Some(i) if i > 0 => &supplied[..i],
        _ => supplied,
    };
    match &item.extension {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem.to_string(),
    }
}

/// Gate a raw path: must be safe, returns the normalized form.
fn validate_path(raw: &str) -> AppResult<String> {
    if !path::is_valid_path(raw) {
        return Err(AppError::invalid_path(format!("Path '{raw}' is not valid")));
    }
    Ok(path::normalize_path(raw))
}

#[cfg(test)]
mod tests {
    use deskfolio_core::config::DatabaseConfig;
    use deskfolio_core::error::ErrorKind;
    use deskfolio_database::{connection, migration};
    use deskfolio_storage::providers::memory::MemoryBlobStore;

    use super::*;
    use crate::filesystem::bootstrap;

    async fn test_service() -> (FilesystemService, Arc<MemoryBlobStore>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}/test.db", dir.path().display()),
            ..DatabaseConfig::default()
        };
        let pool = connection::create_pool(&config).await.unwrap();
        migration::run_migrations(&pool).await.unwrap();

        let repo = Arc::new(ItemRepository::new(pool));
        bootstrap::ensure_base_folders(&repo).await.unwrap();

        let blobs = Arc::new(MemoryBlobStore::new());
        let service = FilesystemService::new(repo, blobs.clone() as Arc<dyn BlobStore>);
        (service, blobs, dir)
    }

    async fn upload(service: &FilesystemService, parent: &str, name: &str) -> FilesystemItem {
        service
            .upload_file(parent, name, Bytes::from_static(b"payload"), None)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn listing_root_returns_base_folders() {
        let (service, _, _dir) = test_service().await;

        let listing = service
            .get_items("/", SortKey::Name, SortDirection::Asc)
            .await
            .unwrap();
        assert_eq!(listing.total_count, 6);
        assert_eq!(listing.path, "/");
        assert!(listing.parent.is_none());
        assert_eq!(listing.items[0].name, "Desktop");
    }

    #[tokio::test]
    async fn listing_normalizes_sloppy_paths() {
        let (service, _, _dir) = test_service().await;

        let listing = service
            .get_items("//Documents/", SortKey::Name, SortDirection::Asc)
            .await
            .unwrap();
        assert_eq!(listing.path, "/Documents");
        assert_eq!(listing.parent.unwrap().name, "Documents");
        assert_eq!(listing.total_count, 0);
    }

    #[tokio::test]
    async fn listing_missing_folder_is_directory_not_found() {
        let (service, _, _dir) = test_service().await;

        let err = service
            .get_items("/Nowhere", SortKey::Name, SortDirection::Asc)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::DirectoryNotFound);
    }

    #[tokio::test]
    async fn listing_a_file_path_is_directory_not_found() {
        let (service, _, _dir) = test_service().await;

        upload(&service, "/Documents", "notes.txt").await;
        let err = service
            .get_items("/Documents/notes.txt", SortKey::Name, SortDirection::Asc)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::DirectoryNotFound);
    }

    #[tokio::test]
    async fn listing_rejects_traversal_paths() {
        let (service, _, _dir) = test_service().await;

        let err = service
            .get_items("/Documents/../etc", SortKey::Name, SortDirection::Asc)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidPath);
    }

    #[tokio::test]
    async fn upload_stores_bytes_and_record() {
        let (service, blobs, _dir) = test_service().await;

        let item = upload(&service, "/Documents", "report.pdf").await;
        assert_eq!(item.path, "/Documents/report.pdf");
        assert_eq!(item.item_type, ItemType::Document);
        assert_eq!(item.extension.as_deref(), Some("pdf"));
        assert_eq!(item.size, Some(7));
        assert!(item.is_real);

        let bytes = blobs.read_bytes(&item.id.to_string()).await.unwrap();
        assert_eq!(&bytes[..], b"payload");
    }

    #[tokio::test]
    async fn upload_collision_leaves_blob_store_untouched() {
        let (service, blobs, _dir) = test_service().await;

        upload(&service, "/Documents", "report.pdf").await;
        let writes_before = blobs.write_count();

        let err = service
            .upload_file(
                "/Documents",
                "report.pdf",
                Bytes::from_static(b"again"),
                None,
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::FileAlreadyExists);
        assert_eq!(blobs.write_count(), writes_before);
    }

    #[tokio::test]
    async fn upload_into_missing_folder_fails_before_bytes() {
        let (service, blobs, _dir) = test_service().await;

        let err = service
            .upload_file("/Nope", "a.txt", Bytes::from_static(b"x"), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::DirectoryNotFound);
        assert!(blobs.is_empty());
    }

    #[tokio::test]
    async fn upload_rejects_bad_names() {
        let (service, _, _dir) = test_service().await;

        for bad in ["", "   ", "a/b.txt"] {
            let err = service
                .upload_file("/Documents", bad, Bytes::from_static(b"x"), None)
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "name {bad:?}");
        }

        let err = service
            .upload_file("/Documents", "a?b.txt", Bytes::from_static(b"x"), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidPath);
    }

    #[tokio::test]
    async fn synthetic_creation_skips_the_blob_store() {
        let (service, blobs, _dir) = test_service().await;

        let item = service
            .create_synthetic_file("/Documents", "demo.png", ItemType::Image, None)
            .await
            .unwrap();
        assert!(!item.is_real);
        assert!(item.size.is_none());
        assert_eq!(item.extension.as_deref(), Some("png"));
        assert!(blobs.is_empty());
        assert_eq!(blobs.write_count(), 0);
    }

    #[tokio::test]
    async fn folders_are_created_as_synthetic_items() {
        let (service, _, _dir) = test_service().await;

        let folder = service
            .create_synthetic_file("/Documents", "Projects", ItemType::Folder, None)
            .await
            .unwrap();
        assert!(folder.is_folder());
        assert!(folder.extension.is_none());

        let listing = service
            .get_items("/Documents/Projects", SortKey::Name, SortDirection::Asc)
            .await
            .unwrap();
        assert_eq!(listing.total_count, 0);
    }

    #[tokio::test]
    async fn rename_keeps_the_original_extension() {
        let (service, _, _dir) = test_service().await;

        let item = upload(&service, "/Documents", "draft.txt").await;
        let renamed = service
            .update_file(
                item.id,
                UpdateFileRequest {
                    name: Some("final.pdf".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "final.txt");
        assert_eq!(renamed.path, "/Documents/final.txt");
        assert_eq!(renamed.extension.as_deref(), Some("txt"));
    }

    #[tokio::test]
    async fn rename_to_empty_is_rejected() {
        let (service, _, _dir) = test_service().await;

        let item = upload(&service, "/Documents", "draft.txt").await;
        let err = service
            .update_file(
                item.id,
                UpdateFileRequest {
                    name: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn rename_collision_is_a_conflict() {
        let (service, _, _dir) = test_service().await;

        upload(&service, "/Documents", "a.txt").await;
        let b = upload(&service, "/Documents", "b.txt").await;

        let err = service
            .update_file(
                b.id,
                UpdateFileRequest {
                    name: Some("a".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::FileAlreadyExists);
    }

    #[tokio::test]
    async fn folder_rename_moves_its_subtree() {
        let (service, blobs, _dir) = test_service().await;

        service
            .create_synthetic_file("/Documents", "Old", ItemType::Folder, None)
            .await
            .unwrap();
        let folder = service
            .create_synthetic_file("/Documents/Old", "Nested", ItemType::Folder, None)
            .await
            .unwrap();
        let file = upload(&service, "/Documents/Old/Nested", "a.txt").await;

        let old = service
            .get_items("/Documents", SortKey::Name, SortDirection::Asc)
            .await
            .unwrap()
            .items
            .into_iter()
            .find(|i| i.name == "Old")
            .unwrap();

        let writes_before = blobs.write_count();
        let renamed = service
            .update_file(
                old.id,
                UpdateFileRequest {
                    name: Some("New".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.path, "/Documents/New");

        let listing = service
            .get_items("/Documents/New/Nested", SortKey::Name, SortDirection::Asc)
            .await
            .unwrap();
        assert_eq!(listing.items[0].path, "/Documents/New/Nested/a.txt");
        assert_eq!(listing.items[0].id, file.id);
        assert_eq!(listing.parent.unwrap().id, folder.id);

        // Renames never touch bytes; blobs are keyed by item id.
        assert_eq!(blobs.write_count(), writes_before);
    }

    #[tokio::test]
    async fn file_move_updates_path_without_copying_bytes() {
        let (service, blobs, _dir) = test_service().await;

        let item = upload(&service, "/Documents", "a.txt").await;
        let writes_before = blobs.write_count();

        let moved = service
            .update_file(
                item.id,
                UpdateFileRequest {
                    parent_path: Some("/Desktop".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.path, "/Desktop/a.txt");
        assert_eq!(moved.parent_path.as_deref(), Some("/Desktop"));
        assert_eq!(blobs.write_count(), writes_before);
        assert!(blobs.exists(&item.id.to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn folder_move_is_an_invalid_move() {
        let (service, _, _dir) = test_service().await;

        let folder = service
            .create_synthetic_file("/Documents", "Projects", ItemType::Folder, None)
            .await
            .unwrap();
        let err = service
            .update_file(
                folder.id,
                UpdateFileRequest {
                    parent_path: Some("/Desktop".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidMove);
    }

    #[tokio::test]
    async fn move_into_missing_destination_fails() {
        let (service, _, _dir) = test_service().await;

        let item = upload(&service, "/Documents", "a.txt").await;
        let err = service
            .update_file(
                item.id,
                UpdateFileRequest {
                    parent_path: Some("/Nowhere".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::DirectoryNotFound);
    }

    #[tokio::test]
    async fn protected_folders_refuse_every_mutation() {
        let (service, _, _dir) = test_service().await;

        let docs = service
            .get_items("/", SortKey::Name, SortDirection::Asc)
            .await
            .unwrap()
            .items
            .into_iter()
            .find(|i| i.name == "Documents")
            .unwrap();

        let rename = service
            .update_file(
                docs.id,
                UpdateFileRequest {
                    name: Some("Stuff".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(rename.kind, ErrorKind::ProtectedResource);

        let reassign = service
            .update_file(
                docs.id,
                UpdateFileRequest {
                    owner_id: Some(Some(Uuid::new_v4())),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(reassign.kind, ErrorKind::ProtectedResource);

        let delete = service.delete_file(docs.id).await.unwrap_err();
        assert_eq!(delete.kind, ErrorKind::ProtectedResource);
    }

    #[tokio::test]
    async fn owner_reassignment_round_trips() {
        let (service, _, _dir) = test_service().await;

        let owner = Uuid::new_v4();
        let item = upload(&service, "/Documents", "a.txt").await;

        let assigned = service
            .update_file(
                item.id,
                UpdateFileRequest {
                    owner_id: Some(Some(owner)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(assigned.owner_id, Some(owner));

        let cleared = service
            .update_file(
                item.id,
                UpdateFileRequest {
                    owner_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(cleared.owner_id.is_none());
    }

    #[tokio::test]
    async fn delete_file_removes_record_and_bytes() {
        let (service, blobs, _dir) = test_service().await;

        let item = upload(&service, "/Documents", "a.txt").await;
        service.delete_file(item.id).await.unwrap();

        assert!(blobs.is_empty());
        let err = service.delete_file(item.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::FileNotFound);
    }

    #[tokio::test]
    async fn delete_synthetic_file_never_touches_bytes() {
        let (service, blobs, _dir) = test_service().await;

        let item = service
            .create_synthetic_file("/Documents", "demo.mp4", ItemType::Video, None)
            .await
            .unwrap();
        service.delete_file(item.id).await.unwrap();
        assert_eq!(blobs.delete_count(), 0);
    }

    #[tokio::test]
    async fn folder_delete_cascades_records_and_real_blobs() {
        let (service, blobs, _dir) = test_service().await;

        let folder = service
            .create_synthetic_file("/Documents", "Projects", ItemType::Folder, None)
            .await
            .unwrap();
        service
            .create_synthetic_file("/Documents/Projects", "Sub", ItemType::Folder, None)
            .await
            .unwrap();
        upload(&service, "/Documents/Projects", "a.txt").await;
        upload(&service, "/Documents/Projects/Sub", "b.txt").await;
        service
            .create_synthetic_file("/Documents/Projects", "fake.png", ItemType::Image, None)
            .await
            .unwrap();
        let keep = upload(&service, "/Documents", "keep.txt").await;

        service.delete_file(folder.id).await.unwrap();

        let listing = service
            .get_items("/Documents", SortKey::Name, SortDirection::Asc)
            .await
            .unwrap();
        assert_eq!(listing.total_count, 1);
        assert_eq!(listing.items[0].id, keep.id);

        // Only the two real descendants had bytes to delete.
        assert_eq!(blobs.delete_count(), 2);
        assert_eq!(blobs.len(), 1);
    }
}
