//! Item source abstraction and the filesystem-service adapter.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use deskfolio_core::result::AppResult;
use deskfolio_core::types::{SortDirection, SortKey};
use deskfolio_entity::item::model::{FilesystemItem, ItemType};
use deskfolio_service::FilesystemService;

/// An item as the navigator sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinderItem {
    /// Item identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Item type.
    pub item_type: ItemType,
    /// Absolute path.
    pub path: String,
    /// Byte count; None for folders and synthetic files.
    pub size: Option<i64>,
    /// Lowercase extension without the dot.
    pub extension: Option<String>,
    /// Last modification timestamp.
    pub date_modified: DateTime<Utc>,
}

impl FinderItem {
    /// Whether this item can be navigated into.
    pub fn is_folder(&self) -> bool {
        self.item_type == ItemType::Folder
    }
}

impl From<FilesystemItem> for FinderItem {
    fn from(item: FilesystemItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            item_type: item.item_type,
            path: item.path,
            size: item.size,
            extension: item.extension,
            date_modified: item.date_modified,
        }
    }
}

/// The contents of one folder, as delivered to the navigator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinderListing {
    /// The normalized folder path.
    pub path: String,
    /// Direct children, sorted by the requested key.
    pub items: Vec<FinderItem>,
}

/// Where the navigator gets folder contents from.
///
/// The Finder is written against this trait so tests can substitute a
/// controllable source and front ends can swap in an HTTP client.
#[async_trait]
pub trait ItemSource: Send + Sync + 'static {
    /// Fetch the direct children of a folder.
    async fn fetch(
        &self,
        path: &str,
        sort_by: SortKey,
        sort_order: SortDirection,
    ) -> AppResult<FinderListing>;
}

/// Adapter that serves the navigator directly from the filesystem service.
#[derive(Debug, Clone)]
pub struct ServiceAdapter {
    service: Arc<FilesystemService>,
}

impl ServiceAdapter {
    /// Create a new adapter over the filesystem service.
    pub fn new(service: Arc<FilesystemService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ItemSource for ServiceAdapter {
    async fn fetch(
        &self,
        path: &str,
        sort_by: SortKey,
        sort_order: SortDirection,
    ) -> AppResult<FinderListing> {
        let listing = self.service.get_items(path, sort_by, sort_order).await?;
        Ok(FinderListing {
            path: listing.path,
            items: listing.items.into_iter().map(FinderItem::from).collect(),
        })
    }
}
