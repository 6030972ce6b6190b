//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use deskfolio_entity::item::model::{FilesystemItem, ItemType};
use deskfolio_service::FolderListing;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A filesystem item on the wire, camelCase with RFC 3339 timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    /// Item identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Item type.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Absolute path.
    pub path: String,
    /// Containing folder path; null directly under root.
    pub parent_path: Option<String>,
    /// Byte count; null for folders and synthetic files.
    pub size: Option<i64>,
    /// Lowercase extension without the dot.
    pub extension: Option<String>,
    /// Whether physical bytes back this item.
    pub is_real: bool,
    /// Owning user; null means public.
    pub owner_id: Option<Uuid>,
    /// Creation timestamp.
    pub date_created: DateTime<Utc>,
    /// Last modification timestamp.
    pub date_modified: DateTime<Utc>,
}

impl From<FilesystemItem> for ItemDto {
    fn from(item: FilesystemItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            item_type: item.item_type,
            path: item.path,
            parent_path: item.parent_path,
            size: item.size,
            extension: item.extension,
            is_real: item.is_real,
            owner_id: item.owner_id,
            date_created: item.date_created,
            date_modified: item.date_modified,
        }
    }
}

/// One level of the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    /// Direct children, sorted.
    pub items: Vec<ItemDto>,
    /// Number of direct children.
    pub total_count: u64,
    /// The normalized requested path.
    pub path: String,
    /// The folder record itself; null at root.
    pub parent: Option<ItemDto>,
}

impl From<FolderListing> for ListingResponse {
    fn from(listing: FolderListing) -> Self {
        Self {
            items: listing.items.into_iter().map(ItemDto::from).collect(),
            total_count: listing.total_count,
            path: listing.path,
            parent: listing.parent.map(ItemDto::from),
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
    /// Blob store status.
    pub storage: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_dto_uses_camel_case_and_type_key() {
        let dto = ItemDto {
            id: Uuid::new_v4(),
            name: "a.txt".into(),
            item_type: ItemType::Text,
            path: "/Documents/a.txt".into(),
            parent_path: Some("/Documents".into()),
            size: Some(3),
            extension: Some("txt".into()),
            is_real: true,
            owner_id: None,
            date_created: Utc::now(),
            date_modified: Utc::now(),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["type"], "TEXT");
        assert_eq!(json["parentPath"], "/Documents");
        assert_eq!(json["isReal"], true);
        assert!(json["dateCreated"].is_string());
    }
}
