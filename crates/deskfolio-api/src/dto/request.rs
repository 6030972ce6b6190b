//! Request DTOs.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use deskfolio_core::types::{SortDirection, SortKey};
use deskfolio_entity::item::model::ItemType;

/// Query parameters for listing a folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Sort key (defaults to name).
    #[serde(default)]
    pub sort_by: SortKey,
    /// Sort direction (defaults to ascending).
    #[serde(default)]
    pub sort_order: SortDirection,
}

/// Body for creating a synthetic item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSyntheticRequest {
    /// Destination folder path.
    pub parent_path: String,
    /// Item name.
    pub name: String,
    /// Item type (FOLDER creates a folder).
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Owning user, if any.
    #[serde(default)]
    pub owner_id: Option<Uuid>,
}

/// Body for updating an item.
///
/// `ownerId` distinguishes absent from null: absent leaves the owner
/// untouched, an explicit null clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New parent folder path.
    #[serde(default)]
    pub parent_path: Option<String>,
    /// New owner assignment.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub owner_id: Option<Option<Uuid>>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<Uuid>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Uuid>::deserialize(deserializer).map(Some)
}
