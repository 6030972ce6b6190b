//! Filesystem item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The type of a filesystem item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, PartialOrd, Ord,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum ItemType {
    /// A folder that may contain other items.
    Folder,
    /// A raster or vector image.
    Image,
    /// A video file.
    Video,
    /// An audio file.
    Audio,
    /// An office or PDF document.
    Document,
    /// A compressed archive.
    Archive,
    /// Source code.
    Code,
    /// Plain text.
    Text,
    /// Anything unrecognized.
    Other,
}

impl ItemType {
    /// Classify a file by its lowercase extension.
    ///
    /// Used when uploading, where the caller supplies bytes and a name but
    /// no explicit type. Unknown or missing extensions map to [`Self::Other`].
    pub fn from_extension(ext: Option<&str>) -> Self {
        let Some(ext) = ext else {
            return Self::Other;
        };
        match ext {
            "jpg" | "jpeg" | "png" | "gif" | "svg" | "webp" | "bmp" | "ico" | "heic" => {
                Self::Image
            }
            "mp4" | "mov" | "avi" | "mkv" | "webm" => Self::Video,
            "mp3" | "wav" | "ogg" | "flac" | "m4a" => Self::Audio,
            "pdf" | "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" | "odt" => Self::Document,
            "zip" | "tar" | "gz" | "rar" | "7z" | "bz2" => Self::Archive,
            "rs" | "js" | "ts" | "jsx" | "tsx" | "py" | "rb" | "go" | "java" | "c" | "cpp"
            | "h" | "html" | "css" | "json" | "toml" | "yaml" | "yml" | "sh" => Self::Code,
            "txt" | "md" | "log" | "csv" | "rtf" => Self::Text,
            _ => Self::Other,
        }
    }
}

/// A single record in the virtual filesystem tree.
///
/// Items are flat, path-indexed rows: `path` is the unique key and
/// `parent_path` links a record to its containing folder (`None` only for
/// items directly under root).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FilesystemItem {
    /// Unique item identifier, assigned at creation, immutable.
    pub id: Uuid,
    /// Display name, including extension for non-folder items.
    pub name: String,
    /// Item type.
    pub item_type: ItemType,
    /// Absolute normalized path; the unique key.
    pub path: String,
    /// Normalized path of the containing folder (None directly under root).
    pub parent_path: Option<String>,
    /// Byte count; None for folders.
    pub size: Option<i64>,
    /// Lowercase extension without the dot; None if absent.
    pub extension: Option<String>,
    /// Whether physical bytes exist in the blob store.
    pub is_real: bool,
    /// Owning user; None means publicly visible.
    pub owner_id: Option<Uuid>,
    /// When the item was created.
    pub date_created: DateTime<Utc>,
    /// When the item was last mutated.
    pub date_modified: DateTime<Utc>,
}

impl FilesystemItem {
    /// Check if this item is a folder.
    pub fn is_folder(&self) -> bool {
        self.item_type == ItemType::Folder
    }

    /// Check if this item is one of the protected root folders.
    pub fn is_protected(&self) -> bool {
        super::policy::is_protected(self)
    }
}

/// Data required to create a new item record.
///
/// The id is assigned by the caller (upload writes bytes under the id
/// before the record exists); timestamps are assigned at insert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItem {
    /// Unique item identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Item type.
    pub item_type: ItemType,
    /// Absolute normalized path.
    pub path: String,
    /// Parent folder path (None directly under root).
    pub parent_path: Option<String>,
    /// Byte count; None for folders and synthetic files.
    pub size: Option<i64>,
    /// Lowercase extension without the dot.
    pub extension: Option<String>,
    /// Whether physical bytes back this record.
    pub is_real: bool,
    /// Owning user.
    pub owner_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_classification() {
        assert_eq!(ItemType::from_extension(Some("png")), ItemType::Image);
        assert_eq!(ItemType::from_extension(Some("mp4")), ItemType::Video);
        assert_eq!(ItemType::from_extension(Some("pdf")), ItemType::Document);
        assert_eq!(ItemType::from_extension(Some("rs")), ItemType::Code);
        assert_eq!(ItemType::from_extension(Some("weird")), ItemType::Other);
        assert_eq!(ItemType::from_extension(None), ItemType::Other);
    }

    #[test]
    fn type_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&ItemType::Folder).unwrap(),
            "\"FOLDER\""
        );
        assert_eq!(
            serde_json::to_string(&ItemType::Document).unwrap(),
            "\"DOCUMENT\""
        );
    }
}
