//! Consolidated mutation policy for filesystem items.
//!
//! Every mutation path in the service consults this one table instead of
//! re-deriving protected-folder and folder-immutability rules inline. The
//! real-vs-synthetic duality does not change *permissions*, only byte
//! handling, which the service reads off `item.is_real` directly.

use super::model::{FilesystemItem, ItemType};

/// Names of the root-level folders that can never be deleted, renamed,
/// reassigned, or moved.
pub const PROTECTED_FOLDERS: [&str; 6] = [
    "Documents",
    "Desktop",
    "Downloads",
    "Pictures",
    "Music",
    "Movies",
];

/// Check whether an item is one of the protected root folders.
pub fn is_protected(item: &FilesystemItem) -> bool {
    item.item_type == ItemType::Folder
        && item.parent_path.is_none()
        && PROTECTED_FOLDERS.contains(&item.name.as_str())
}

/// What mutations an item admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationPolicy {
    /// The item may be renamed.
    pub rename: bool,
    /// The item may be moved to a different parent folder.
    pub relocate: bool,
    /// The item's owner may be changed.
    pub reassign: bool,
    /// The item may be deleted.
    pub delete: bool,
}

impl MutationPolicy {
    /// Nothing is allowed.
    const FROZEN: Self = Self {
        rename: false,
        relocate: false,
        reassign: false,
        delete: false,
    };

    /// Folders keep their place in the tree: renameable and deletable, but
    /// immovable and unassignable so subtree integrity cannot be broken.
    const FOLDER: Self = Self {
        rename: true,
        relocate: false,
        reassign: false,
        delete: true,
    };

    /// Files admit every mutation.
    const FILE: Self = Self {
        rename: true,
        relocate: true,
        reassign: true,
        delete: true,
    };

    /// Resolve the policy for an item.
    pub fn for_item(item: &FilesystemItem) -> Self {
        if is_protected(item) {
            Self::FROZEN
        } else if item.item_type == ItemType::Folder {
            Self::FOLDER
        } else {
            Self::FILE
        }
    }
}
