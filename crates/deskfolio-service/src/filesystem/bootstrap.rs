//! Startup seeding of the protected root folders.

use tracing::info;
use uuid::Uuid;

use deskfolio_core::result::AppResult;
use deskfolio_database::repositories::item::ItemRepository;
use deskfolio_entity::item::model::{CreateItem, ItemType};
use deskfolio_entity::item::policy::PROTECTED_FOLDERS;

/// Ensure every protected root folder exists, creating missing ones.
///
/// Idempotent: folders already present are left untouched, so repeated
/// startups never duplicate or reset anything. Returns how many folders
/// were created.
pub async fn ensure_base_folders(items: &ItemRepository) -> AppResult<u64> {
    let mut created = 0;

    for name in PROTECTED_FOLDERS {
        let folder_path = format!("/{name}");
        if items.find_by_path(&folder_path).await?.is_some() {
            continue;
        }

        items
            .insert(&CreateItem {
                id: Uuid::new_v4(),
                name: name.to_string(),
                item_type: ItemType::Folder,
                path: folder_path,
                parent_path: None,
                size: None,
                extension: None,
                is_real: false,
                owner_id: None,
            })
            .await?;
        created += 1;
    }

    if created > 0 {
        info!(created, "Seeded missing base folders");
    }
    Ok(created)
}
