//! Item repository implementation.
//!
//! A thin persistence boundary over filesystem item records, keyed by the
//! unique normalized `path` and queryable by `parent_path`. Business
//! validation (protected folders, move legality, path safety) belongs to
//! the service layer, not here.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use deskfolio_core::error::{AppError, ErrorKind};
use deskfolio_core::result::AppResult;
use deskfolio_core::types::{SortDirection, SortKey};
use deskfolio_entity::item::model::{CreateItem, FilesystemItem};

const UPDATE_ITEM_SQL: &str = "UPDATE items SET name = ?2, path = ?3, parent_path = ?4, \
     extension = ?5, owner_id = ?6, date_modified = ?7 \
     WHERE id = ?1 RETURNING *";

/// Repository for filesystem item CRUD and subtree queries.
///
/// Subtree membership is expressed as `substr(path, 1, length(prefix) + 1)
/// = prefix || '/'` rather than LIKE, so paths containing SQL wildcard
/// characters need no escaping.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Create a new item repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find an item by its normalized path.
    pub async fn find_by_path(&self, path: &str) -> AppResult<Option<FilesystemItem>> {
        sqlx::query_as::<_, FilesystemItem>("SELECT * FROM items WHERE path = ?1")
            .bind(path)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find item by path", e)
            })
    }

    /// Find an item by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FilesystemItem>> {
        sqlx::query_as::<_, FilesystemItem>("SELECT * FROM items WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find item", e))
    }

    /// List direct children of a folder path (`None` lists the root level),
    /// sorted by the requested key and direction with a stable name
    /// tiebreak.
    pub async fn list_children(
        &self,
        parent_path: Option<&str>,
        sort_by: SortKey,
        sort_order: SortDirection,
    ) -> AppResult<Vec<FilesystemItem>> {
        // Sort fragments come from fixed enum mappings, never from input.
        let order = format!(
            "{} {}, name COLLATE NOCASE ASC",
            sort_by.as_sql(),
            sort_order.as_sql()
        );

        let sql = match parent_path {
            Some(_) => format!("SELECT * FROM items WHERE parent_path = ?1 ORDER BY {order}"),
            None => format!("SELECT * FROM items WHERE parent_path IS NULL ORDER BY {order}"),
        };

        let mut query = sqlx::query_as::<_, FilesystemItem>(&sql);
        if let Some(parent) = parent_path {
            query = query.bind(parent.to_string());
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    /// Count direct children of a folder path.
    pub async fn count_children(&self, parent_path: Option<&str>) -> AppResult<u64> {
        let count: i64 = match parent_path {
            Some(parent) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE parent_path = ?1")
                    .bind(parent)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE parent_path IS NULL")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count children", e))?;
        Ok(count as u64)
    }

    /// Insert a new item record, assigning its timestamps.
    pub async fn insert(&self, data: &CreateItem) -> AppResult<FilesystemItem> {
        let now = Utc::now();
        sqlx::query_as::<_, FilesystemItem>(
            "INSERT INTO items \
                (id, name, item_type, path, parent_path, size, extension, is_real, owner_id, \
                 date_created, date_modified) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11) RETURNING *",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(data.item_type)
        .bind(&data.path)
        .bind(&data.parent_path)
        .bind(data.size)
        .bind(&data.extension)
        .bind(data.is_real)
        .bind(data.owner_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::already_exists(format!("An item at path '{}' already exists", data.path))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to insert item", e),
        })
    }

    /// Update the mutable fields of an item record.
    ///
    /// The caller supplies the full record with `date_modified` already
    /// advanced; `id`, `item_type`, `size`, `is_real`, and `date_created`
    /// never change through this path.
    pub async fn update(&self, item: &FilesystemItem) -> AppResult<FilesystemItem> {
        sqlx::query_as::<_, FilesystemItem>(UPDATE_ITEM_SQL)
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.path)
        .bind(&item.parent_path)
        .bind(&item.extension)
        .bind(item.owner_id)
        .bind(item.date_modified)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::already_exists(format!("An item at path '{}' already exists", item.path))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update item", e),
        })?
        .ok_or_else(|| AppError::file_not_found(format!("Item {} not found", item.id)))
    }

    /// Update a folder record and rewrite the path prefix of every
    /// descendant in one transaction.
    ///
    /// `path` is the unique key, so when a folder's own path changes its
    /// whole subtree must follow; committing the two statements separately
    /// could leave descendants keyed under a prefix that no longer exists.
    /// All-or-nothing, like [`Self::delete_subtree`]. Returns the updated
    /// folder record and the number of rewritten descendant rows.
    pub async fn update_with_subtree(
        &self,
        item: &FilesystemItem,
        old_path: &str,
    ) -> AppResult<(FilesystemItem, u64)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let updated = sqlx::query_as::<_, FilesystemItem>(UPDATE_ITEM_SQL)
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.path)
            .bind(&item.parent_path)
            .bind(&item.extension)
            .bind(item.owner_id)
            .bind(item.date_modified)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::already_exists(format!(
                        "An item at path '{}' already exists",
                        item.path
                    ))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to update item", e),
            })?
            .ok_or_else(|| AppError::file_not_found(format!("Item {} not found", item.id)))?;

        let result = sqlx::query(
            "UPDATE items SET \
                 path = ?2 || substr(path, length(?1) + 1), \
                 parent_path = ?2 || substr(parent_path, length(?1) + 1), \
                 date_modified = ?3 \
             WHERE substr(path, 1, length(?1) + 1) = ?1 || '/'",
        )
        .bind(old_path)
        .bind(&updated.path)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::already_exists(format!(
                    "A descendant of '{}' collides with an existing item",
                    updated.path
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to rewrite subtree paths", e),
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit folder update", e)
        })?;

        Ok((updated, result.rows_affected()))
    }

    /// List an item and all its descendants, shallowest first.
    pub async fn list_subtree(&self, path: &str) -> AppResult<Vec<FilesystemItem>> {
        sqlx::query_as::<_, FilesystemItem>(
            "SELECT * FROM items \
             WHERE path = ?1 OR substr(path, 1, length(?1) + 1) = ?1 || '/' \
             ORDER BY path ASC",
        )
        .bind(path)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list subtree", e))
    }

    /// Delete a single item record by path.
    pub async fn delete_by_path(&self, path: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE path = ?1")
            .bind(path)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete item", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an item and every descendant record in one transaction.
    ///
    /// Returns the number of deleted rows. All-or-nothing: a failure rolls
    /// the whole cascade back.
    pub async fn delete_subtree(&self, path: &str) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let result = sqlx::query(
            "DELETE FROM items \
             WHERE path = ?1 OR substr(path, 1, length(?1) + 1) = ?1 || '/'",
        )
        .bind(path)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete subtree", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit subtree delete", e)
        })?;

        Ok(result.rows_affected())
    }
}
