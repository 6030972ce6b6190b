//! Filesystem listing and mutation handlers.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use bytes::Bytes;
use uuid::Uuid;

use deskfolio_core::error::AppError;
use deskfolio_service::UpdateFileRequest as SvcUpdateFile;

use crate::dto::request::{CreateSyntheticRequest, ListQuery, UpdateItemRequest};
use crate::dto::response::{ApiResponse, ItemDto, ListingResponse, MessageResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/filesystem
pub async fn list_root(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<ListingResponse>>, ApiError> {
    let listing = state
        .filesystem_service
        .get_items("/", query.sort_by, query.sort_order)
        .await?;
    Ok(Json(ApiResponse::ok(listing.into())))
}

/// GET /api/filesystem/{*path}
pub async fn list_path(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<ListingResponse>>, ApiError> {
    // The wildcard strips the leading slash; restore it before validation.
    let listing = state
        .filesystem_service
        .get_items(&format!("/{path}"), query.sort_by, query.sort_order)
        .await?;
    Ok(Json(ApiResponse::ok(listing.into())))
}

/// POST /api/filesystem/upload — multipart upload
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ItemDto>>, ApiError> {
    let mut parent_path: Option<String> = None;
    let mut custom_name: Option<String> = None;
    let mut owner_id: Option<Uuid> = None;
    let mut file_name: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "path" => {
                parent_path = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "customName" => {
                custom_name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "ownerId" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                owner_id = Some(
                    Uuid::parse_str(&text)
                        .map_err(|_| AppError::validation("Invalid ownerId"))?,
                );
            }
            "file" => {
                file_name = field.file_name().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let parent_path = parent_path.ok_or_else(|| AppError::validation("path is required"))?;
    let data = data.ok_or_else(|| AppError::validation("file data is required"))?;
    let file_name = custom_name
        .or(file_name)
        .ok_or_else(|| AppError::validation("file is required"))?;

    let max = state.config.storage.max_upload_size_bytes;
    if data.len() as u64 > max {
        return Err(
            AppError::validation(format!("File exceeds the maximum upload size of {max} bytes"))
                .into(),
        );
    }

    let item = state
        .filesystem_service
        .upload_file(&parent_path, &file_name, data, owner_id)
        .await?;
    Ok(Json(ApiResponse::ok(item.into())))
}

/// POST /api/filesystem
pub async fn create_synthetic(
    State(state): State<AppState>,
    Json(req): Json<CreateSyntheticRequest>,
) -> Result<Json<ApiResponse<ItemDto>>, ApiError> {
    let item = state
        .filesystem_service
        .create_synthetic_file(&req.parent_path, &req.name, req.item_type, req.owner_id)
        .await?;
    Ok(Json(ApiResponse::ok(item.into())))
}

/// PUT /api/filesystem/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<ApiResponse<ItemDto>>, ApiError> {
    let item = state
        .filesystem_service
        .update_file(
            id,
            SvcUpdateFile {
                name: req.name,
                parent_path: req.parent_path,
                owner_id: req.owner_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(item.into())))
}

/// DELETE /api/filesystem/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.filesystem_service.delete_file(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Item deleted".to_string(),
    })))
}
