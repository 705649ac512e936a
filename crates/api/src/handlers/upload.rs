//! Handler for `POST /api/upload` (images and documents referenced from
//! blog posts and orders).

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use scriptum_core::upload::{stored_file_name, validate_upload};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadedFile {
    /// Public URL the file is served from.
    pub url: String,
    /// Name the file was stored under.
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

/// POST /api/upload
///
/// Stores the `file` field under a random name in the upload directory.
pub async fn upload_file(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let upload = &state.config.upload;
        let ext = validate_upload(&content_type, data.len(), upload.max_bytes)?;
        let file_name = stored_file_name(Uuid::new_v4(), ext);

        tokio::fs::create_dir_all(&upload.dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
        tokio::fs::write(upload.dir.join(&file_name), &data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        tracing::info!(
            file_name = %file_name,
            size = data.len(),
            user_id = user.user_id,
            "File uploaded",
        );

        let url = format!("{}/{file_name}", upload.public_path.trim_end_matches('/'));
        return Ok((
            StatusCode::CREATED,
            Json(DataResponse {
                data: UploadedFile {
                    url,
                    file_name,
                    content_type,
                    size: data.len(),
                },
            }),
        ));
    }

    Err(AppError::BadRequest(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}
