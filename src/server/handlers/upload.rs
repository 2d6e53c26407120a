//! Admin asset upload.

use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::super::{ApiError, ApiResult, AppState};

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Store the multipart `file` field and return its public URL.
pub async fn upload_asset(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let no_file = || ApiError::BadRequest("No file uploaded".to_string());

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            return Err(no_file());
        };
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| {
                mime_guess::from_path(&file_name)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string()
            });
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
        if data.is_empty() {
            return Err(no_file());
        }

        let stored = state
            .repo
            .upload_asset(&file_name, data.to_vec(), &content_type)
            .await?;
        return Ok(Json(json!({ "success": true, "url": stored.url })));
    }

    Err(no_file())
}
