//! Public blob downloads.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use super::super::{ApiError, ApiResult, AppState};
use crate::storage::StoreError;

/// Serve a stored blob with its content type.
pub async fn serve_blob(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Response> {
    let blob = state
        .repo
        .store()
        .get(&key)
        .await
        .map_err(|e| match e {
            StoreError::InvalidKey(_) => ApiError::NotFound("Not found".to_string()),
            other => ApiError::Internal(other.to_string()),
        })?
        .ok_or_else(|| ApiError::NotFound("Not found".to_string()))?;

    Ok(([(header::CONTENT_TYPE, blob.content_type)], blob.data).into_response())
}
