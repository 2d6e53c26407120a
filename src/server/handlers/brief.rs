//! Creative brief endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::super::{ApiError, ApiResult, AppState};
use crate::models::{BriefRequest, CreativeBrief};

/// Generate a preliminary creative brief from a client inquiry.
pub async fn generate_brief(
    State(state): State<AppState>,
    payload: Result<Json<BriefRequest>, JsonRejection>,
) -> ApiResult<Json<CreativeBrief>> {
    let Json(request) = payload.map_err(|_| ApiError::invalid_body())?;
    if let Some(field) = request.missing_field() {
        return Err(ApiError::BadRequest(format!("{} is required", field)));
    }

    let generator = state.brief.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("Brief generation is not configured".to_string())
    })?;

    let brief = generator.generate_brief(&request).await?;
    Ok(Json(brief))
}
