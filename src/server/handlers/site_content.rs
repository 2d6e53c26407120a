//! Editable site copy endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::super::{ApiError, ApiResult, AppState};

/// Body of a section update.
#[derive(Debug, Deserialize)]
pub struct SectionUpdate {
    pub section: Option<String>,
    pub data: Option<Value>,
}

/// Public site copy.
pub async fn get_site_content(State(state): State<AppState>) -> impl IntoResponse {
    let content = state.repo.read_site_content().await;
    ([(header::CACHE_CONTROL, state.cache_control())], Json(content))
}

/// Replace one section of the site copy.
pub async fn update_site_content(
    State(state): State<AppState>,
    payload: Result<Json<SectionUpdate>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(update) = payload.map_err(|_| ApiError::invalid_body())?;

    let (section, data) = match (update.section, update.data) {
        (Some(section), Some(data)) if !section.is_empty() && !data.is_null() => (section, data),
        _ => {
            return Err(ApiError::BadRequest(
                "Section and data required".to_string(),
            ))
        }
    };

    state
        .repo
        .update_site_content(|content| {
            content
                .set_section(&section, data)
                .map_err(ApiError::from)
        })
        .await?;

    info!("Updated site content section {}", section);
    Ok(Json(json!({ "success": true })))
}
