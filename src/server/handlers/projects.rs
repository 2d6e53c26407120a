//! Project gallery endpoints.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::super::{ApiError, ApiResult, AppState};
use crate::services::{self, NewProject, ProjectUpdate};

/// `?id=` parameter for admin edits.
#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

impl IdParams {
    fn require(self) -> ApiResult<String> {
        self.id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("Project ID required".to_string()))
    }
}

/// Public project gallery.
pub async fn list_projects(State(state): State<AppState>) -> impl IntoResponse {
    let data = state.repo.read_projects().await;
    ([(header::CACHE_CONTROL, state.cache_control())], Json(data))
}

/// Project gallery for the admin editor (never cached).
pub async fn admin_list_projects(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.repo.read_projects().await)
}

pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<NewProject>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload.map_err(|_| ApiError::invalid_body())?;

    let project = state
        .repo
        .update_projects(|data| services::create_project(data, input, Utc::now()))
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "project": project })),
    ))
}

pub async fn update_project(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
    payload: Result<Json<ProjectUpdate>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = params.require()?;
    let Json(input) = payload.map_err(|_| ApiError::invalid_body())?;

    state
        .repo
        .update_projects(|data| services::update_project(data, &id, input))
        .await
        .map_err(ApiError::from)?;

    Ok(Json(json!({ "success": true })))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> ApiResult<impl IntoResponse> {
    let id = params.require()?;

    state
        .repo
        .update_projects(|data| services::delete_project(data, &id).map(|_| ()))
        .await
        .map_err(ApiError::from)?;

    Ok(Json(json!({ "success": true })))
}
