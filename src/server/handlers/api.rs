//! Health check and link resolution endpoints.

use axum::{extract::Query, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::video::{self, VideoReference};

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Parameters for link resolution.
#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    #[serde(default)]
    pub link: String,
    /// Treat the link as a Drive link or bare Drive ID.
    #[serde(default)]
    pub drive: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveResponse {
    #[serde(flatten)]
    video: VideoReference,
    embed_url: String,
}

/// Resolve a pasted link the way project writes will, for admin previews.
pub async fn resolve_link(Query(params): Query<ResolveParams>) -> impl IntoResponse {
    let video = if params.drive {
        video::resolve_drive(&params.link)
    } else {
        video::resolve(&params.link)
    };
    let embed_url = video.embed_url();
    Json(ResolveResponse { video, embed_url })
}
