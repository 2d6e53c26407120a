//! Project gallery edits.
//!
//! Every write path resolves the submitted video link through
//! [`crate::video`] so project records always carry a consistent
//! `videoId`/`videoSource`/`thumbnailUrl` triple.

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::models::{Project, ProjectKind, ProjectsData};
use crate::repository::RepositoryError;
use crate::video::{self, VideoReference, VideoSource};

/// Thumbnail used when a project has neither an explicit thumbnail nor a video.
pub const PLACEHOLDER_THUMBNAIL: &str = "https://picsum.photos/800/450?grayscale";

/// Category assigned when none is given.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Errors from project edits.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Invalid request body")]
    InvalidBody,
    #[error("Project not found")]
    NotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Body of a create request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub year: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_link: Option<String>,
    /// Legacy Drive-only link field.
    pub drive_video_link: Option<String>,
}

/// Body of an update request. Absent or empty fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub title: Option<String>,
    pub category: Option<String>,
    pub year: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_link: Option<String>,
    pub drive_video_link: Option<String>,
}

impl ProjectUpdate {
    /// Whether the request carries a video link field at all.
    fn touches_video(&self) -> bool {
        self.video_link.is_some() || self.drive_video_link.is_some()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolve the submitted link fields. The unified field wins; the legacy
/// field is a Drive-only input path.
pub fn resolve_links(video_link: Option<&str>, drive_video_link: Option<&str>) -> VideoReference {
    match (non_empty(video_link), non_empty(drive_video_link)) {
        (Some(link), _) => video::resolve(link),
        (None, Some(link)) => video::resolve_drive(link),
        (None, None) => video::resolve(""),
    }
}

/// Encode a non-negative number in lowercase base 36.
fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Generate a project ID from the creation time, unique within `data`.
fn generate_id(kind: ProjectKind, now: DateTime<Utc>, data: &ProjectsData) -> String {
    let mut millis = now.timestamp_millis().max(0) as u64;
    loop {
        let id = format!("{}-{}", kind.id_prefix(), to_base36(millis));
        if !data.contains_id(&id) {
            return id;
        }
        millis += 1;
    }
}

/// Add a new project to the gallery.
pub fn create_project(
    data: &mut ProjectsData,
    input: NewProject,
    now: DateTime<Utc>,
) -> Result<Project, ProjectError> {
    let kind = input
        .kind
        .as_deref()
        .and_then(ProjectKind::parse)
        .ok_or(ProjectError::InvalidBody)?;
    let title = non_empty(input.title.as_deref()).ok_or(ProjectError::InvalidBody)?;

    let video = resolve_links(input.video_link.as_deref(), input.drive_video_link.as_deref());
    let thumbnail_url = match non_empty(input.thumbnail_url.as_deref()) {
        Some(explicit) => explicit.to_string(),
        None if video.has_video() => video.thumbnail_url.clone(),
        None => PLACEHOLDER_THUMBNAIL.to_string(),
    };

    let project = Project {
        id: generate_id(kind, now, data),
        title: title.to_string(),
        category: non_empty(input.category.as_deref())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string(),
        year: non_empty(input.year.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| now.year().to_string()),
        thumbnail_url,
        video_id: (!video.video_id.is_empty()).then(|| video.video_id.clone()),
        video_source: video.stored_source(),
        drive_video_id: (video.source == VideoSource::Drive && !video.video_id.is_empty())
            .then(|| video.video_id.clone()),
    };

    info!(
        "Created {} project {} ({})",
        kind.as_str(),
        project.id,
        video.source
    );
    data.list_mut(kind).push(project.clone());
    Ok(project)
}

/// Apply an update to an existing project.
///
/// Video fields are re-resolved only when the request carries a link field.
/// A derived thumbnail replaces the stored one only when the video changed.
pub fn update_project(
    data: &mut ProjectsData,
    id: &str,
    input: ProjectUpdate,
) -> Result<Project, ProjectError> {
    let project = data
        .find_mut(id)
        .ok_or_else(|| ProjectError::NotFound(id.to_string()))?;

    if let Some(title) = non_empty(input.title.as_deref()) {
        project.title = title.to_string();
    }
    if let Some(category) = non_empty(input.category.as_deref()) {
        project.category = category.to_string();
    }
    if let Some(year) = non_empty(input.year.as_deref()) {
        project.year = year.to_string();
    }

    let explicit_thumbnail = non_empty(input.thumbnail_url.as_deref()).map(str::to_string);

    if input.touches_video() {
        let video = resolve_links(input.video_link.as_deref(), input.drive_video_link.as_deref());
        let video_changed = project.current_video_id() != Some(video.video_id.as_str());

        project.thumbnail_url = match explicit_thumbnail {
            Some(explicit) => explicit,
            None if video.has_video() && video_changed => video.thumbnail_url.clone(),
            None => std::mem::take(&mut project.thumbnail_url),
        };
        project.video_id = (!video.video_id.is_empty()).then(|| video.video_id.clone());
        project.video_source = video.stored_source();
        if video.source == VideoSource::Drive && !video.video_id.is_empty() {
            project.drive_video_id = Some(video.video_id.clone());
        }
    } else if let Some(explicit) = explicit_thumbnail {
        project.thumbnail_url = explicit;
    }

    info!("Updated project {}", project.id);
    Ok(project.clone())
}

/// Remove a project from the gallery.
pub fn delete_project(data: &mut ProjectsData, id: &str) -> Result<Project, ProjectError> {
    let (kind, project) = data
        .remove(id)
        .ok_or_else(|| ProjectError::NotFound(id.to_string()))?;
    info!("Deleted {} project {}", kind.as_str(), project.id);
    Ok(project)
}
