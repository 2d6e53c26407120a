//! Portfolio Flow Tests
//!
//! Drives project edits through the repository against a filesystem blob
//! store, the way the HTTP handlers do.

use std::sync::Arc;

use chrono::Utc;
use tempfile::tempdir;
use vidfolio::models::{ProjectKind, SiteContent};
use vidfolio::repository::{ContentRepository, PROJECTS_KEY};
use vidfolio::services::{self, NewProject, ProjectError, ProjectUpdate, PLACEHOLDER_THUMBNAIL};
use vidfolio::storage::{BlobStore, FsBlobStore};
use vidfolio::video::VideoSource;

fn new_project(kind: &str, title: &str, link: Option<&str>) -> NewProject {
    NewProject {
        kind: Some(kind.to_string()),
        title: Some(title.to_string()),
        video_link: link.map(str::to_string),
        ..Default::default()
    }
}

#[tokio::test]
async fn projects_persist_across_repository_instances() {
    let dir = tempdir().unwrap();
    let store = Arc::new(FsBlobStore::new(dir.path(), "https://portfolio.example"));

    let repo = ContentRepository::new(store.clone());
    let created = repo
        .update_projects(|data| {
            services::create_project(
                data,
                new_project("longForm", "Brand film", Some("https://youtu.be/dQw4w9WgXcQ")),
                Utc::now(),
            )
        })
        .await
        .unwrap();

    // A fresh repository over the same directory sees the write.
    let reopened = ContentRepository::new(store.clone());
    let data = reopened.read_projects().await;
    assert_eq!(data.list(ProjectKind::LongForm).len(), 1);
    assert_eq!(data.long_form[0].id, created.id);
    assert_eq!(data.long_form[0].video_source, Some(VideoSource::YouTube));

    let raw = store.get(PROJECTS_KEY).await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&raw.data).unwrap();
    assert_eq!(json["longForm"][0]["videoId"], "dQw4w9WgXcQ");
    assert_eq!(json["shortForm"], serde_json::json!([]));
}

#[tokio::test]
async fn switching_video_updates_thumbnail_but_keeps_custom_one_otherwise() {
    let dir = tempdir().unwrap();
    let repo = ContentRepository::new(Arc::new(FsBlobStore::new(dir.path(), "http://localhost")));

    let project = repo
        .update_projects(|data| {
            services::create_project(data, new_project("shortForm", "Teaser", None), Utc::now())
        })
        .await
        .unwrap();
    assert_eq!(project.thumbnail_url, PLACEHOLDER_THUMBNAIL);

    let set_custom = ProjectUpdate {
        thumbnail_url: Some("https://cdn.example/teaser.jpg".to_string()),
        video_link: Some("https://drive.google.com/file/d/DRIVE123/view".to_string()),
        ..Default::default()
    };
    let updated = repo
        .update_projects(|data| services::update_project(data, &project.id, set_custom))
        .await
        .unwrap();
    assert_eq!(updated.thumbnail_url, "https://cdn.example/teaser.jpg");
    assert_eq!(updated.drive_video_id.as_deref(), Some("DRIVE123"));

    // Same video again: custom thumbnail survives.
    let same_video = ProjectUpdate {
        video_link: Some("https://drive.google.com/open?id=DRIVE123".to_string()),
        ..Default::default()
    };
    let updated = repo
        .update_projects(|data| services::update_project(data, &project.id, same_video))
        .await
        .unwrap();
    assert_eq!(updated.thumbnail_url, "https://cdn.example/teaser.jpg");

    // New video: thumbnail follows it.
    let new_video = ProjectUpdate {
        video_link: Some("dQw4w9WgXcQ".to_string()),
        ..Default::default()
    };
    let updated = repo
        .update_projects(|data| services::update_project(data, &project.id, new_video))
        .await
        .unwrap();
    assert_eq!(
        updated.thumbnail_url,
        "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
    );
    assert_eq!(updated.video_source, Some(VideoSource::YouTube));
}

#[tokio::test]
async fn rejected_edit_leaves_document_untouched() {
    let dir = tempdir().unwrap();
    let store = Arc::new(FsBlobStore::new(dir.path(), "http://localhost"));
    let repo = ContentRepository::new(store.clone());

    let result = repo
        .update_projects(|data| services::delete_project(data, "lf-missing"))
        .await;
    assert!(matches!(result, Err(ProjectError::NotFound(_))));
    assert!(store.get(PROJECTS_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn site_sections_update_independently() {
    let dir = tempdir().unwrap();
    let repo = ContentRepository::new(Arc::new(FsBlobStore::new(dir.path(), "http://localhost")));

    repo.update_site_content(|content: &mut SiteContent| {
        content.set_section("clients", serde_json::json!(["Acme", "Globex"]))?;
        Ok::<_, anyhow::Error>(())
    })
    .await
    .unwrap();
    repo.update_site_content(|content: &mut SiteContent| {
        content.set_section("contact", serde_json::json!({ "email": "hi@example.com" }))?;
        Ok::<_, anyhow::Error>(())
    })
    .await
    .unwrap();

    let content = repo.read_site_content().await;
    assert_eq!(
        content.clients,
        Some(vec!["Acme".to_string(), "Globex".to_string()])
    );
    assert!(content.contact.is_some());
}
