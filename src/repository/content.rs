//! Blob-backed repository for projects, site copy and uploaded assets.

use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::models::{ProjectsData, SiteContent};
use crate::storage::{mime_to_extension, BlobStore, StoreError, StoredBlob};

/// Blob key of the project gallery document.
pub const PROJECTS_KEY: &str = "projects.json";

/// Blob key of the editable site copy document.
pub const SITE_CONTENT_KEY: &str = "site-content.json";

/// Prefix for uploaded about-section photos.
const ABOUT_PHOTO_PREFIX: &str = "about-photo";

/// Errors from repository writes.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Failed to write to blob storage: {0}")]
    Write(#[source] StoreError),
    #[error("Failed to serialize {key}: {source}")]
    Serialize {
        key: &'static str,
        source: serde_json::Error,
    },
}

/// Typed access to the site documents stored in a [`BlobStore`].
pub struct ContentRepository {
    store: Arc<dyn BlobStore>,
    projects_lock: Mutex<()>,
    content_lock: Mutex<()>,
}

impl ContentRepository {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            projects_lock: Mutex::new(()),
            content_lock: Mutex::new(()),
        }
    }

    /// The underlying blob store.
    pub fn store(&self) -> &Arc<dyn BlobStore> {
        &self.store
    }

    /// Read the project gallery, or an empty one if it cannot be read.
    pub async fn read_projects(&self) -> ProjectsData {
        self.read_or_default(PROJECTS_KEY).await
    }

    /// Read the site copy, or an empty document if it cannot be read.
    pub async fn read_site_content(&self) -> SiteContent {
        self.read_or_default(SITE_CONTENT_KEY).await
    }

    pub async fn write_projects(&self, data: &ProjectsData) -> Result<(), RepositoryError> {
        self.write_json(PROJECTS_KEY, data).await
    }

    pub async fn write_site_content(&self, data: &SiteContent) -> Result<(), RepositoryError> {
        self.write_json(SITE_CONTENT_KEY, data).await
    }

    /// Read, modify and write back the project gallery.
    ///
    /// Nothing is written when `f` fails.
    pub async fn update_projects<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut ProjectsData) -> Result<R, E>,
        E: From<RepositoryError>,
    {
        let _guard = self.projects_lock.lock().await;
        let mut data = self.read_projects().await;
        let result = f(&mut data)?;
        self.write_projects(&data).await?;
        Ok(result)
    }

    /// Read, modify and write back the site copy.
    ///
    /// Nothing is written when `f` fails.
    pub async fn update_site_content<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut SiteContent) -> Result<R, E>,
        E: From<RepositoryError>,
    {
        let _guard = self.content_lock.lock().await;
        let mut data = self.read_site_content().await;
        let result = f(&mut data)?;
        self.write_site_content(&data).await?;
        Ok(result)
    }

    /// Store an uploaded about-section photo under a fresh key.
    pub async fn upload_asset(
        &self,
        file_name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredBlob, RepositoryError> {
        let extension = upload_extension(file_name, content_type);
        let key = format!(
            "{}-{}.{}",
            ABOUT_PHOTO_PREFIX,
            Utc::now().timestamp_millis(),
            extension
        );
        let size = data.len();
        let stored = self
            .store
            .put(&key, data, content_type)
            .await
            .map_err(RepositoryError::Write)?;
        info!("Uploaded {} ({} bytes) as {}", file_name, size, stored.key);
        Ok(stored)
    }

    async fn read_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let blob = match self.store.get(key).await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!("{} not found, using defaults", key);
                return T::default();
            }
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                return T::default();
            }
        };

        serde_json::from_slice(&blob.data).unwrap_or_else(|e| {
            warn!("Malformed {}, using defaults: {}", key, e);
            T::default()
        })
    }

    async fn write_json<T: Serialize>(
        &self,
        key: &'static str,
        value: &T,
    ) -> Result<(), RepositoryError> {
        let data = serde_json::to_vec(value)
            .map_err(|source| RepositoryError::Serialize { key, source })?;
        self.store
            .put(key, data, "application/json")
            .await
            .map_err(|e| {
                tracing::error!("Blob write error for {}: {}", key, e);
                RepositoryError::Write(e)
            })?;
        Ok(())
    }
}

/// File extension for an uploaded asset: from the file name when it has a
/// sane one, otherwise from the content type.
fn upload_extension(file_name: &str, content_type: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or_else(|| mime_to_extension(content_type).to_string())
}
