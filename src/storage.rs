//! Blob storage for site documents and uploaded assets.
//!
//! A blob store maps flat keys such as `projects.json` or
//! `about-photo-1718000000000.jpg` to bytes and hands out a public URL for
//! each stored blob.

mod fs;
mod memory;

pub use fs::FsBlobStore;
pub use memory::MemoryBlobStore;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a blob store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid blob key: {0}")]
    InvalidKey(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Blob content read back from a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Metadata of a blob that was just written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub key: String,
    pub url: String,
    pub content_type: String,
}

/// Key-value blob storage with public URLs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read a blob, `None` if the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<Blob>, StoreError>;

    /// Write a blob, replacing any existing content under the same key.
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredBlob, StoreError>;

    /// Public URL a stored key is served from.
    fn url_for(&self, key: &str) -> String;
}

/// Check that a key is a safe, flat-ish relative name.
///
/// Keys may contain `/` for grouping but never `..` segments, absolute paths,
/// backslashes or characters outside `[A-Za-z0-9._/-]`.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.ends_with('/')
        || key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..")
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '/'));
    if invalid {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Guess a content type from a key's extension.
pub fn content_type_for_key(key: &str) -> String {
    mime_guess::from_path(key)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Map MIME type to file extension for uploads without a usable filename.
pub fn mime_to_extension(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/avif" => "avif",
        "image/svg+xml" => "svg",
        "application/json" => "json",
        "application/pdf" => "pdf",
        "video/mp4" => "mp4",
        _ => "bin",
    }
}

/// Join a public base URL and a blob key.
pub(crate) fn join_url(base_url: &str, key: &str) -> String {
    format!("{}/blobs/{}", base_url.trim_end_matches('/'), key)
}
