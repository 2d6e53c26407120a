//! Filesystem-backed blob store.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{content_type_for_key, join_url, validate_key, Blob, BlobStore, StoreError, StoredBlob};

/// Stores each blob as a file under a root directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(key.split('/').fold(self.root.clone(), |p, seg| p.join(seg)))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Blob>, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(Blob {
                data,
                content_type: content_type_for_key(key),
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredBlob, StoreError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Sibling temp file, renamed into place.
        let tmp = temp_path(&path);
        tokio::fs::write(&tmp, &data).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!("Stored blob {} ({} bytes) at {}", key, data.len(), path.display());

        Ok(StoredBlob {
            key: key.to_string(),
            url: self.url_for(key),
            content_type: content_type.to_string(),
        })
    }

    fn url_for(&self, key: &str) -> String {
        join_url(&self.public_base_url, key)
    }
}

/// Temp file for an in-flight write: the full file name plus `.tmp`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempdir().unwrap();
        let store = FsBlobStore::new(dir.path(), "http://localhost:3030");

        let stored = store
            .put("projects.json", b"{}".to_vec(), "application/json")
            .await
            .unwrap();
        assert_eq!(stored.url, "http://localhost:3030/blobs/projects.json");
        assert!(dir.path().join("projects.json").exists());

        let blob = store.get("projects.json").await.unwrap().unwrap();
        assert_eq!(blob.data, b"{}");
        assert_eq!(blob.content_type, "application/json");
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let dir = tempdir().unwrap();
        let store = FsBlobStore::new(dir.path(), "http://localhost:3030");
        assert!(store.get("nothing.json").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_nested_key_creates_directories() {
        let dir = tempdir().unwrap();
        let store = FsBlobStore::new(dir.path(), "http://localhost:3030");
        store
            .put("uploads/a.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();
        assert!(dir.path().join("uploads").join("a.png").exists());
        assert!(!dir.path().join("uploads").join("a.tmp-write").exists());
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let dir = tempdir().unwrap();
        let store = FsBlobStore::new(dir.path().join("blobs"), "http://localhost:3030");
        let err = store
            .put("../escape.json", b"{}".to_vec(), "application/json")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }

    #[test]
    fn test_temp_path_keeps_extension() {
        let root = Path::new("/blobs");
        assert_eq!(temp_path(&root.join("a.json")), root.join("a.json.tmp"));
        assert_ne!(
            temp_path(&root.join("a.json")),
            temp_path(&root.join("a.png"))
        );
    }

    #[tokio::test]
    async fn test_same_stem_keys_stay_separate() {
        let dir = tempdir().unwrap();
        let store = FsBlobStore::new(dir.path(), "http://localhost:3030");

        let (json, png) = tokio::join!(
            store.put("a.json", b"{}".to_vec(), "application/json"),
            store.put("a.png", vec![0x89, b'P', b'N', b'G'], "image/png"),
        );
        json.unwrap();
        png.unwrap();

        assert_eq!(store.get("a.json").await.unwrap().unwrap().data, b"{}");
        assert_eq!(&store.get("a.png").await.unwrap().unwrap().data[1..], b"PNG");
        assert!(!dir.path().join("a.json.tmp").exists());
    }
}
