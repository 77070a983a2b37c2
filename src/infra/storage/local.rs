//! Filesystem-backed photo store.
//!
//! Objects live under `<root>/<bucket>/<key>` and are served from a
//! configured public base URL (e.g. by a reverse proxy or a static-file
//! layer in front of the storage root).

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::config::{Config, PHOTO_BUCKET};
use crate::errors::{AppError, AppResult};

use super::PhotoStorage;

pub struct LocalPhotoStore {
    root: PathBuf,
    public_base: String,
}

impl LocalPhotoStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.storage_root, &config.storage_public_url)
    }

    fn object_path(&self, key: &str) -> AppResult<PathBuf> {
        // Keys are generated internally, but delete derives them from
        // stored URLs; refuse anything that could escape the bucket dir
        if key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
            return Err(AppError::BadRequest(format!("invalid storage key: {key}")));
        }
        Ok(self.root.join(PHOTO_BUCKET).join(key))
    }
}

#[async_trait]
impl PhotoStorage for LocalPhotoStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> AppResult<String> {
        let path = self.object_path(key)?;

        if fs::try_exists(&path)
            .await
            .map_err(|e| AppError::upload(e.to_string()))?
        {
            return Err(AppError::upload(format!("object already exists: {key}")));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::upload(e.to_string()))?;
        }
        fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::upload(e.to_string()))?;

        tracing::debug!(key, "photo stored");
        Ok(self.public_url(key))
    }

    async fn remove(&self, keys: &[String]) -> AppResult<()> {
        // Callers treat removal as cleanup: a bad key must not stop the
        // rest of the batch from being attempted
        let mut failures = Vec::new();
        for key in keys {
            let result = match self.object_path(key) {
                Ok(path) => fs::remove_file(&path)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            if let Err(e) = result {
                failures.push(format!("{key}: {e}"));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(AppError::internal(format!(
                "storage delete failed for {}",
                failures.join("; ")
            )))
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_base, PHOTO_BUCKET, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> LocalPhotoStore {
        LocalPhotoStore::new(dir.path(), "http://localhost:3000/storage")
    }

    #[tokio::test]
    async fn upload_writes_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let url = store
            .upload("talents/1_abc.jpg", b"jpeg-bytes".to_vec())
            .await
            .unwrap();

        assert_eq!(
            url,
            "http://localhost:3000/storage/talent-photos/talents/1_abc.jpg"
        );
        let on_disk = dir.path().join("talent-photos/talents/1_abc.jpg");
        assert_eq!(fs::read(on_disk).await.unwrap(), b"jpeg-bytes");
    }

    #[tokio::test]
    async fn upload_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store
            .upload("talents/1_abc.jpg", b"first".to_vec())
            .await
            .unwrap();
        let err = store
            .upload("talents/1_abc.jpg", b"second".to_vec())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Upload(_)));
    }

    #[tokio::test]
    async fn remove_deletes_objects() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store
            .upload("talents/1_abc.jpg", b"x".to_vec())
            .await
            .unwrap();
        store
            .remove(&["talents/1_abc.jpg".to_string()])
            .await
            .unwrap();

        let on_disk = dir.path().join("talent-photos/talents/1_abc.jpg");
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn remove_attempts_every_key_in_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store
            .upload("talents/2_def.jpg", b"x".to_vec())
            .await
            .unwrap();

        // first key does not exist, the second must still be deleted
        let err = store
            .remove(&[
                "talents/1_missing.jpg".to_string(),
                "talents/2_def.jpg".to_string(),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        let on_disk = dir.path().join("talent-photos/talents/2_def.jpg");
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let err = store
            .upload("../escape.jpg", b"x".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
