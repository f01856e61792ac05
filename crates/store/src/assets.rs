//! Image directories on disk.
//!
//! An [`AssetStore`] owns one directory of images. Attraction blocks each get
//! a sub-directory, reached with [`AssetStore::child`]. Only files with an
//! allowed image extension are listed; anything else in the directory is
//! ignored.

use std::path::{Path, PathBuf};

use falls_core::error::CoreError;
use falls_core::types::Timestamp;
use falls_core::upload::{
    is_image_filename, random_disambiguator, sanitize_filename, stored_filename,
    validate_folder_name, validate_upload,
};
use tokio::io::AsyncWriteExt;

use crate::models::image::{ImageUpload, StoredImage};
use crate::StoreError;

/// Attempts at finding an unused disambiguated name before giving up.
const MAX_NAME_ATTEMPTS: usize = 5;

#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
    /// Path of `root` relative to the static root, used in listings.
    public_prefix: String,
    max_upload_bytes: u64,
}

impl AssetStore {
    pub fn new(
        root: impl Into<PathBuf>,
        public_prefix: impl Into<String>,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into(),
            max_upload_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store rooted at `self.root/folder`.
    ///
    /// `folder` must be a single safe path component.
    pub fn child(&self, folder: &str) -> Result<AssetStore, CoreError> {
        validate_folder_name(folder)?;
        Ok(Self {
            root: self.root.join(folder),
            public_prefix: format!("{}/{folder}", self.public_prefix),
            max_upload_bytes: self.max_upload_bytes,
        })
    }

    /// Public path of a file in this store, relative to the static root.
    pub fn public_path(&self, filename: &str) -> String {
        format!("{}/{filename}", self.public_prefix)
    }

    pub async fn ensure_dir(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    /// Image filenames in this directory, sorted. Empty if it does not exist.
    pub async fn list(&self) -> Vec<String> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(dir = %self.root.display(), error = %e, "Failed to list images");
                }
                return Vec::new();
            }
        };

        let mut names = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
                    if let Some(name) = entry.file_name().to_str() {
                        if is_file && is_image_filename(name) {
                            names.push(name.to_string());
                        }
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(dir = %self.root.display(), error = %e, "Failed to read directory entry");
                    break;
                }
            }
        }

        names.sort();
        names
    }

    /// Like [`list`](Self::list), with size and timestamps for each file.
    pub async fn list_detailed(&self) -> Vec<StoredImage> {
        let mut images = Vec::new();
        for filename in self.list().await {
            let meta = match tokio::fs::metadata(self.root.join(&filename)).await {
                Ok(meta) => meta,
                Err(e) => {
                    tracing::debug!(filename = %filename, error = %e, "Image vanished while listing");
                    continue;
                }
            };

            let modified_at = meta.modified().ok().map(Timestamp::from);
            let created_at = meta.created().ok().map(Timestamp::from).or(modified_at);

            images.push(StoredImage {
                path: self.public_path(&filename),
                filename,
                size: meta.len(),
                created_at,
                modified_at,
            });
        }
        images
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Validate and write an upload, returning the stored filename.
    ///
    /// The stored name always carries a fresh random suffix, and the file is
    /// opened with create-new semantics, so an existing file is never
    /// overwritten.
    pub async fn save(&self, upload: &ImageUpload) -> Result<String, StoreError> {
        validate_upload(&upload.filename, upload.size(), self.max_upload_bytes)?;
        self.ensure_dir().await?;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = stored_filename(&upload.filename, &random_disambiguator())?;
            let path = self.root.join(&filename);

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            if let Err(e) = write_all(&mut file, &upload.bytes).await {
                drop(file);
                let _ = tokio::fs::remove_file(&path).await;
                return Err(e.into());
            }

            tracing::info!(
                dir = %self.root.display(),
                filename = %filename,
                size = upload.size(),
                "Image saved",
            );
            return Ok(filename);
        }

        Err(StoreError::Persistence(format!(
            "Could not find a free filename for '{}'",
            upload.filename
        )))
    }

    /// Delete a file by name. The name is sanitized before use.
    pub async fn delete(&self, filename: &str) -> Result<(), StoreError> {
        let safe = sanitize_filename(filename);
        if safe.is_empty() {
            return Err(CoreError::FileNotFound(filename.to_string()).into());
        }

        let path = self.root.join(&safe);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            _ => return Err(CoreError::FileNotFound(safe).into()),
        }

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(dir = %self.root.display(), filename = %safe, "Image deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CoreError::FileNotFound(safe).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the whole directory. A missing directory is not an error and
    /// other failures are only logged.
    pub async fn remove_all(&self) {
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => tracing::info!(dir = %self.root.display(), "Image folder removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(dir = %self.root.display(), error = %e, "Failed to remove image folder")
            }
        }
    }
}

async fn write_all(file: &mut tokio::fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}
