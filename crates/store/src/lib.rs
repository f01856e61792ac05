//! File-backed persistence for the park site.
//!
//! Two JSON documents (page text, attraction list) and three image
//! directories (hero, gallery, attraction blocks) live under a data
//! directory and a static-assets root. [`Storage`] bundles them and is the
//! handle every repository function takes, the way a connection pool would
//! be for a database.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use falls_core::error::CoreError;
use falls_core::page_content::PageContent;
use falls_core::types::DbId;
use falls_core::upload::{UploadError, MAX_UPLOAD_BYTES};

pub mod assets;
pub mod document;
pub mod models;
pub mod repositories;

use assets::AssetStore;
use document::{parse_records, JsonDocument};
use models::attraction::Attraction;

/// Public path of the hero banner images, relative to the static root.
pub const HERO_PREFIX: &str = "images/hero-section";

/// Public path of the gallery images, relative to the static root.
pub const GALLERY_PREFIX: &str = "images/gallery";

/// Public path of the attraction block folders, relative to the static root.
pub const ATTRACTIONS_PREFIX: &str = "images/attractions";

/// Page text document filename inside the data directory.
pub const CONTENT_FILE: &str = "content.json";

/// Attraction list document filename inside the data directory.
pub const ATTRACTIONS_FILE: &str = "attractions.json";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain-level error from `falls_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A document could not be written.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Any other filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UploadError> for StoreError {
    fn from(err: UploadError) -> Self {
        StoreError::Core(CoreError::Upload(err))
    }
}

// ---------------------------------------------------------------------------
// Storage handle
// ---------------------------------------------------------------------------

/// Where documents and images live on disk.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Root of the public static assets (images live under `images/`).
    pub static_root: PathBuf,
    /// Directory holding the JSON documents.
    pub data_dir: PathBuf,
    /// Upload size limit in bytes.
    pub max_upload_bytes: u64,
}

impl StorageConfig {
    pub fn new(static_root: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            static_root: static_root.into(),
            data_dir: data_dir.into(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

/// All persisted state of the site.
pub struct Storage {
    pub content: JsonDocument<PageContent>,
    pub attractions: JsonDocument<Vec<Attraction>>,
    pub hero: AssetStore,
    pub gallery: AssetStore,
    pub attraction_images: AssetStore,
    /// Largest attraction id handed out since startup.
    id_high_water: AtomicI64,
}

impl Storage {
    /// Create the directory layout if needed and open both documents.
    pub async fn open(config: &StorageConfig) -> Result<Self, StoreError> {
        let max = config.max_upload_bytes;
        let root = &config.static_root;

        let storage = Self {
            content: JsonDocument::new(config.data_dir.join(CONTENT_FILE)),
            attractions: JsonDocument::with_parser(
                config.data_dir.join(ATTRACTIONS_FILE),
                parse_records::<Attraction>,
            ),
            hero: AssetStore::new(root.join(HERO_PREFIX), HERO_PREFIX, max),
            gallery: AssetStore::new(root.join(GALLERY_PREFIX), GALLERY_PREFIX, max),
            attraction_images: AssetStore::new(
                root.join(ATTRACTIONS_PREFIX),
                ATTRACTIONS_PREFIX,
                max,
            ),
            id_high_water: AtomicI64::new(0),
        };

        tokio::fs::create_dir_all(&config.data_dir).await?;
        storage.hero.ensure_dir().await?;
        storage.gallery.ensure_dir().await?;
        storage.attraction_images.ensure_dir().await?;

        let existing = storage.attractions.load().await;
        let max_id = existing.iter().map(|a| a.id).max().unwrap_or(0);
        storage.id_high_water.store(max_id, Ordering::SeqCst);

        tracing::info!(
            data_dir = %config.data_dir.display(),
            static_root = %root.display(),
            attractions = existing.len(),
            "Storage opened",
        );

        Ok(storage)
    }

    pub(crate) fn id_high_water(&self) -> DbId {
        self.id_high_water.load(Ordering::SeqCst)
    }

    pub(crate) fn record_id(&self, id: DbId) {
        self.id_high_water.fetch_max(id, Ordering::SeqCst);
    }
}

/// Verify the data directory and image roots are reachable directories.
pub async fn health_check(storage: &Storage) -> Result<(), StoreError> {
    let data_dir = storage
        .attractions
        .path()
        .parent()
        .unwrap_or_else(|| Path::new("."));

    for dir in [
        data_dir,
        storage.hero.root(),
        storage.gallery.root(),
        storage.attraction_images.root(),
    ] {
        let meta = tokio::fs::metadata(dir).await?;
        if !meta.is_dir() {
            return Err(StoreError::Persistence(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    }
    Ok(())
}
