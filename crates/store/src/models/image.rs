//! Image upload input and listing output.

use falls_core::types::Timestamp;
use serde::Serialize;

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Filename as sent by the client; never used as a path directly.
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A file just written to an image directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedImage {
    pub filename: String,
    /// Path relative to the static root.
    pub path: String,
}

/// A file found in an image directory.
#[derive(Debug, Clone, Serialize)]
pub struct StoredImage {
    pub filename: String,
    /// Path relative to the static root, e.g. `images/gallery/a_1f2e3d4c.jpg`.
    pub path: String,
    pub size: u64,
    pub created_at: Option<Timestamp>,
    pub modified_at: Option<Timestamp>,
}
