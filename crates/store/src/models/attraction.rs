//! Attraction block model and DTOs.

use falls_core::attraction::{folder_for, DEFAULT_LAYOUT};
use falls_core::types::DbId;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// One content block of the landing page, as stored in `attractions.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub id: DbId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub detailed_description: String,
    #[serde(default = "default_layout")]
    pub layout: String,
    #[serde(default)]
    pub order: i64,
    /// Image sub-directory under the attraction images root.
    #[serde(default)]
    pub folder: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Attraction {
    /// The stored folder, or `block-<id>` for records written without one.
    pub fn image_folder(&self) -> String {
        if self.folder.is_empty() {
            folder_for(self.id)
        } else {
            self.folder.clone()
        }
    }
}

fn default_layout() -> String {
    DEFAULT_LAYOUT.to_string()
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating an attraction. Only `title` is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAttraction {
    pub title: Option<String>,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    pub layout: Option<String>,
    pub order: Option<i64>,
}

/// DTO for partially updating an attraction. Absent fields are untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAttraction {
    pub title: Option<String>,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    pub layout: Option<String>,
    pub order: Option<i64>,
}

/// DTO for reordering: ids in their new display order.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderAttractions {
    #[serde(default)]
    pub order: Vec<DbId>,
}
