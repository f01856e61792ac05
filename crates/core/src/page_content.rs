//! Editable page text.
//!
//! The page document is a two-level map: section name to field name to
//! text. There is no schema; the front-end decides which pairs it reads.

use indexmap::IndexMap;
use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;

/// Field name to text within one section.
pub type Section = IndexMap<String, String>;

/// Section name to [`Section`]. Key order is the order sections were added.
pub type PageContent = IndexMap<String, Section>;

/// Request payload for merging fields into one section.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSection {
    #[validate(length(min = 1, message = "Section name is required"))]
    pub section: String,
    #[serde(default)]
    pub fields: Section,
}

/// Merge `update.fields` into `content[update.section]`.
///
/// Creates the section when missing. Existing fields not named in the update
/// are left as they are.
pub fn merge_section(content: &mut PageContent, update: UpdateSection) -> Result<(), CoreError> {
    update
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let section = content.entry(update.section).or_default();
    for (field, value) in update.fields {
        section.insert(field, value);
    }
    Ok(())
}
