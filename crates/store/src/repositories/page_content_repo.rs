//! Repository for the page text document (`content.json`).

use falls_core::page_content::{merge_section, PageContent, UpdateSection};

use crate::{Storage, StoreError};

/// Provides data access for page text.
pub struct PageContentRepo;

impl PageContentRepo {
    pub async fn get(storage: &Storage) -> PageContent {
        storage.content.load().await
    }

    /// Merge one section's fields into the document and return the result.
    pub async fn update_section(
        storage: &Storage,
        update: UpdateSection,
    ) -> Result<PageContent, StoreError> {
        let section = update.section.clone();
        let content = storage
            .content
            .update(|content| {
                merge_section(content, update)?;
                Ok(content.clone())
            })
            .await?;

        tracing::info!(section = %section, "Page content updated");
        Ok(content)
    }
}
