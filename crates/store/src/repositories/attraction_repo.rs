//! Repository for the attraction list (`attractions.json`) and each
//! attraction's image folder.
//!
//! Every mutation loads the whole list under the document lock, changes one
//! record, touches the filesystem if needed, and writes the whole list back.
//! File changes are not rolled back if the final write fails.

use falls_core::attraction::{
    folder_for, next_id, next_order, normalize_title, order_positions, DEFAULT_LAYOUT, ENTITY,
};
use falls_core::error::CoreError;
use falls_core::types::DbId;
use falls_core::upload::sanitize_filename;

use crate::assets::AssetStore;
use crate::models::attraction::{Attraction, CreateAttraction, UpdateAttraction};
use crate::models::image::{ImageUpload, SavedImage};
use crate::{Storage, StoreError};

/// Provides data access for attractions.
pub struct AttractionRepo;

impl AttractionRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// All attractions sorted by `order` (ties by id).
    ///
    /// With `with_images`, each record's `images` is replaced by the files
    /// actually present in its folder.
    pub async fn list(storage: &Storage, with_images: bool) -> Vec<Attraction> {
        let mut attractions = storage.attractions.load().await;
        sort_by_order(&mut attractions);

        if with_images {
            for attraction in &mut attractions {
                attraction.images = match Self::folder_store(storage, attraction) {
                    Ok(store) => store.list().await,
                    Err(e) => {
                        tracing::warn!(id = attraction.id, error = %e, "Skipping image listing");
                        Vec::new()
                    }
                };
            }
        }

        attractions
    }

    pub async fn find_by_id(storage: &Storage, id: DbId) -> Option<Attraction> {
        storage
            .attractions
            .load()
            .await
            .into_iter()
            .find(|a| a.id == id)
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Create an attraction and its (empty) image folder.
    pub async fn create(
        storage: &Storage,
        dto: &CreateAttraction,
    ) -> Result<Attraction, StoreError> {
        let title = normalize_title(dto.title.as_deref())?;

        let doc = storage.attractions.lock().await;
        let mut attractions = doc.load().await?;

        let mut id = next_id(attractions.iter().map(|a| a.id), storage.id_high_water());
        // A leftover folder belongs to a record this list no longer holds.
        while Self::folder_taken(storage, id).await {
            tracing::warn!(id, "Image folder already exists, skipping id");
            id += 1;
        }
        let attraction = Attraction {
            id,
            title,
            description: dto.description.clone().unwrap_or_default(),
            detailed_description: dto.detailed_description.clone().unwrap_or_default(),
            layout: dto
                .layout
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LAYOUT.to_string()),
            order: dto
                .order
                .unwrap_or_else(|| next_order(attractions.iter().map(|a| a.order))),
            folder: folder_for(id),
            images: Vec::new(),
        };

        let folder = Self::folder_store(storage, &attraction)?;
        folder.ensure_dir().await?;

        attractions.push(attraction.clone());
        if let Err(e) = doc.save(&attractions).await {
            folder.remove_all().await;
            return Err(e);
        }
        storage.record_id(id);

        tracing::info!(
            id,
            title = %attraction.title,
            folder = %attraction.folder,
            "Attraction created",
        );
        Ok(attraction)
    }

    /// Merge the supplied fields into an attraction.
    pub async fn update(
        storage: &Storage,
        id: DbId,
        dto: &UpdateAttraction,
    ) -> Result<Attraction, StoreError> {
        let title = match dto.title.as_deref() {
            Some(t) => Some(normalize_title(Some(t))?),
            None => None,
        };

        storage
            .attractions
            .update(|attractions| {
                let attraction = find_mut(attractions, id)?;
                if let Some(title) = title {
                    attraction.title = title;
                }
                if let Some(description) = &dto.description {
                    attraction.description = description.clone();
                }
                if let Some(detailed) = &dto.detailed_description {
                    attraction.detailed_description = detailed.clone();
                }
                if let Some(layout) = &dto.layout {
                    attraction.layout = layout.clone();
                }
                if let Some(order) = dto.order {
                    attraction.order = order;
                }
                Ok(attraction.clone())
            })
            .await
            .inspect(|_| tracing::info!(id, "Attraction updated"))
    }

    /// Delete an attraction and its whole image folder.
    pub async fn delete(storage: &Storage, id: DbId) -> Result<(), StoreError> {
        let doc = storage.attractions.lock().await;
        let mut attractions = doc.load().await?;

        let idx = attractions
            .iter()
            .position(|a| a.id == id)
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        let removed = attractions.remove(idx);

        match Self::folder_store(storage, &removed) {
            Ok(folder) => folder.remove_all().await,
            Err(e) => tracing::warn!(id, error = %e, "Not removing image folder"),
        }

        doc.save(&attractions).await?;
        tracing::info!(id, title = %removed.title, "Attraction deleted");
        Ok(())
    }

    /// Give each listed id its 1-based position as `order`.
    ///
    /// Records not in `ids` keep their order; unknown ids are ignored.
    /// Returns the re-sorted list.
    pub async fn reorder(storage: &Storage, ids: &[DbId]) -> Result<Vec<Attraction>, StoreError> {
        let positions = order_positions(ids)?;

        storage
            .attractions
            .update(|attractions| {
                for attraction in attractions.iter_mut() {
                    if let Some(position) = positions.get(&attraction.id) {
                        attraction.order = *position;
                    }
                }
                sort_by_order(attractions);
                Ok(attractions.clone())
            })
            .await
            .inspect(|_| tracing::info!(count = ids.len(), "Attractions reordered"))
    }

    /// Store an uploaded image in the attraction's folder and record it.
    pub async fn add_image(
        storage: &Storage,
        id: DbId,
        upload: &ImageUpload,
    ) -> Result<SavedImage, StoreError> {
        let doc = storage.attractions.lock().await;
        let mut attractions = doc.load().await?;

        let attraction = find_mut(&mut attractions, id)?;
        let folder = Self::folder_store(storage, attraction)?;
        let filename = folder.save(upload).await?;

        if !attraction.images.contains(&filename) {
            attraction.images.push(filename.clone());
        }

        let path = folder.public_path(&filename);
        doc.save(&attractions).await?;
        tracing::info!(id, filename = %filename, "Attraction image added");
        Ok(SavedImage { filename, path })
    }

    /// Delete one image file of an attraction and drop it from `images`.
    pub async fn remove_image(
        storage: &Storage,
        id: DbId,
        filename: &str,
    ) -> Result<(), StoreError> {
        let doc = storage.attractions.lock().await;
        let mut attractions = doc.load().await?;

        let attraction = find_mut(&mut attractions, id)?;
        let folder = Self::folder_store(storage, attraction)?;
        folder.delete(filename).await?;

        let safe = sanitize_filename(filename);
        attraction.images.retain(|name| name != &safe);

        doc.save(&attractions).await?;
        tracing::info!(id, filename = %safe, "Attraction image removed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn folder_taken(storage: &Storage, id: DbId) -> bool {
        let path = storage.attraction_images.root().join(folder_for(id));
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    fn folder_store(storage: &Storage, attraction: &Attraction) -> Result<AssetStore, CoreError> {
        storage.attraction_images.child(&attraction.image_folder())
    }
}

fn find_mut(attractions: &mut [Attraction], id: DbId) -> Result<&mut Attraction, CoreError> {
    attractions
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or(CoreError::NotFound { entity: ENTITY, id })
}

fn sort_by_order(attractions: &mut [Attraction]) {
    attractions.sort_by_key(|a| (a.order, a.id));
}
