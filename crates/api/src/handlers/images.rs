//! Handlers for the hero banner and gallery image collections.
//!
//! Neither collection is tracked in a document: what is on disk is what
//! gets listed.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use falls_core::upload::DISAMBIGUATOR_LEN;
use falls_store::assets::AssetStore;
use falls_store::models::image::{SavedImage, StoredImage};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::{AppJson, AppMultipart};
use crate::handlers::upload::read_image_upload;
use crate::middleware::auth::RequireAdmin;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for the delete endpoints.
#[derive(Debug, Deserialize)]
pub struct DeleteImageRequest {
    pub filename: String,
}

/// Gallery entry as the site's gallery script reads it.
#[derive(Debug, Serialize)]
pub struct GalleryImage {
    #[serde(flatten)]
    pub image: StoredImage,
    pub alt: String,
}

/// `{ "success": true, "images": [...] }`, the shape the gallery script expects.
#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub success: bool,
    pub images: Vec<GalleryImage>,
}

/// Readable alt text from a stored filename: the random suffix and
/// extension are dropped and separators become spaces.
pub fn alt_text(filename: &str) -> String {
    let stem = filename.rsplit_once('.').map_or(filename, |(stem, _)| stem);
    let stem = match stem.rsplit_once('_') {
        Some((base, suffix))
            if suffix.len() == DISAMBIGUATOR_LEN
                && suffix.chars().all(|c| c.is_ascii_hexdigit()) =>
        {
            base
        }
        _ => stem,
    };
    stem.replace(['_', '-'], " ").trim().to_string()
}

async fn gallery_listing(state: &AppState) -> GalleryResponse {
    let images = state
        .storage
        .gallery
        .list_detailed()
        .await
        .into_iter()
        .map(|image| GalleryImage {
            alt: alt_text(&image.filename),
            image,
        })
        .collect();
    GalleryResponse {
        success: true,
        images,
    }
}

async fn store_upload(store: &AssetStore, multipart: Multipart) -> AppResult<SavedImage> {
    let upload = read_image_upload(multipart).await?;
    let filename = store.save(&upload).await?;
    let path = store.public_path(&filename);
    Ok(SavedImage { filename, path })
}

// ---------------------------------------------------------------------------
// Hero banner
// ---------------------------------------------------------------------------

/// POST /admin/upload-image
pub async fn upload_hero_image(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<(StatusCode, Json<DataResponse<SavedImage>>)> {
    let uploaded = store_upload(&state.storage.hero, multipart).await?;
    tracing::info!(
        username = %admin.username,
        filename = %uploaded.filename,
        "Hero image uploaded",
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(uploaded))))
}

/// POST /admin/delete-image
pub async fn delete_hero_image(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<DeleteImageRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.storage.hero.delete(&input.filename).await?;
    tracing::info!(
        username = %admin.username,
        filename = %input.filename,
        "Hero image deleted",
    );
    Ok(Json(MessageResponse::ok("Image deleted")))
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// GET /gallery-data
pub async fn gallery_data(State(state): State<AppState>) -> Json<GalleryResponse> {
    Json(gallery_listing(&state).await)
}

/// GET /admin/gallery
pub async fn admin_gallery(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Json<GalleryResponse> {
    Json(gallery_listing(&state).await)
}

/// POST /admin/gallery/upload
pub async fn upload_gallery_image(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<(StatusCode, Json<DataResponse<SavedImage>>)> {
    let uploaded = store_upload(&state.storage.gallery, multipart).await?;
    tracing::info!(
        username = %admin.username,
        filename = %uploaded.filename,
        "Gallery image uploaded",
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(uploaded))))
}

/// POST /admin/gallery/delete
pub async fn delete_gallery_image(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<DeleteImageRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.storage.gallery.delete(&input.filename).await?;
    tracing::info!(
        username = %admin.username,
        filename = %input.filename,
        "Gallery image deleted",
    );
    Ok(Json(MessageResponse::ok("Image deleted")))
}
