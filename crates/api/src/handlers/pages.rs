//! Handlers for the landing page payload and page text editing.

use axum::extract::State;
use axum::Json;
use falls_core::page_content::{PageContent, UpdateSection};
use falls_store::models::attraction::Attraction;
use falls_store::models::image::StoredImage;
use falls_store::repositories::{AttractionRepo, PageContentRepo};
use falls_store::{Storage, ATTRACTIONS_PREFIX};
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// An attraction together with the public paths of its images.
#[derive(Debug, Serialize)]
pub struct AttractionView {
    #[serde(flatten)]
    pub attraction: Attraction,
    pub image_paths: Vec<String>,
}

impl From<Attraction> for AttractionView {
    fn from(attraction: Attraction) -> Self {
        let folder = attraction.image_folder();
        let image_paths = attraction
            .images
            .iter()
            .map(|name| format!("{ATTRACTIONS_PREFIX}/{folder}/{name}"))
            .collect();
        Self {
            attraction,
            image_paths,
        }
    }
}

/// Everything the landing page renders.
#[derive(Debug, Serialize)]
pub struct PagePayload {
    pub content: PageContent,
    pub hero_images: Vec<StoredImage>,
    pub attractions: Vec<AttractionView>,
}

/// The landing payload plus who is looking at it.
#[derive(Debug, Serialize)]
pub struct AdminPagePayload {
    pub username: String,
    #[serde(flatten)]
    pub page: PagePayload,
}

/// Attractions carry the images found on disk, not the stored list.
async fn page_payload(storage: &Storage) -> PagePayload {
    PagePayload {
        content: PageContentRepo::get(storage).await,
        hero_images: storage.hero.list_detailed().await,
        attractions: AttractionRepo::list(storage, true)
            .await
            .into_iter()
            .map(AttractionView::from)
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
pub async fn landing(State(state): State<AppState>) -> Json<DataResponse<PagePayload>> {
    Json(DataResponse::new(page_payload(&state.storage).await))
}

/// GET /admin, GET /admin/home
pub async fn admin_home(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Json<DataResponse<AdminPagePayload>> {
    Json(DataResponse::new(AdminPagePayload {
        username: admin.username,
        page: page_payload(&state.storage).await,
    }))
}

/// POST /admin/update
///
/// Merge `{ section, fields }` into the page text and return the whole document.
pub async fn update_content(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateSection>,
) -> AppResult<Json<DataResponse<PageContent>>> {
    let section = input.section.clone();
    let content = PageContentRepo::update_section(&state.storage, input).await?;

    tracing::info!(username = %admin.username, section = %section, "Page text edited");

    Ok(Json(DataResponse::new(content)))
}
