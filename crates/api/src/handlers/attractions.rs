//! Handlers for the `/admin/attractions` resource.
//!
//! JSON listings return the stored `images` list unless `?with_images=true`
//! asks for the files actually present in each folder.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use falls_core::attraction::ENTITY;
use falls_core::error::CoreError;
use falls_core::types::DbId;
use falls_store::models::attraction::{
    Attraction, CreateAttraction, ReorderAttractions, UpdateAttraction,
};
use falls_store::models::image::SavedImage;
use falls_store::repositories::AttractionRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppMultipart, AppPath, AppQuery};
use crate::handlers::upload::read_image_upload;
use crate::middleware::auth::RequireAdmin;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub with_images: bool,
}

/// GET /admin/attractions
pub async fn list_attractions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> Json<DataResponse<Vec<Attraction>>> {
    let attractions = AttractionRepo::list(&state.storage, params.with_images).await;
    Json(DataResponse::new(attractions))
}

/// POST /admin/attractions
pub async fn create_attraction(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateAttraction>,
) -> AppResult<(StatusCode, Json<DataResponse<Attraction>>)> {
    let attraction = AttractionRepo::create(&state.storage, &input).await?;

    tracing::info!(
        username = %admin.username,
        id = attraction.id,
        "Attraction block added",
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(attraction))))
}

/// GET /admin/attractions/{id}
pub async fn get_attraction(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Attraction>>> {
    let attraction = AttractionRepo::find_by_id(&state.storage, id)
        .await
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(DataResponse::new(attraction)))
}

/// PUT /admin/attractions/{id}
pub async fn update_attraction(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateAttraction>,
) -> AppResult<Json<DataResponse<Attraction>>> {
    let attraction = AttractionRepo::update(&state.storage, id, &input).await?;
    Ok(Json(DataResponse::new(attraction)))
}

/// DELETE /admin/attractions/{id}
///
/// Removes the record and its whole image folder.
pub async fn delete_attraction(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    AttractionRepo::delete(&state.storage, id).await?;
    tracing::info!(username = %admin.username, id, "Attraction block removed");
    Ok(Json(MessageResponse::ok("Attraction deleted")))
}

/// POST /admin/attractions/order
///
/// Body: `{ "order": [3, 1, 2] }`. Returns the re-sorted list.
pub async fn reorder_attractions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<ReorderAttractions>,
) -> AppResult<Json<DataResponse<Vec<Attraction>>>> {
    let attractions = AttractionRepo::reorder(&state.storage, &input.order).await?;
    Ok(Json(DataResponse::new(attractions)))
}

/// POST /admin/attractions/{id}/images
pub async fn add_attraction_image(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<(StatusCode, Json<DataResponse<SavedImage>>)> {
    let upload = read_image_upload(multipart).await?;
    let saved = AttractionRepo::add_image(&state.storage, id, &upload).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(saved))))
}

/// DELETE /admin/attractions/{id}/images/{filename}
pub async fn remove_attraction_image(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath((id, filename)): AppPath<(DbId, String)>,
) -> AppResult<Json<MessageResponse>> {
    AttractionRepo::remove_image(&state.storage, id, &filename).await?;
    Ok(Json(MessageResponse::ok("Image deleted")))
}
