pub mod admin;
pub mod attractions;
pub mod auth;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                        landing payload (public)
/// /gallery-data                            gallery listing (public)
///
/// /login                                   session status, login (public)
/// /logout                                  logout (public)
///
/// /admin, /admin/home                      admin payload
/// /admin/update                            merge page text
/// /admin/upload-image, /admin/delete-image hero images
/// /admin/reset-password                    change admin password
/// /admin/gallery                           gallery list
/// /admin/gallery/upload, /delete           gallery images
///
/// /admin/attractions                       list, create
/// /admin/attractions/order                 reorder
/// /admin/attractions/{id}                  get, update, delete
/// /admin/attractions/{id}/images           add image
/// /admin/attractions/{id}/images/{name}    remove image
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(public::router())
        .merge(auth::router())
        .nest("/admin/attractions", attractions::router())
        .nest("/admin", admin::router())
}
