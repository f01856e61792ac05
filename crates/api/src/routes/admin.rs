//! Admin page, hero image and gallery routes mounted at `/admin`.
//!
//! Every handler here takes [`RequireAdmin`](crate::middleware::auth::RequireAdmin).
//!
//! ```text
//! GET  /                 -> admin_home
//! GET  /home             -> admin_home
//! POST /update           -> update_content
//! POST /upload-image     -> upload_hero_image
//! POST /delete-image     -> delete_hero_image
//! POST /reset-password   -> reset_password
//! GET  /gallery          -> admin_gallery
//! POST /gallery/upload   -> upload_gallery_image
//! POST /gallery/delete   -> delete_gallery_image
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, images, pages};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::admin_home))
        .route("/home", get(pages::admin_home))
        .route("/update", post(pages::update_content))
        .route("/upload-image", post(images::upload_hero_image))
        .route("/delete-image", post(images::delete_hero_image))
        .route("/reset-password", post(auth::reset_password))
        .route("/gallery", get(images::admin_gallery))
        .route("/gallery/upload", post(images::upload_gallery_image))
        .route("/gallery/delete", post(images::delete_gallery_image))
}
