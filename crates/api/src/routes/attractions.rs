//! Attraction routes mounted at `/admin/attractions`.
//!
//! ```text
//! GET    /                          -> list_attractions (?with_images=true)
//! POST   /                          -> create_attraction
//! POST   /order                     -> reorder_attractions
//! GET    /{id}                      -> get_attraction
//! PUT    /{id}                      -> update_attraction
//! DELETE /{id}                      -> delete_attraction
//! POST   /{id}/images               -> add_attraction_image
//! DELETE /{id}/images/{filename}    -> remove_attraction_image
//! ```

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::attractions;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(attractions::list_attractions).post(attractions::create_attraction),
        )
        .route("/order", post(attractions::reorder_attractions))
        .route(
            "/{id}",
            get(attractions::get_attraction)
                .put(attractions::update_attraction)
                .delete(attractions::delete_attraction),
        )
        .route("/{id}/images", post(attractions::add_attraction_image))
        .route(
            "/{id}/images/{filename}",
            delete(attractions::remove_attraction_image),
        )
}
