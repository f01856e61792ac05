//! Routes anyone may call.
//!
//! ```text
//! GET /              -> landing
//! GET /gallery-data  -> gallery_data
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::{images, pages};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::landing))
        .route("/gallery-data", get(images::gallery_data))
}
