//! Session routes.
//!
//! ```text
//! GET  /login   -> session_status
//! POST /login   -> login
//! GET  /logout  -> logout
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::session_status).post(auth::login))
        .route("/logout", get(auth::logout))
}
