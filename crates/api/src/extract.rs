//! Request extractors that reject with [`AppError`].
//!
//! axum's own extractors answer a malformed body, path or query with a
//! plain-text response. These wrappers route the rejection through
//! `AppError` so the caller gets the usual `{ "success": false, ... }` body.

use axum::extract::{FromRequest, FromRequestParts, Multipart, Request};

use crate::error::AppError;

/// [`axum::Json`] with JSON error responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// [`axum::extract::Path`] with JSON error responses.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// [`axum::extract::Query`] with JSON error responses.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// [`Multipart`] with JSON error responses.
pub struct AppMultipart(pub Multipart);

impl<S> FromRequest<S> for AppMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Multipart::from_request(req, state)
            .await
            .map(Self)
            .map_err(AppError::from)
    }
}
