//! Session extractors for Axum handlers.
//!
//! The session token is accepted from an `Authorization: Bearer` header or
//! from the session cookie set at login. Either way it must carry a valid
//! signature, be unexpired and still be registered in
//! [`SessionRegistry`](crate::auth::session::SessionRegistry).

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use falls_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::config::ServerConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "falls_session";

/// A logged-in admin.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub username: String,
    /// Session id (the token's `jti`).
    pub jti: String,
}

/// Requires a live admin session. Rejects with 401 otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     tracing::info!(username = %admin.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AdminSession);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Login required".into())))?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        if !state.sessions.is_active(&claims.jti).await {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Session has ended, please log in again".into(),
            )));
        }

        Ok(RequireAdmin(AdminSession {
            username: claims.sub,
            jti: claims.jti,
        }))
    }
}

/// The admin session if there is a live one. Never rejects.
pub struct MaybeAdmin(pub Option<AdminSession>);

impl FromRequestParts<AppState> for MaybeAdmin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAdmin(
            RequireAdmin::from_request_parts(parts, state)
                .await
                .ok()
                .map(|RequireAdmin(session)| session),
        ))
    }
}

/// Token from the bearer header, falling back to the session cookie.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value carrying a new session token.
pub fn session_cookie(token: &str, config: &ServerConfig) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        config.jwt.expiry_secs()
    );
    if config.secure_cookie {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(config: &ServerConfig) -> String {
    let mut cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if config.secure_cookie {
        cookie.push_str("; Secure");
    }
    cookie
}
