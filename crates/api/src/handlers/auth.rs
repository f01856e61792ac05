//! Handlers for admin login, logout and password changes.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::Json;
use falls_core::error::CoreError;
use falls_store::models::credentials::StoredCredentials;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_session_token;
use crate::auth::password::{hash_password, validate_password_change, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::{
    clear_session_cookie, session_cookie, MaybeAdmin, RequireAdmin,
};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned by a successful login. The same token is also set as a cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Session lifetime in seconds.
    pub expires_in: i64,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub logged_in: bool,
    pub username: Option<String>,
}

/// Request body for `POST /admin/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /login
///
/// Report whether the caller already has a live session.
pub async fn session_status(MaybeAdmin(session): MaybeAdmin) -> Json<DataResponse<SessionStatus>> {
    Json(DataResponse::new(SessionStatus {
        logged_in: session.is_some(),
        username: session.map(|s| s.username),
    }))
}

/// POST /login
///
/// Check the admin username and password and open a session.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let credentials = state.credentials.current().await;

    let password_valid = input.username == credentials.username
        && verify_password(&input.password, &credentials.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::warn!(username = %input.username, "Failed admin login");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let (token, claims) = generate_session_token(&credentials.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    state.sessions.insert(&claims.jti, claims.exp).await;

    tracing::info!(username = %credentials.username, "Admin logged in");

    let cookie = session_cookie(&token, &state.config);
    let body = DataResponse::new(LoginResponse {
        token,
        expires_in: state.config.jwt.expiry_secs(),
        username: credentials.username,
    });
    Ok(([(SET_COOKIE, cookie)], Json(body)))
}

/// GET /logout
///
/// End the current session, if any, and clear the cookie.
pub async fn logout(
    State(state): State<AppState>,
    MaybeAdmin(session): MaybeAdmin,
) -> impl IntoResponse {
    if let Some(session) = session {
        state.sessions.revoke(&session.jti).await;
        tracing::info!(username = %session.username, "Admin logged out");
    }

    (
        [(SET_COOKIE, clear_session_cookie(&state.config))],
        Json(MessageResponse::ok("Logged out")),
    )
}

/// POST /admin/reset-password
///
/// Change the admin password. Other sessions are ended; the caller's stays.
pub async fn reset_password(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let credentials = state.credentials.current().await;

    let current_valid = verify_password(&input.current_password, &credentials.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Validation(
            "Current password is incorrect".into(),
        )));
    }

    validate_password_change(&input.new_password, &input.confirm_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    state
        .credentials
        .replace(StoredCredentials {
            username: credentials.username,
            password_hash,
        })
        .await?;
    state.sessions.revoke_all_except(&admin.jti).await;

    tracing::info!(username = %admin.username, "Admin password changed");

    Ok(Json(MessageResponse::ok("Password changed")))
}
