#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use falls_api::auth::credentials::build_credential_store;
use falls_api::auth::jwt::JwtConfig;
use falls_api::auth::session::SessionRegistry;
use falls_api::config::ServerConfig;
use falls_api::router::build_app_router;
use falls_api::state::AppState;
use falls_core::upload::MAX_UPLOAD_BYTES;
use falls_store::Storage;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin";

/// Build a test `ServerConfig` rooted at `dir`.
pub fn test_config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5011".to_string()],
        request_timeout_secs: 30,
        static_root: dir.path().join("static"),
        data_dir: dir.path().join("data"),
        max_upload_bytes: MAX_UPLOAD_BYTES,
        admin_username: ADMIN_USERNAME.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        credentials_path: None,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            session_expiry_mins: 60,
        },
        secure_cookie: false,
    }
}

/// A router over a fresh temporary data directory.
///
/// Keep the struct alive for the whole test; dropping it removes the
/// directory.
pub struct TestApp {
    pub dir: TempDir,
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(adjust: impl FnOnce(&mut ServerConfig)) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = test_config(&dir);
        adjust(&mut config);

        let storage = Storage::open(&config.storage_config())
            .await
            .expect("storage should open");
        let credentials = build_credential_store(&config).expect("credential store");

        let state = AppState {
            storage: Arc::new(storage),
            config: Arc::new(config.clone()),
            credentials,
            sessions: Arc::new(SessionRegistry::new()),
        };
        let router = build_app_router(state.clone(), &config);

        Self { dir, state, router }
    }

    /// A clone of the router, ready for one `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn static_path(&self, relative: &str) -> PathBuf {
        self.dir.path().join("static").join(relative)
    }

    /// Log in with the default credentials and return the session token.
    pub async fn login(&self) -> String {
        login_as(self.app(), ADMIN_USERNAME, ADMIN_PASSWORD).await
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

fn with_auth(
    builder: axum::http::request::Builder,
    token: Option<&str>,
) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    get_auth(app, uri, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let request = with_auth(Request::builder().method(Method::GET).uri(uri), token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body, None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    json_request(app, Method::POST, uri, body, Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    json_request(app, Method::PUT, uri, body, Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = with_auth(Request::builder().method(Method::DELETE).uri(uri), Some(token))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let request = with_auth(Request::builder().method(method).uri(uri), token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "falls-test-boundary";

/// A `multipart/form-data` body with one file part.
pub fn multipart_body(field: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// A `multipart/form-data` body with a single text field and no file.
pub fn multipart_text_body(field: &str, value: &str) -> Vec<u8> {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n--{BOUNDARY}--\r\n"
    )
    .into_bytes()
}

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    body: Vec<u8>,
    token: &str,
) -> Response<Body> {
    let request = with_auth(Request::builder().method(Method::POST).uri(uri), Some(token))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Upload one file through a multipart endpoint under the `image` field.
pub async fn upload_image(
    app: Router,
    uri: &str,
    filename: &str,
    bytes: &[u8],
    token: &str,
) -> Response<Body> {
    post_multipart_auth(app, uri, multipart_body("image", filename, bytes), token).await
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log in through the API and return the session token.
pub async fn login_as(app: Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["token"].as_str().unwrap().to_string()
}
