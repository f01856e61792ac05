//! HTTP-level integration tests for login, logout, the admin guard and
//! password changes.

mod common;

use axum::body::Body;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use common::{
    body_json, get, get_auth, login_as, post_json, post_json_auth, send, TestApp,
    ADMIN_PASSWORD, ADMIN_USERNAME,
};

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_success_returns_token_and_cookie() {
    let app = TestApp::new().await;

    let body = serde_json::json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD });
    let response = post_json(app.app(), "/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("login must set the session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("falls_session="));
    assert!(cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["token"].is_string());
    assert_eq!(json["data"]["username"], "admin");
    assert_eq!(json["data"]["expires_in"], 3600);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;

    for (username, password) in [("admin", "nope"), ("someone", "admin")] {
        let body = serde_json::json!({ "username": username, "password": password });
        let response = post_json(app.app(), "/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "UNAUTHORIZED");
        assert_eq!(json["message"], "Invalid username or password");
    }
}

#[tokio::test]
async fn configured_credentials_replace_defaults() {
    let app = TestApp::with_config(|c| {
        c.admin_username = "keeper".into();
        c.admin_password = "falls-2024".into();
    })
    .await;

    let body = serde_json::json!({ "username": "admin", "password": "admin" });
    let response = post_json(app.app(), "/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    login_as(app.app(), "keeper", "falls-2024").await;
}

#[tokio::test]
async fn session_status_reflects_login() {
    let app = TestApp::new().await;

    let json = body_json(get(app.app(), "/login").await).await;
    assert_eq!(json["data"]["logged_in"], false);

    let token = app.login().await;
    let json = body_json(get_auth(app.app(), "/login", Some(&token)).await).await;
    assert_eq!(json["data"]["logged_in"], true);
    assert_eq!(json["data"]["username"], "admin");
}

// ---------------------------------------------------------------------------
// Guard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_routes_require_a_session() {
    let app = TestApp::new().await;

    for uri in ["/admin", "/admin/home", "/admin/attractions", "/admin/gallery"] {
        let response = get(app.app(), uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["message"], "Login required");
    }

    let response = post_json(
        app.app(),
        "/admin/update",
        serde_json::json!({ "section": "hero", "fields": { "title": "x" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn forged_token_is_rejected() {
    let app = TestApp::new().await;
    let response = get_auth(app.app(), "/admin", Some("not.a.jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_cookie_is_accepted() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/admin/home")
        .header(COOKIE, format!("falls_session={token}"))
        .body(Body::empty())
        .unwrap();
    let response = send(app.app(), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "admin");
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logout_revokes_the_session() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let response = get_auth(app.app(), "/logout", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));

    let response = get_auth(app.app(), "/admin", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_session_succeeds() {
    let app = TestApp::new().await;
    let response = get(app.app(), "/logout").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);
}

// ---------------------------------------------------------------------------
// Password change
// ---------------------------------------------------------------------------

fn reset_body(current: &str, new: &str, confirm: &str) -> serde_json::Value {
    serde_json::json!({
        "current_password": current,
        "new_password": new,
        "confirm_password": confirm,
    })
}

#[tokio::test]
async fn reset_password_rules() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let cases = [
        (reset_body("wrong", "secret", "secret"), "Current password is incorrect"),
        (reset_body("admin", "secret", "secreT"), "Passwords do not match"),
        (
            reset_body("admin", "ab", "ab"),
            "Password must be at least 3 characters long",
        ),
    ];
    for (body, message) in cases {
        let response =
            post_json_auth(app.app(), "/admin/reset-password", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], message);
    }

    // Nothing changed: the old password still works.
    login_as(app.app(), "admin", "admin").await;
}

#[tokio::test]
async fn reset_password_changes_login_and_ends_other_sessions() {
    let app = TestApp::new().await;
    let token = app.login().await;
    let other = app.login().await;

    let response = post_json_auth(
        app.app(),
        "/admin/reset-password",
        reset_body("admin", "waterfall", "waterfall"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The session that changed the password stays; the other one ends.
    assert_eq!(
        get_auth(app.app(), "/admin", Some(&token)).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        get_auth(app.app(), "/admin", Some(&other)).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let old = post_json(
        app.app(),
        "/login",
        serde_json::json!({ "username": "admin", "password": "admin" }),
    )
    .await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);
    login_as(app.app(), "admin", "waterfall").await;
}

#[tokio::test]
async fn changed_password_survives_restart_with_credentials_file() {
    let creds_dir = tempfile::tempdir().unwrap();
    let path = creds_dir.path().join("credentials.json");

    let first = TestApp::with_config(|c| c.credentials_path = Some(path.clone())).await;
    let token = first.login().await;
    let response = post_json_auth(
        first.app(),
        "/admin/reset-password",
        reset_body("admin", "cascade", "cascade"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(path.is_file());

    let second = TestApp::with_config(|c| c.credentials_path = Some(path.clone())).await;
    login_as(second.app(), "admin", "cascade").await;
}
