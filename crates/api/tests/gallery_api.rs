//! HTTP-level integration tests for the gallery image collection.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json_auth, upload_image, TestApp};

#[tokio::test]
async fn gallery_data_is_public_and_matches_script_shape() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let json = body_json(get(app.app(), "/gallery-data").await).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["images"], serde_json::json!([]));

    let response = upload_image(
        app.app(),
        "/admin/gallery/upload",
        "forest trail.jpg",
        b"jpeg",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let filename = body_json(response).await["data"]["filename"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(filename.starts_with("forest_trail_"));

    let json = body_json(get(app.app(), "/gallery-data").await).await;
    let image = &json["images"][0];
    assert_eq!(image["filename"], filename.as_str());
    assert_eq!(image["path"], format!("images/gallery/{filename}"));
    assert_eq!(image["alt"], "forest trail");
    assert!(image["modified_at"].is_string());
}

#[tokio::test]
async fn gallery_listing_ignores_non_images() {
    let app = TestApp::new().await;
    let token = app.login().await;

    std::fs::write(app.static_path("images/gallery/b.png"), b"x").unwrap();
    std::fs::write(app.static_path("images/gallery/a.webp"), b"x").unwrap();
    std::fs::write(app.static_path("images/gallery/readme.txt"), b"x").unwrap();

    let json = body_json(get_auth(app.app(), "/admin/gallery", Some(&token)).await).await;
    let names: Vec<_> = json["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["filename"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["a.webp", "b.png"]);
}

#[tokio::test]
async fn gallery_delete() {
    let app = TestApp::new().await;
    let token = app.login().await;
    std::fs::write(app.static_path("images/gallery/a.png"), b"x").unwrap();

    let body = serde_json::json!({ "filename": "a.png" });
    let response = post_json_auth(app.app(), "/admin/gallery/delete", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!app.static_path("images/gallery/a.png").exists());

    // A traversal attempt is reduced to a plain name inside the gallery.
    std::fs::write(app.static_path("images/keep.png"), b"x").unwrap();
    let body = serde_json::json!({ "filename": "../keep.png" });
    let response = post_json_auth(app.app(), "/admin/gallery/delete", body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(app.static_path("images/keep.png").exists());
}

#[tokio::test]
async fn gallery_admin_routes_are_guarded() {
    let app = TestApp::new().await;
    let response = get(app.app(), "/admin/gallery").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
