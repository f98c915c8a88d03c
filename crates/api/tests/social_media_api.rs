//! HTTP-level integration tests for social media endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth, register};
use serde_json::json;

async fn create_link(app: &axum::Router, token: &str) -> i64 {
    let body = json!({ "name": "instagram", "url": "https://instagram.com/alice" });
    let response = post_json_auth(app, "/socialmedias", body, token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_create_and_list() {
    let app = common::build_test_app();
    let (user_id, token) = register(&app, "alice").await;
    let id = create_link(&app, &token).await;

    let list = body_json(get_auth(&app, "/socialmedias", &token).await).await;
    let item = &list.as_array().unwrap()[0];
    assert_eq!(item["id"], id);
    assert_eq!(item["name"], "instagram");
    assert_eq!(item["user"]["id"], user_id);
}

#[tokio::test]
async fn test_create_requires_url_shape() {
    let app = common::build_test_app();
    let (_, token) = register(&app, "alice").await;

    let body = json!({ "name": "instagram", "url": "instagram dot com" });
    let response = post_json_auth(&app, "/socialmedias", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json!({ "url": "https://instagram.com/alice" });
    let response = post_json_auth(&app, "/socialmedias", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "invalid name cause is required"
    );
}

#[tokio::test]
async fn test_update_validates_url_when_present() {
    let app = common::build_test_app();
    let (_, token) = register(&app, "alice").await;
    let id = create_link(&app, &token).await;
    let uri = format!("/socialmedias/{id}");

    let response = put_json_auth(&app, &uri, json!({ "url": "nope" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(&app, &uri, json!({ "name": "ig" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "ig");
    assert_eq!(json["url"], "https://instagram.com/alice");
}

#[tokio::test]
async fn test_update_is_idempotent() {
    let app = common::build_test_app();
    let (_, token) = register(&app, "alice").await;
    let id = create_link(&app, &token).await;
    let uri = format!("/socialmedias/{id}");
    let patch = json!({ "name": "mastodon", "url": "https://mastodon.social/@alice" });

    let first = body_json(put_json_auth(&app, &uri, patch.clone(), &token).await).await;
    let second = body_json(put_json_auth(&app, &uri, patch, &token).await).await;
    assert_eq!(first["name"], second["name"]);
    assert_eq!(first["url"], second["url"]);
}

#[tokio::test]
async fn test_only_owner_can_delete() {
    let app = common::build_test_app();
    let (_, alice) = register(&app, "alice").await;
    let (_, bob) = register(&app, "bob").await;
    let id = create_link(&app, &alice).await;
    let uri = format!("/socialmedias/{id}");

    let response = delete_auth(&app, &uri, &bob).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "OWNERSHIP_VIOLATION");

    let response = delete_auth(&app, &uri, &alice).await;
    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(get_auth(&app, "/socialmedias", &alice).await).await;
    assert!(list.as_array().unwrap().is_empty());
}

/// Links owned by a soft-deleted user list with a null owner.
#[tokio::test]
async fn test_soft_deleted_owner_lists_as_null() {
    let app = common::build_test_app();
    let (alice_id, alice) = register(&app, "alice").await;
    let (_, bob) = register(&app, "bob").await;
    create_link(&app, &alice).await;

    let response = delete_auth(&app, &format!("/users/{alice_id}"), &alice).await;
    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(get_auth(&app, "/socialmedias", &bob).await).await;
    assert!(list[0]["user"].is_null());
    assert_eq!(list[0]["user_id"], alice_id);
}
