//! Integration tests for the token endpoint and the admin key-management API.
//!
//! Each test drives the full router in-process via `oneshot`, so the
//! middleware chain, the handlers, and the SQLite repositories are all
//! exercised together.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{TestApp, body_json};
use llamagate_core::auth::API_KEY_PREFIX;
use serde_json::json;
use tower::ServiceExt;

fn form_request(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("request")
}

fn json_request(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn bare_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn token_endpoint_issues_bearer_for_valid_credentials() {
    let app = TestApp::spawn().await;
    app.seed_user("admin", "secret").await;

    let response = app
        .router
        .clone()
        .oneshot(form_request(
            "/admin/token",
            "username=admin&password=secret".to_string(),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    let token = body["access_token"].as_str().expect("access_token");
    assert!(!token.is_empty());

    // The minted token opens the guarded part of the admin API.
    let response = app
        .router
        .clone()
        .oneshot(bare_request("GET", "/admin/api-keys", token))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn token_endpoint_rejects_bad_credentials() {
    let app = TestApp::spawn().await;
    app.seed_user("admin", "secret").await;

    // Wrong password and unknown username fail identically.
    for body in [
        "username=admin&password=wrong".to_string(),
        "username=nobody&password=secret".to_string(),
    ] {
        let response = app
            .router
            .clone()
            .oneshot(form_request("/admin/token", body))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );
        let body = body_json(response).await;
        assert_eq!(body["error"], "Incorrect username or password");
        assert_eq!(body["status"], 401);
    }
}

#[tokio::test]
async fn admin_routes_require_a_valid_token() {
    let app = TestApp::spawn().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/api-keys")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Not authenticated");

    let response = app
        .router
        .clone()
        .oneshot(bare_request("GET", "/admin/api-keys", "not-a-jwt"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Could not validate credentials");
}

#[tokio::test]
async fn create_user_returns_row_without_hash_and_rejects_duplicates() {
    let app = TestApp::spawn().await;
    app.seed_user("admin", "secret").await;
    let token = app.user_token("admin");

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/admin/users",
            &token,
            json!({"username": "carol", "password": "pw"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "carol");
    assert!(body.get("hashed_password").is_none());

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/admin/users",
            &token,
            json!({"username": "carol", "password": "other"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Username already registered");
}

#[tokio::test]
async fn key_lifecycle_create_toggle_delete() {
    let app = TestApp::spawn().await;
    app.seed_user("admin", "secret").await;
    let token = app.user_token("admin");

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/admin/api-keys",
            &token,
            json!({"key_name": "ci"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["key_name"], "ci");
    assert!(
        created["api_key"]
            .as_str()
            .expect("api_key")
            .starts_with(API_KEY_PREFIX)
    );
    let id = created["id"].as_i64().expect("id");

    // Deactivate through the query-parameter form the admin API uses.
    let response = app
        .router
        .clone()
        .oneshot(bare_request(
            "PUT",
            &format!("/admin/api-keys/{id}?is_active=false"),
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "API key updated successfully");

    let response = app
        .router
        .clone()
        .oneshot(bare_request("GET", "/admin/api-keys", &token))
        .await
        .expect("response");
    let listed = body_json(response).await;
    assert_eq!(listed[0]["id"], id);
    assert_eq!(listed[0]["is_active"], false);

    let response = app
        .router
        .clone()
        .oneshot(bare_request(
            "DELETE",
            &format!("/admin/api-keys/{id}"),
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "API key deleted successfully");

    // The row is gone, so another toggle answers 404.
    let response = app
        .router
        .clone()
        .oneshot(bare_request(
            "PUT",
            &format!("/admin/api-keys/{id}?is_active=true"),
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "API key not found");
}

#[tokio::test]
async fn key_mutations_answer_404_for_unknown_ids() {
    let app = TestApp::spawn().await;
    app.seed_user("admin", "secret").await;
    let token = app.user_token("admin");

    for request in [
        bare_request("PUT", "/admin/api-keys/999?is_active=true", &token),
        bare_request("DELETE", "/admin/api-keys/999", &token),
        bare_request("POST", "/admin/api-keys/999/token", &token),
    ] {
        let response = app.router.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "API key not found");
    }
}

#[tokio::test]
async fn key_listing_honors_skip_and_limit() {
    let app = TestApp::spawn().await;
    app.seed_user("admin", "secret").await;
    let token = app.user_token("admin");
    app.seed_key("first").await;
    app.seed_key("second").await;
    app.seed_key("third").await;

    let response = app
        .router
        .clone()
        .oneshot(bare_request("GET", "/admin/api-keys", &token))
        .await
        .expect("response");
    let all = body_json(response).await;
    assert_eq!(all.as_array().expect("array").len(), 3);

    let response = app
        .router
        .clone()
        .oneshot(bare_request("GET", "/admin/api-keys?skip=1&limit=1", &token))
        .await
        .expect("response");
    let page = body_json(response).await;
    let page = page.as_array().expect("array");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["key_name"], "second");
}

#[tokio::test]
async fn key_token_endpoint_mints_a_working_credential() {
    let app = TestApp::spawn().await;
    app.seed_user("admin", "secret").await;
    let token = app.user_token("admin");
    let key = app.seed_key("automation").await;

    let response = app
        .router
        .clone()
        .oneshot(bare_request(
            "POST",
            &format!("/admin/api-keys/{}/token", key.id),
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    let key_token = body["access_token"].as_str().expect("access_token");

    // The scoped token is accepted on the proxied surface.
    let response = app
        .router
        .clone()
        .oneshot(bare_request("GET", "/api/tags", key_token))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}
