//! Malformed request tests
//!
//! Body, query and path parse failures answer with the standard error body.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{TestApp, TestResponse};

fn assert_invalid(response: &TestResponse, name: &str, field: &str) {
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], 10007);
    assert_eq!(response.body["name"], name);
    assert_eq!(response.body["field"], field);
    assert!(response.body["message"].is_string());
}

#[tokio::test]
async fn test_wrong_field_type_is_request_body_invalid() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;

    let response = app
        .post("/communities", json!({ "name": 5 }), Some(&cookie))
        .await;
    assert_invalid(&response, "REQUEST_BODY_INVALID", "body");
}

#[tokio::test]
async fn test_malformed_json_is_request_body_invalid() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;

    let response = app
        .post_raw("/communities", "application/json", "{not json", Some(&cookie))
        .await;
    assert_invalid(&response, "REQUEST_BODY_INVALID", "body");

    let unauthenticated = app
        .post_raw("/users/sign-up-with-email", "application/json", "{", None)
        .await;
    assert_invalid(&unauthenticated, "REQUEST_BODY_INVALID", "body");
}

#[tokio::test]
async fn test_missing_content_type_is_request_body_invalid() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;

    let response = app
        .post_raw(
            "/communities",
            "text/plain",
            r#"{"name":"backend-developers"}"#,
            Some(&cookie),
        )
        .await;
    assert_invalid(&response, "REQUEST_BODY_INVALID", "body");
}

#[tokio::test]
async fn test_unparsable_query_is_query_invalid() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;

    let response = app.get("/communities?limit=abc", Some(&cookie)).await;
    assert_invalid(&response, "QUERY_INVALID", "query");

    let flag = app.get("/users/me?include_email=maybe", Some(&cookie)).await;
    assert_invalid(&flag, "QUERY_INVALID", "query");
}

#[tokio::test]
async fn test_undecodable_path_is_path_invalid() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;

    let response = app.get("/posts/%FF", Some(&cookie)).await;
    assert_invalid(&response, "PATH_INVALID", "path");
}
