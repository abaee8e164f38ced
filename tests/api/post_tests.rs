//! Post API tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::TestApp;

/// naruto creates `backend-developers`, sasuke stays outside it.
async fn community_with_outsider(app: &TestApp) -> (String, String) {
    let naruto = app.sign_up("a@b.com", "naruto").await;
    let sasuke = app.sign_up_fake("sasuke").await;
    let created = app
        .post(
            "/communities",
            json!({ "name": "backend-developers" }),
            Some(&naruto),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    (naruto, sasuke)
}

async fn create_post(app: &TestApp, cookie: &str, content: &str) -> Value {
    let response = app
        .post(
            "/communities/backend-developers/posts",
            json!({ "content": content }),
            Some(cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.body
}

fn items(body: &Value) -> Vec<Value> {
    body["items"].as_array().cloned().unwrap_or_default()
}

#[tokio::test]
async fn test_non_member_cannot_post() {
    let app = TestApp::new();
    let (_naruto, sasuke) = community_with_outsider(&app).await;

    let response = app
        .post(
            "/communities/backend-developers/posts",
            json!({ "content": "Hello" }),
            Some(&sasuke),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["name"], "NOT_COMMUNITY_MEMBER");
}

#[tokio::test]
async fn test_member_creates_post() {
    let app = TestApp::new();
    let (naruto, _sasuke) = community_with_outsider(&app).await;

    let post = create_post(&app, &naruto, "  Believe it!  ").await;
    assert_eq!(post["content"], "Believe it!");
    assert_eq!(post["vote"], 0);
    assert_eq!(post["author_username"], "naruto");
    assert_eq!(post["community_name"], "backend-developers");

    let id = post["id"].as_str().unwrap();
    let fetched = app
        .get(
            &format!("/posts/{}?include_author=true&include_community=true", id),
            Some(&naruto),
        )
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["author"]["username"], "naruto");
    assert_eq!(fetched.body["community"]["name"], "backend-developers");
}

#[tokio::test]
async fn test_empty_post_content_is_rejected() {
    let app = TestApp::new();
    let (naruto, _sasuke) = community_with_outsider(&app).await;

    let blank = app
        .post(
            "/communities/backend-developers/posts",
            json!({ "content": "   " }),
            Some(&naruto),
        )
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.body["name"], "POST_CONTENT_INVALID_FORMAT");

    let missing = app
        .post("/communities/backend-developers/posts", json!({}), Some(&naruto))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["name"], "FIELD_MISSING");
}

#[tokio::test]
async fn test_list_posts_newest_first_with_filters() {
    let app = TestApp::new();
    let (naruto, sasuke) = community_with_outsider(&app).await;
    app.post(
        "/community-memberships",
        json!({ "community_id_or_name": "backend-developers" }),
        Some(&sasuke),
    )
    .await;

    create_post(&app, &naruto, "First post about Rust").await;
    create_post(&app, &sasuke, "Second post about Go").await;
    let third = create_post(&app, &naruto, "Third post about rust macros").await;

    let community_posts = app
        .get("/communities/backend-developers/posts", Some(&naruto))
        .await;
    assert_eq!(community_posts.status, StatusCode::OK);
    let listed = items(&community_posts.body);
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0]["id"], third["id"]);

    let rust = app.get("/posts?search=RUST", Some(&naruto)).await;
    assert_eq!(items(&rust.body).len(), 2);

    let author_id = third["author_id"].as_str().unwrap();
    let by_author = app
        .get(&format!("/posts?author={}", author_id), Some(&naruto))
        .await;
    assert_eq!(items(&by_author.body).len(), 2);

    let paged = app.get("/posts?limit=1&offset=2", Some(&naruto)).await;
    let paged = items(&paged.body);
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0]["content"], "First post about Rust");

    let unknown = app
        .get("/communities/nowhere/posts", Some(&naruto))
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_votes_move_counter() {
    let app = TestApp::new();
    let (naruto, sasuke) = community_with_outsider(&app).await;
    let post = create_post(&app, &naruto, "Vote for me").await;
    let votes = format!("/posts/{}/votes", post["id"].as_str().unwrap());

    let up = app.post(&votes, json!({ "is_up": true }), Some(&sasuke)).await;
    assert_eq!(up.status, StatusCode::OK);
    assert_eq!(up.body["vote"], 1);

    let up_default = app.post(&votes, json!({}), Some(&naruto)).await;
    assert_eq!(up_default.body["vote"], 2);

    let down = app.post(&votes, json!({ "is_up": false }), Some(&sasuke)).await;
    assert_eq!(down.body["vote"], 1);
}

#[tokio::test]
async fn test_only_author_edits_and_deletes() {
    let app = TestApp::new();
    let (naruto, sasuke) = community_with_outsider(&app).await;
    let post = create_post(&app, &naruto, "Original").await;
    let path = format!("/posts/{}", post["id"].as_str().unwrap());

    let foreign_edit = app
        .patch(&path, json!({ "content": "Hijacked" }), &sasuke)
        .await;
    assert_eq!(foreign_edit.status, StatusCode::FORBIDDEN);
    assert_eq!(foreign_edit.body["name"], "ACCESS_DENIED");

    let edited = app
        .patch(&path, json!({ "content": "Edited" }), &naruto)
        .await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["content"], "Edited");

    let foreign_delete = app.delete(&path, &sasuke).await;
    assert_eq!(foreign_delete.status, StatusCode::FORBIDDEN);

    let deleted = app.delete(&path, &naruto).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app.get(&path, Some(&naruto)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["name"], "POST_NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_post_id_is_rejected() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;

    let response = app.get("/posts/not-a-number", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["name"], "ID_INVALID_FORMAT");
}
