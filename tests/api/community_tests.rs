//! Community and membership API tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::TestApp;

async fn create_community(app: &TestApp, cookie: &str, name: &str) -> Value {
    let response = app
        .post("/communities", json!({ "name": name }), Some(cookie))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.body
}

fn items(body: &Value) -> Vec<Value> {
    body["items"].as_array().cloned().unwrap_or_default()
}

#[tokio::test]
async fn test_create_and_get_community() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;

    let created = create_community(&app, &cookie, "backend-developers").await;
    assert_eq!(created["name"], "backend-developers");
    assert_eq!(created["creator_username"], "naruto");

    let by_name = app.get("/communities/backend-developers", Some(&cookie)).await;
    assert_eq!(by_name.status, StatusCode::OK);
    assert_eq!(by_name.body["id"], created["id"]);

    let id = created["id"].as_str().unwrap();
    let by_id = app
        .get(&format!("/communities/{}?include_creator=true", id), Some(&cookie))
        .await;
    assert_eq!(by_id.status, StatusCode::OK);
    assert_eq!(by_id.body["creator"]["username"], "naruto");
}

#[tokio::test]
async fn test_duplicate_community_name_conflicts() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;
    create_community(&app, &cookie, "backend-developers").await;

    let duplicate = app
        .post("/communities", json!({ "name": "backend-developers" }), Some(&cookie))
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["name"], "COMMUNITY_NAME_EXISTS");
}

#[tokio::test]
async fn test_invalid_community_name_is_rejected() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;

    let response = app
        .post("/communities", json!({ "name": "Backend Developers" }), Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["name"], "COMMUNITY_NAME_INVALID_FORMAT");

    let missing = app.post("/communities", json!({}), Some(&cookie)).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["name"], "FIELD_MISSING");
}

#[tokio::test]
async fn test_list_communities_filters_by_name() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;
    create_community(&app, &cookie, "backend-developers").await;
    create_community(&app, &cookie, "gardening").await;

    let all = app.get("/communities", Some(&cookie)).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(items(&all.body).len(), 2);

    let filtered = app.get("/communities?name=dev", Some(&cookie)).await;
    let filtered = items(&filtered.body);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["name"], "backend-developers");

    let paged = app.get("/communities?limit=1&offset=1", Some(&cookie)).await;
    let paged = items(&paged.body);
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0]["name"], "gardening");

    let bad_limit = app.get("/communities?limit=0", Some(&cookie)).await;
    assert_eq!(bad_limit.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_creator_is_member_and_cannot_leave() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;
    create_community(&app, &cookie, "backend-developers").await;

    let memberships = app.get("/community-memberships", Some(&cookie)).await;
    let memberships = items(&memberships.body);
    assert_eq!(memberships.len(), 1);
    assert_eq!(memberships[0]["community_name"], "backend-developers");
    assert_eq!(memberships[0]["username"], "naruto");

    let id = memberships[0]["id"].as_str().unwrap();
    let leave = app
        .delete(&format!("/community-memberships/{}", id), &cookie)
        .await;
    assert_eq!(leave.status, StatusCode::FORBIDDEN);
    assert_eq!(leave.body["name"], "CREATOR_CANNOT_LEAVE_COMMUNITY");
}

#[tokio::test]
async fn test_join_and_leave_community() {
    let app = TestApp::new();
    let naruto = app.sign_up("a@b.com", "naruto").await;
    let sasuke = app.sign_up_fake("sasuke").await;
    create_community(&app, &naruto, "backend-developers").await;

    let joined = app
        .post(
            "/community-memberships",
            json!({ "community_id_or_name": "backend-developers" }),
            Some(&sasuke),
        )
        .await;
    assert_eq!(joined.status, StatusCode::CREATED);
    assert_eq!(joined.body["username"], "sasuke");
    let id = joined.body["id"].as_str().unwrap().to_string();

    let again = app
        .post(
            "/community-memberships",
            json!({ "community_id_or_name": "backend-developers" }),
            Some(&sasuke),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.body["name"], "COMMUNITY_MEMBERSHIP_EXISTS");

    let foreign = app
        .get(&format!("/community-memberships/{}", id), Some(&naruto))
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);

    let left = app
        .delete(&format!("/community-memberships/{}", id), &sasuke)
        .await;
    assert_eq!(left.status, StatusCode::NO_CONTENT);

    let gone = app
        .get(&format!("/community-memberships/{}", id), Some(&sasuke))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_join_requires_community() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;

    let missing_field = app
        .post("/community-memberships", json!({}), Some(&cookie))
        .await;
    assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_field.body["name"], "FIELD_MISSING");

    let unknown = app
        .post(
            "/community-memberships",
            json!({ "community_id_or_name": "nowhere" }),
            Some(&cookie),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.body["name"], "COMMUNITY_NOT_FOUND");
}

#[tokio::test]
async fn test_only_creator_can_rename_or_delete() {
    let app = TestApp::new();
    let naruto = app.sign_up("a@b.com", "naruto").await;
    let sasuke = app.sign_up_fake("sasuke").await;
    create_community(&app, &naruto, "backend-developers").await;

    let forbidden = app
        .patch(
            "/communities/backend-developers",
            json!({ "name": "frontend-developers" }),
            &sasuke,
        )
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
    assert_eq!(forbidden.body["name"], "ACCESS_DENIED");

    let renamed = app
        .patch(
            "/communities/backend-developers",
            json!({ "name": "rust-developers" }),
            &naruto,
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["name"], "rust-developers");

    let old = app.get("/communities/backend-developers", Some(&naruto)).await;
    assert_eq!(old.status, StatusCode::NOT_FOUND);

    let memberships = app.get("/community-memberships", Some(&naruto)).await;
    assert_eq!(items(&memberships.body)[0]["community_name"], "rust-developers");

    let not_deleted = app.delete("/communities/rust-developers", &sasuke).await;
    assert_eq!(not_deleted.status, StatusCode::FORBIDDEN);

    let deleted = app.delete("/communities/rust-developers", &naruto).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let after = app.get("/communities/rust-developers", Some(&naruto)).await;
    assert_eq!(after.status, StatusCode::NOT_FOUND);
    let memberships = app.get("/community-memberships", Some(&naruto)).await;
    assert!(items(&memberships.body).is_empty());
}
