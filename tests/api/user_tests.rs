//! User, email and session API tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{code_in, TestApp, PASSWORD};

#[tokio::test]
async fn test_sign_up_returns_token_and_sets_cookie() {
    let app = TestApp::new();

    let response = app
        .post(
            "/users/sign-up-with-email",
            json!({ "email_address": "a@b.com", "username": "naruto", "password": PASSWORD }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["user"]["username"], "naruto");
    assert_eq!(response.body["user"]["email"]["address"], "a@b.com");
    assert_eq!(response.body["user"]["state"], "not_verified");
    assert!(response.body["user"].get("password_hash").is_none());

    let token = response.body["access_token"]["value"].as_str().unwrap();
    assert!(!token.is_empty());

    let set_cookie = response.set_cookie.unwrap();
    assert!(set_cookie.starts_with(&format!("access_token={}", token)));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("SameSite=Lax"));

    assert_eq!(app.outbox.sent().len(), 1);
    assert_eq!(app.outbox.sent()[0].to_address, "a@b.com");
}

#[tokio::test]
async fn test_log_in_with_email_cookie_authenticates() {
    let app = TestApp::new();
    app.sign_up("a@b.com", "naruto").await;

    let login = app
        .post(
            "/users/log-in-with-email",
            json!({ "email_address": "a@b.com", "password": PASSWORD }),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    let cookie = login.cookie_pair().unwrap();

    let me = app.get("/users/me", Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["username"], "naruto");

    let versioned = app.get("/v0.1/users/me", Some(&cookie)).await;
    assert_eq!(versioned.status, StatusCode::OK);
    assert_eq!(versioned.body["id"], me.body["id"]);
}

#[tokio::test]
async fn test_bearer_header_authenticates() {
    let app = TestApp::new();
    let signed_up = app
        .post(
            "/users/sign-up-with-email",
            json!({ "email_address": "a@b.com", "username": "naruto", "password": PASSWORD }),
            None,
        )
        .await;
    let token = signed_up.body["access_token"]["value"].as_str().unwrap();

    let request = axum::http::Request::builder()
        .uri("/users/me")
        .header("Authorization", format!("Bearer {}", token))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_log_in_with_username() {
    let app = TestApp::new();
    app.sign_up("a@b.com", "naruto").await;

    let login = app
        .post(
            "/users/log-in-with-username",
            json!({ "username": "naruto", "password": PASSWORD }),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.cookie_pair().is_some());
}

#[tokio::test]
async fn test_wrong_password_fails_authentication() {
    let app = TestApp::new();
    app.sign_up("a@b.com", "naruto").await;

    let login = app
        .post(
            "/users/log-in-with-email",
            json!({ "email_address": "a@b.com", "password": "Wr0ng!pass" }),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
    assert_eq!(login.body["name"], "AUTHENTICATION_FAILED");
    assert!(login.set_cookie.is_none());
}

#[tokio::test]
async fn test_duplicate_username_and_email_conflict() {
    let app = TestApp::new();
    app.sign_up("a@b.com", "naruto").await;

    let same_username = app
        .post(
            "/users/sign-up-with-email",
            json!({ "email_address": "c@d.com", "username": "naruto", "password": PASSWORD }),
            None,
        )
        .await;
    assert_eq!(same_username.status, StatusCode::CONFLICT);
    assert_eq!(same_username.body["name"], "USERNAME_EXISTS");

    let same_email = app
        .post(
            "/users/sign-up-with-email",
            json!({ "email_address": "A@B.com", "username": "sasuke", "password": PASSWORD }),
            None,
        )
        .await;
    assert_eq!(same_email.status, StatusCode::CONFLICT);
    assert_eq!(same_email.body["name"], "EMAIL_ADDRESS_EXISTS");
}

#[tokio::test]
async fn test_sign_up_validation_names_the_field() {
    let app = TestApp::new();

    let missing = app
        .post(
            "/users/sign-up-with-email",
            json!({ "email_address": "a@b.com", "username": "naruto" }),
            None,
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["name"], "FIELD_MISSING");
    assert_eq!(missing.body["field"], "password");

    let weak = app
        .post(
            "/users/sign-up-with-email",
            json!({ "email_address": "a@b.com", "username": "naruto", "password": "password" }),
            None,
        )
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);
    assert_eq!(weak.body["name"], "PASSWORD_INVALID_FORMAT");
}

#[tokio::test]
async fn test_protected_route_requires_valid_token() {
    let app = TestApp::new();

    let anonymous = app.get("/users/me", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.body["name"], "ACCESS_TOKEN_MISSING");

    let bogus = app.get("/users/me", Some("access_token=not-a-real-token")).await;
    assert_eq!(bogus.status, StatusCode::UNAUTHORIZED);
    assert_eq!(bogus.body["name"], "ACCESS_TOKEN_INVALID");
}

#[tokio::test]
async fn test_other_users_private_relations_are_hidden() {
    let app = TestApp::new();
    let naruto = app.sign_up("a@b.com", "naruto").await;
    app.sign_up_fake("sasuke").await;

    let own = app.get("/users/me?include_email=true", Some(&naruto)).await;
    assert_eq!(own.body["email"]["address"], "a@b.com");

    let other = app
        .get("/users/sasuke?include_email=true&include_sessions=true", Some(&naruto))
        .await;
    assert_eq!(other.status, StatusCode::OK);
    assert_eq!(other.body["username"], "sasuke");
    assert!(other.body.get("email").is_none());
    assert!(other.body.get("sessions").is_none());

    let missing = app.get("/users/kakashi", Some(&naruto)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["name"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;

    let updated = app
        .patch(
            "/users/me",
            json!({ "display_name": "Naruto Uzumaki", "about": "Believe it!" }),
            &cookie,
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["display_name"], "Naruto Uzumaki");
    assert_eq!(updated.body["about"], "Believe it!");

    let bad_avatar = app
        .patch("/users/me", json!({ "avatar_url": "ftp://x" }), &cookie)
        .await;
    assert_eq!(bad_avatar.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_avatar.body["field"], "avatar_url");
}

#[tokio::test]
async fn test_create_password_when_one_exists_conflicts() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;

    let response = app
        .post("/users/me/password", json!({ "password": "N3w!pass" }), Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["name"], "PASSWORD_EXISTS");
}

#[tokio::test]
async fn test_email_activation_verifies_user() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;
    let code: i32 = code_in(&app.outbox.last_to("a@b.com").unwrap()).parse().unwrap();

    let email = app.get("/emails/me", Some(&cookie)).await;
    assert_eq!(email.status, StatusCode::OK);
    assert_eq!(email.body["activation_status"], "not_activated");
    assert!(email.body.get("activation_code").is_none());
    let email_id = email.body["id"].as_str().unwrap().to_string();

    let wrong_code = if code == 99999 { 10000 } else { code + 1 };
    let wrong = app
        .post(
            &format!("/emails/{}/activate", email_id),
            json!({ "activation_code": wrong_code }),
            Some(&cookie),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong.body["name"], "ACTIVATION_CODE_INCORRECT");

    let activated = app
        .post(
            &format!("/emails/{}/activate", email_id),
            json!({ "activation_code": code }),
            Some(&cookie),
        )
        .await;
    assert_eq!(activated.status, StatusCode::OK);
    assert_eq!(activated.body["activation_status"], "activated");

    let me = app.get("/users/me", Some(&cookie)).await;
    assert_eq!(me.body["state"], "verified");

    let again = app
        .post(
            &format!("/emails/{}/activate", email_id),
            json!({ "activation_code": code }),
            Some(&cookie),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.body["name"], "EMAIL_ALREADY_ACTIVATED");
}

#[tokio::test]
async fn test_resend_activation_code_sends_again() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;

    let response = app
        .request(
            axum::http::Method::POST,
            "/emails/me/resend-activation-code",
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.outbox.sent().len(), 2);
}

#[tokio::test]
async fn test_reset_password_with_code() {
    let app = TestApp::new();
    app.sign_up("a@b.com", "naruto").await;

    let sent = app
        .post(
            "/users/send-reset-password-code",
            json!({ "email_address": "a@b.com" }),
            None,
        )
        .await;
    assert_eq!(sent.status, StatusCode::OK);
    let code = code_in(&app.outbox.last_to("a@b.com").unwrap());

    let reset = app
        .post(
            "/users/reset-password-with-code",
            json!({
                "email_address": "a@b.com",
                "reset_password_code": code,
                "new_password": "N3w!pass",
            }),
            None,
        )
        .await;
    assert_eq!(reset.status, StatusCode::OK);

    let old = app
        .post(
            "/users/log-in-with-email",
            json!({ "email_address": "a@b.com", "password": PASSWORD }),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = app
        .post(
            "/users/log-in-with-email",
            json!({ "email_address": "a@b.com", "password": "N3w!pass" }),
            None,
        )
        .await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_sessions_list_and_revoke() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;
    let login = app
        .post(
            "/users/log-in-with-email",
            json!({ "email_address": "a@b.com", "password": PASSWORD }),
            None,
        )
        .await;

    let sessions = app.get("/sessions", Some(&cookie)).await;
    assert_eq!(sessions.status, StatusCode::OK);
    let items = sessions.body["items"].as_array().unwrap().clone();
    assert_eq!(items.len(), 2);

    let id = login.body["access_token"]["session_id"].as_str().unwrap();
    assert!(items.iter().any(|s| s["id"] == id));
    let revoked = app
        .request(
            axum::http::Method::POST,
            &format!("/sessions/{}/revoke", id),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(revoked.status, StatusCode::OK);
    assert_eq!(revoked.body["state"], "closed");

    let remaining = app.get("/sessions", Some(&cookie)).await;
    assert_eq!(remaining.body["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_revoked_session_token_stops_authenticating() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;
    let login = app
        .post(
            "/users/log-in-with-email",
            json!({ "email_address": "a@b.com", "password": PASSWORD }),
            None,
        )
        .await;
    let login_cookie = login.cookie_pair().unwrap();
    assert_eq!(app.get("/users/me", Some(&login_cookie)).await.status, StatusCode::OK);

    let id = login.body["access_token"]["session_id"].as_str().unwrap();
    let revoked = app
        .request(
            axum::http::Method::POST,
            &format!("/sessions/{}/revoke", id),
            None,
            Some(&login_cookie),
        )
        .await;
    assert_eq!(revoked.status, StatusCode::OK);

    let after = app.get("/users/me", Some(&login_cookie)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
    assert_eq!(after.body["name"], "ACCESS_TOKEN_INVALID");

    let other = app.get("/users/me", Some(&cookie)).await;
    assert_eq!(other.status, StatusCode::OK);
}

#[tokio::test]
async fn test_access_token_lookup_is_owner_only() {
    let app = TestApp::new();
    let naruto = app.sign_up("a@b.com", "naruto").await;
    let sasuke = app.sign_up_fake("sasuke").await;
    let naruto_token = naruto.trim_start_matches("access_token=");

    let own = app
        .get(&format!("/access-tokens/{}?include_user=true", naruto_token), Some(&naruto))
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["user"]["username"], "naruto");

    let foreign = app
        .get(&format!("/access-tokens/{}", naruto_token), Some(&sasuke))
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_account_invalidates_token() {
    let app = TestApp::new();
    let cookie = app.sign_up("a@b.com", "naruto").await;

    let deleted = app.delete("/users/me", &cookie).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let after = app.get("/users/me", Some(&cookie)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}
