//! Route Configuration
//!
//! Configures all HTTP routes for the API. Every API route is served both
//! under `/v0.1` and unversioned.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, track_metrics};
use crate::startup::AppState;

/// Current API version prefix
pub const API_VERSION_PREFIX: &str = "/v0.1";

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest(API_VERSION_PREFIX, api_routes(state.clone()))
        .merge(api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state))
}

/// Routes that issue credentials (no access token required)
fn public_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/sign-up-with-email",
            post(handlers::user::sign_up_with_email),
        )
        .route(
            "/users/log-in-with-email",
            post(handlers::user::log_in_with_email),
        )
        .route(
            "/users/log-in-with-username",
            post(handlers::user::log_in_with_username),
        )
        .route(
            "/users/send-reset-password-code",
            post(handlers::user::send_reset_password_code),
        )
        .route(
            "/users/reset-password-with-code",
            post(handlers::user::reset_password_with_code),
        )
}

/// Routes that require an access token
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/users", user_routes())
        .nest("/emails", email_routes())
        .nest("/access-tokens", access_token_routes())
        .nest("/sessions", session_routes())
        .nest("/communities", community_routes())
        .nest("/community-memberships", community_membership_routes())
        .nest("/posts", post_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(handlers::user::get_requesting_user)
                .patch(handlers::user::update_requesting_user)
                .delete(handlers::user::delete_requesting_user),
        )
        .route(
            "/me/password",
            post(handlers::user::create_requesting_user_password),
        )
        .route("/{id_or_username}", get(handlers::user::get_user))
}

fn email_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::email::get_requesting_user_email))
        .route(
            "/me/resend-activation-code",
            post(handlers::email::resend_activation_code),
        )
        .route("/{id}", get(handlers::email::get_email))
        .route("/{id}/activate", post(handlers::email::activate_email))
}

fn access_token_routes() -> Router<AppState> {
    Router::new().route("/{value}", get(handlers::access_token::get_access_token))
}

fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::session::list_sessions))
        .route("/{id}/revoke", post(handlers::session::revoke_session))
}

fn community_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::community::list_communities).post(handlers::community::create_community),
        )
        .route(
            "/{id_or_name}",
            get(handlers::community::get_community)
                .patch(handlers::community::update_community)
                .delete(handlers::community::delete_community),
        )
        .route(
            "/{id_or_name}/posts",
            get(handlers::post::list_community_posts).post(handlers::post::create_community_post),
        )
}

fn community_membership_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::community_membership::list_memberships)
                .post(handlers::community_membership::create_membership),
        )
        .route(
            "/{id}",
            get(handlers::community_membership::get_membership)
                .delete(handlers::community_membership::delete_membership),
        )
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::post::list_posts))
        .route(
            "/{id}",
            get(handlers::post::get_post)
                .patch(handlers::post::update_post)
                .delete(handlers::post::delete_post),
        )
        .route("/{id}/votes", post(handlers::post::vote_post))
}
