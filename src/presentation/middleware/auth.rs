//! Authentication Middleware
//!
//! Access token validation for protected routes.
//!
//! The token is read from the configured cookie first and from an
//! `Authorization: Bearer` header otherwise. The resolved user is stored in
//! the request extensions for the `RequestingUser` extractor.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization, HeaderMapExt},
};

use crate::shared::error::{AppError, ErrorName};
use crate::startup::AppState;

/// Authentication middleware that resolves the access token to a user
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = access_token_from(&jar, request.headers(), &state.settings.auth.cookie_name)
        .ok_or_else(|| {
            AppError::unauthorized(ErrorName::AccessTokenMissing, "Access token is missing")
        })?;

    let user = state.services.access_tokens.authenticate(&token).await?;
    tracing::debug!(user_id = %user.id, "Request authenticated");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Cookie wins over the header when both are present.
pub fn access_token_from(jar: &CookieJar, headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = jar.get(cookie_name) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|Authorization(bearer)| bearer.token().to_string())
        .filter(|token| !token.is_empty())
}
