//! Access Token Handlers

use axum::{
    extract::State,
    Json,
};

use crate::application::dto::request::IncludeUserQuery;
use crate::application::dto::response::AccessTokenResponse;
use crate::presentation::http::extractors::{AppPath, AppQuery, RequestingUser};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Look up one of the requesting user's tokens by value
pub async fn get_access_token(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppPath(value): AppPath<String>,
    AppQuery(query): AppQuery<IncludeUserQuery>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let token = state
        .services
        .access_tokens
        .get_access_token_by_value(&user, &value, query.include_user)
        .await?;
    Ok(Json(token.into()))
}
