//! Session Handlers

use axum::{
    extract::State,
    Json,
};

use crate::application::dto::response::{ListResponse, SessionResponse};
use crate::domain::validators::validate_id;
use crate::domain::SessionId;
use crate::presentation::http::extractors::{AppPath, RequestingUser};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List the requesting user's open sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
) -> Result<Json<ListResponse<SessionResponse>>, AppError> {
    let sessions = state.services.sessions.list_sessions(&user).await?;
    Ok(Json(sessions.into()))
}

/// Close one of the requesting user's sessions
pub async fn revoke_session(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppPath(id): AppPath<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let id = validate_id::<SessionId>(&id)?;

    let session = state.services.sessions.revoke_session(&user, id).await?;
    Ok(Json(session.into()))
}
