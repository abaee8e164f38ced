//! Email Handlers

use axum::{
    extract::State,
    Json,
};

use crate::application::dto::request::{ActivateEmailRequest, IncludeUserQuery};
use crate::application::dto::response::EmailResponse;
use crate::domain::validators::{validate_id, EmailValidator};
use crate::domain::EmailId;
use crate::presentation::http::extractors::{AppJson, AppPath, AppQuery, RequestingUser};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Get the requesting user's email
pub async fn get_requesting_user_email(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppQuery(query): AppQuery<IncludeUserQuery>,
) -> Result<Json<EmailResponse>, AppError> {
    let email = state
        .services
        .emails
        .get_requesting_user_email(&user, query.include_user)
        .await?;
    Ok(Json(email.into()))
}

/// Get an email by id
pub async fn get_email(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppPath(id): AppPath<String>,
    AppQuery(query): AppQuery<IncludeUserQuery>,
) -> Result<Json<EmailResponse>, AppError> {
    let id = validate_id::<EmailId>(&id)?;

    let email = state
        .services
        .emails
        .get_email(&user, id, query.include_user)
        .await?;
    Ok(Json(email.into()))
}

/// Activate an email with the code sent to it
pub async fn activate_email(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppPath(id): AppPath<String>,
    AppJson(body): AppJson<ActivateEmailRequest>,
) -> Result<Json<EmailResponse>, AppError> {
    let id = validate_id::<EmailId>(&id)?;
    let code = EmailValidator::new().validate_activation_code(body.activation_code)?;

    let email = state
        .services
        .emails
        .activate_email(&user, id, code)
        .await?;
    Ok(Json(email.into()))
}

/// Issue and send a fresh activation code
pub async fn resend_activation_code(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
) -> Result<Json<EmailResponse>, AppError> {
    let email = state.services.emails.resend_activation_code(&user).await?;
    Ok(Json(email.into()))
}
