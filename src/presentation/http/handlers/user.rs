//! User Handlers
//!
//! Sign-up and login set the access token cookie in addition to returning
//! the token in the body.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::application::dto::request::{
    CreatePasswordRequest, LogInWithEmailRequest, LogInWithUsernameRequest,
    ResetPasswordWithCodeRequest, SendResetPasswordCodeRequest, SignUpWithEmailRequest,
    UpdateUserRequest, UserIncludeQuery,
};
use crate::application::dto::response::{SignedInResponse, UserResponse};
use crate::application::services::SignedInUser;
use crate::config::AuthSettings;
use crate::domain::validators::{EmailValidator, UserValidator};
use crate::domain::{IdOrName, UserId};
use crate::presentation::http::extractors::{AppJson, AppPath, AppQuery, ClientIp, RequestingUser};
use crate::shared::error::{AppError, FieldName};
use crate::startup::AppState;

fn validator() -> UserValidator {
    UserValidator::new(EmailValidator::new())
}

fn access_token_cookie(settings: &AuthSettings, value: String) -> Cookie<'static> {
    Cookie::build((settings.cookie_name.clone(), value))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .secure(settings.secure_cookie)
        .build()
}

fn signed_in(
    state: &AppState,
    jar: CookieJar,
    signed_in: SignedInUser,
) -> (CookieJar, Json<SignedInResponse>) {
    let cookie = access_token_cookie(&state.settings.auth, signed_in.access_token.value.clone());
    (jar.add(cookie), Json(signed_in.into()))
}

/// Register with email, username and password
pub async fn sign_up_with_email(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    jar: CookieJar,
    AppJson(body): AppJson<SignUpWithEmailRequest>,
) -> Result<(StatusCode, CookieJar, Json<SignedInResponse>), AppError> {
    let input = validator().validate_sign_up_with_email(
        body.email_address.as_deref(),
        body.username.as_deref(),
        body.password.as_deref(),
    )?;

    let result = state.services.users.sign_up_with_email(input, ip).await?;
    let (jar, body) = signed_in(&state, jar, result);
    Ok((StatusCode::CREATED, jar, body))
}

/// Log in with email address and password
pub async fn log_in_with_email(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    jar: CookieJar,
    AppJson(body): AppJson<LogInWithEmailRequest>,
) -> Result<(CookieJar, Json<SignedInResponse>), AppError> {
    let input = validator()
        .validate_log_in_with_email(body.email_address.as_deref(), body.password.as_deref())?;

    let result = state.services.users.log_in_with_email(input, ip).await?;
    Ok(signed_in(&state, jar, result))
}

/// Log in with username and password
pub async fn log_in_with_username(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    jar: CookieJar,
    AppJson(body): AppJson<LogInWithUsernameRequest>,
) -> Result<(CookieJar, Json<SignedInResponse>), AppError> {
    let input = validator()
        .validate_log_in_with_username(body.username.as_deref(), body.password.as_deref())?;

    let result = state.services.users.log_in_with_username(input, ip).await?;
    Ok(signed_in(&state, jar, result))
}

/// Email a reset password code
pub async fn send_reset_password_code(
    State(state): State<AppState>,
    AppJson(body): AppJson<SendResetPasswordCodeRequest>,
) -> Result<StatusCode, AppError> {
    let email_address =
        validator().validate_send_reset_password_code(body.email_address.as_deref())?;

    state
        .services
        .users
        .send_reset_password_code(email_address)
        .await?;
    Ok(StatusCode::OK)
}

/// Set a new password using an emailed code
pub async fn reset_password_with_code(
    State(state): State<AppState>,
    AppJson(body): AppJson<ResetPasswordWithCodeRequest>,
) -> Result<StatusCode, AppError> {
    let input = validator().validate_reset_password_with_code(
        body.email_address.as_deref(),
        body.reset_password_code.as_deref(),
        body.new_password.as_deref(),
    )?;

    state.services.users.reset_password_with_code(input).await?;
    Ok(StatusCode::OK)
}

/// Get the requesting user
pub async fn get_requesting_user(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppQuery(query): AppQuery<UserIncludeQuery>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .services
        .users
        .get_requesting_user(&user, query.into())
        .await?;
    Ok(Json(user.into()))
}

/// Update display name, about or avatar
pub async fn update_requesting_user(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppJson(body): AppJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let input = validator().validate_update_user(
        body.display_name.as_deref(),
        body.about.as_deref(),
        body.avatar_url.as_deref(),
    )?;

    let user = state
        .services
        .users
        .update_requesting_user(&user, input)
        .await?;
    Ok(Json(user.into()))
}

/// Set a password on an account that has none
pub async fn create_requesting_user_password(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppJson(body): AppJson<CreatePasswordRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let password = validator().validate_password(body.password.as_deref(), FieldName::Password)?;

    let user = state
        .services
        .users
        .create_requesting_user_password(&user, password)
        .await?;
    Ok(Json(user.into()))
}

/// Delete the requesting user and clear the cookie
pub async fn delete_requesting_user(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar), AppError> {
    state.services.users.delete_requesting_user(&user).await?;

    let removal = Cookie::build(state.settings.auth.cookie_name.clone()).path("/");
    Ok((StatusCode::NO_CONTENT, jar.remove(removal)))
}

/// Get a user by id or username
pub async fn get_user(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppPath(id_or_username): AppPath<String>,
    AppQuery(query): AppQuery<UserIncludeQuery>,
) -> Result<Json<UserResponse>, AppError> {
    let id_or_username = IdOrName::<UserId>::parse(&id_or_username)?;

    let found = state
        .services
        .users
        .get_user(&user, id_or_username, query.into())
        .await?;
    Ok(Json(found.into()))
}
