//! Application Error Types
//!
//! Centralized error handling with Axum integration.
//!
//! Every client-facing error carries a machine-readable [`ErrorName`]; the
//! validation variant additionally names the offending [`FieldName`].

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Machine-readable error names rendered in the `name` field of error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorName {
    // Validation
    FieldMissing,
    RequestBodyInvalid,
    QueryInvalid,
    PathInvalid,
    IdInvalidFormat,
    UsernameInvalidFormat,
    PasswordInvalidFormat,
    EmailAddressInvalidFormat,
    CommunityNameInvalidFormat,
    PostContentInvalidFormat,
    ResetPasswordCodeInvalidFormat,
    ActivationCodeInvalidFormat,
    DisplayNameInvalidFormat,
    AboutInvalidFormat,
    AvatarUrlInvalidFormat,
    PaginationInvalid,
    ResetPasswordCodeIncorrect,
    ActivationCodeIncorrect,

    // Not found
    UserNotFound,
    EmailNotFound,
    SessionNotFound,
    AccessTokenNotFound,
    CommunityNotFound,
    CommunityMembershipNotFound,
    PostNotFound,
    GlobalNotFound,

    // Conflict
    UsernameExists,
    EmailAddressExists,
    CommunityNameExists,
    CommunityMembershipExists,
    AccessTokenExists,
    GlobalExists,
    PasswordExists,
    EmailAlreadyActivated,

    // Authentication / authorization
    AuthenticationFailed,
    AccessTokenMissing,
    AccessTokenInvalid,
    AccessDenied,
    NotCommunityMember,
    CreatorCannotLeaveCommunity,

    InternalServer,
}

/// Request fields that a validation error can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Body,
    Query,
    Path,
    Id,
    EmailAddress,
    Username,
    Password,
    NewPassword,
    ResetPasswordCode,
    ActivationCode,
    CommunityName,
    PostContent,
    AccessTokenValue,
    DisplayName,
    About,
    AvatarUrl,
    Limit,
    Offset,
}

impl FieldName {
    /// Wire name of the field (snake_case).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Query => "query",
            Self::Path => "path",
            Self::Id => "id",
            Self::EmailAddress => "email_address",
            Self::Username => "username",
            Self::Password => "password",
            Self::NewPassword => "new_password",
            Self::ResetPasswordCode => "reset_password_code",
            Self::ActivationCode => "activation_code",
            Self::CommunityName => "community_name",
            Self::PostContent => "post_content",
            Self::AccessTokenValue => "access_token_value",
            Self::DisplayName => "display_name",
            Self::About => "about",
            Self::AvatarUrl => "avatar_url",
            Self::Limit => "limit",
            Self::Offset => "offset",
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error on {field}: {message}")]
    Validation {
        name: ErrorName,
        field: FieldName,
        message: String,
    },

    #[error("Not found: {message}")]
    NotFound { name: ErrorName, message: String },

    #[error("Conflict: {message}")]
    Conflict { name: ErrorName, message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { name: ErrorName, message: String },

    #[error("Forbidden: {message}")]
    Forbidden { name: ErrorName, message: String },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn validation(name: ErrorName, field: FieldName, message: impl Into<String>) -> Self {
        Self::Validation {
            name,
            field,
            message: message.into(),
        }
    }

    pub fn not_found(name: ErrorName, message: impl Into<String>) -> Self {
        Self::NotFound {
            name,
            message: message.into(),
        }
    }

    pub fn conflict(name: ErrorName, message: impl Into<String>) -> Self {
        Self::Conflict {
            name,
            message: message.into(),
        }
    }

    pub fn unauthorized(name: ErrorName, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            name,
            message: message.into(),
        }
    }

    pub fn forbidden(name: ErrorName, message: impl Into<String>) -> Self {
        Self::Forbidden {
            name,
            message: message.into(),
        }
    }

    /// Machine-readable name of this error.
    pub fn name(&self) -> ErrorName {
        match self {
            Self::Validation { name, .. }
            | Self::NotFound { name, .. }
            | Self::Conflict { name, .. }
            | Self::Unauthorized { name, .. }
            | Self::Forbidden { name, .. } => *name,
            Self::Internal(_) | Self::Database(_) => ErrorName::InternalServer,
        }
    }

    /// True for errors the client caused and can fix.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_) | Self::Database(_))
    }
}

// Extractor failures keep the error body shape of every other client error.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(
            ErrorName::RequestBodyInvalid,
            FieldName::Body,
            rejection.body_text(),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(ErrorName::QueryInvalid, FieldName::Query, rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(ErrorName::PathInvalid, FieldName::Path, rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub name: ErrorName,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldName>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let name = self.name();
        let (status, code, message, field) = match self {
            AppError::Validation { field, message, .. } => {
                (StatusCode::BAD_REQUEST, 10007, message, Some(field))
            }
            AppError::NotFound { message, .. } => (StatusCode::NOT_FOUND, 10001, message, None),
            AppError::Unauthorized { message, .. } => {
                (StatusCode::UNAUTHORIZED, 10003, message, None)
            }
            AppError::Forbidden { message, .. } => (StatusCode::FORBIDDEN, 10004, message, None),
            AppError::Conflict { message, .. } => (StatusCode::CONFLICT, 10005, message, None),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    10000,
                    "Internal server error".into(),
                    None,
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    10000,
                    "Internal server error".into(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            code,
            name,
            message,
            field,
        };

        (status, Json(body)).into_response()
    }
}
