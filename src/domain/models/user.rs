//! User model and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccessToken, Email, Session};
use crate::domain::value_objects::UserId;
use crate::shared::error::AppError;

/// Account state matching the database VARCHAR constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserState {
    #[default]
    NotVerified,
    Verified,
}

impl UserState {
    /// Convert from database string representation.
    pub fn from_db(s: &str) -> Self {
        match s {
            "verified" => Self::Verified,
            _ => Self::NotVerified,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotVerified => "not_verified",
            Self::Verified => "verified",
        }
    }
}

/// Which relations to load alongside a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserInclude {
    pub email: bool,
    pub sessions: bool,
    pub access_tokens: bool,
}

impl UserInclude {
    pub const NONE: Self = Self {
        email: false,
        sessions: false,
        access_tokens: false,
    };

    pub fn email() -> Self {
        Self {
            email: true,
            ..Self::NONE
        }
    }
}

/// A Fireplace account.
///
/// Maps to the `users` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - username: VARCHAR(30) NOT NULL UNIQUE
/// - display_name, about, avatar_url: NULL
/// - state: VARCHAR(20) NOT NULL
/// - password_hash: VARCHAR(255) NULL (accounts may exist without one)
/// - reset_password_code: VARCHAR(10) NULL
/// - created_at / modified_at: TIMESTAMPTZ
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub display_name: Option<String>,
    pub about: Option<String>,
    pub avatar_url: Option<String>,
    pub state: UserState,
    pub password_hash: Option<String>,
    pub reset_password_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    pub email: Option<Box<Email>>,
    pub sessions: Option<Vec<Session>>,
    pub access_tokens: Option<Vec<AccessToken>>,
}

impl User {
    pub fn new(id: UserId, username: String, password_hash: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            display_name: None,
            about: None,
            avatar_url: None,
            state: UserState::NotVerified,
            password_hash,
            reset_password_code: None,
            created_at: now,
            modified_at: now,
            email: None,
            sessions: None,
            access_tokens: None,
        }
    }

    /// Copy without related models.
    pub fn pure_copy(&self) -> Self {
        Self {
            email: None,
            sessions: None,
            access_tokens: None,
            ..self.clone()
        }
    }

    /// Get the user's display name, falling back to username if not set.
    pub fn display_name_or_username(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Repository trait for User data access operations.
///
/// The trait is defined in the domain layer to maintain dependency inversion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self, include: UserInclude) -> Result<Vec<User>, AppError>;

    async fn get_by_id(&self, id: UserId, include: UserInclude) -> Result<Option<User>, AppError>;

    async fn get_by_username(
        &self,
        username: &str,
        include: UserInclude,
    ) -> Result<Option<User>, AppError>;

    async fn create(&self, user: &User) -> Result<User, AppError>;

    async fn update(&self, user: &User) -> Result<User, AppError>;

    async fn delete(&self, id: UserId) -> Result<(), AppError>;

    async fn exists_by_id(&self, id: UserId) -> Result<bool, AppError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError>;
}
