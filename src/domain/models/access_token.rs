//! Access token model and repository trait.
//!
//! Tokens are opaque random strings; possession of the value authenticates
//! the owning user. Each token belongs to the session it was issued with and
//! is deleted when that session is revoked.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::User;
use crate::domain::value_objects::{AccessTokenId, SessionId, UserId};
use crate::shared::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken {
    pub id: AccessTokenId,
    pub user_id: UserId,
    pub session_id: SessionId,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    pub user: Option<Box<User>>,
}

impl AccessToken {
    pub fn new(id: AccessTokenId, user_id: UserId, session_id: SessionId, value: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            session_id,
            value,
            created_at: now,
            modified_at: now,
            user: None,
        }
    }

    pub fn pure_copy(&self) -> Self {
        Self {
            user: None,
            ..self.clone()
        }
    }
}

/// Repository trait for AccessToken data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessTokenRepository: Send + Sync {
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<AccessToken>, AppError>;

    async fn get_by_id(
        &self,
        id: AccessTokenId,
        include_user: bool,
    ) -> Result<Option<AccessToken>, AppError>;

    async fn get_by_value(
        &self,
        value: &str,
        include_user: bool,
    ) -> Result<Option<AccessToken>, AppError>;

    async fn create(&self, token: &AccessToken) -> Result<AccessToken, AppError>;

    async fn delete(&self, id: AccessTokenId) -> Result<(), AppError>;

    /// Delete every token issued with the session, returning how many went.
    async fn delete_by_session(&self, session_id: SessionId) -> Result<u64, AppError>;

    async fn exists_by_id(&self, id: AccessTokenId) -> Result<bool, AppError>;

    async fn exists_by_value(&self, value: &str) -> Result<bool, AppError>;
}
