//! Access Token Service
//!
//! Issues opaque bearer tokens and resolves them back to their owner.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    AccessToken, AccessTokenId, AccessTokenRepository, SessionId, User, UserId, UserInclude,
    UserRepository,
};
use crate::shared::error::{AppError, ErrorName};
use crate::shared::random;
use crate::shared::snowflake::SnowflakeGenerator;

/// Access token service trait
#[async_trait]
pub trait AccessTokenService: Send + Sync {
    /// Look up a token owned by the requesting user.
    async fn get_access_token_by_value(
        &self,
        requesting_user: &User,
        value: &str,
        include_user: bool,
    ) -> Result<AccessToken, AppError>;

    /// Resolve a presented token to its user.
    async fn authenticate(&self, value: &str) -> Result<User, AppError>;

    /// Issue a token tied to `session_id`; revoking the session deletes it.
    async fn create_access_token(
        &self,
        user_id: UserId,
        session_id: SessionId,
    ) -> Result<AccessToken, AppError>;
}

/// AccessTokenService implementation
pub struct AccessTokenServiceImpl {
    access_token_repo: Arc<dyn AccessTokenRepository>,
    user_repo: Arc<dyn UserRepository>,
    id_generator: Arc<SnowflakeGenerator>,
    token_length: usize,
}

impl AccessTokenServiceImpl {
    pub fn new(
        access_token_repo: Arc<dyn AccessTokenRepository>,
        user_repo: Arc<dyn UserRepository>,
        id_generator: Arc<SnowflakeGenerator>,
        token_length: usize,
    ) -> Self {
        Self {
            access_token_repo,
            user_repo,
            id_generator,
            token_length,
        }
    }

    fn invalid() -> AppError {
        AppError::unauthorized(ErrorName::AccessTokenInvalid, "Access token is invalid")
    }
}

#[async_trait]
impl AccessTokenService for AccessTokenServiceImpl {
    async fn get_access_token_by_value(
        &self,
        requesting_user: &User,
        value: &str,
        include_user: bool,
    ) -> Result<AccessToken, AppError> {
        let token = self
            .access_token_repo
            .get_by_value(value, include_user)
            .await?
            .ok_or_else(|| {
                AppError::not_found(ErrorName::AccessTokenNotFound, "Access token not found")
            })?;

        if token.user_id != requesting_user.id {
            return Err(AppError::forbidden(
                ErrorName::AccessDenied,
                "Access token belongs to another user",
            ));
        }
        Ok(token)
    }

    async fn authenticate(&self, value: &str) -> Result<User, AppError> {
        let token = self
            .access_token_repo
            .get_by_value(value, false)
            .await?
            .ok_or_else(Self::invalid)?;

        self.user_repo
            .get_by_id(token.user_id, UserInclude::NONE)
            .await?
            .ok_or_else(Self::invalid)
    }

    async fn create_access_token(
        &self,
        user_id: UserId,
        session_id: SessionId,
    ) -> Result<AccessToken, AppError> {
        let token = AccessToken::new(
            AccessTokenId::new(self.id_generator.generate()),
            user_id,
            session_id,
            random::alphanumeric(self.token_length),
        );
        let created = self.access_token_repo.create(&token).await?;

        tracing::debug!(user_id = %user_id, token_id = %created.id, "Access token issued");
        Ok(created)
    }
}
