//! Session Service
//!
//! One session is opened per sign-up or login and records the client IP.
//! Revoking a session deletes the access tokens issued with it, so the
//! client holding them is signed out.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    AccessTokenRepository, Session, SessionId, SessionRepository, SessionState, User, UserId,
};
use crate::shared::error::{AppError, ErrorName};
use crate::shared::snowflake::SnowflakeGenerator;

/// Session service trait
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Open sessions of the requesting user, newest first.
    async fn list_sessions(&self, requesting_user: &User) -> Result<Vec<Session>, AppError>;

    async fn revoke_session(
        &self,
        requesting_user: &User,
        id: SessionId,
    ) -> Result<Session, AppError>;

    async fn create_session(
        &self,
        user_id: UserId,
        ip_address: Option<String>,
    ) -> Result<Session, AppError>;
}

/// SessionService implementation
pub struct SessionServiceImpl {
    session_repo: Arc<dyn SessionRepository>,
    access_token_repo: Arc<dyn AccessTokenRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl SessionServiceImpl {
    pub fn new(
        session_repo: Arc<dyn SessionRepository>,
        access_token_repo: Arc<dyn AccessTokenRepository>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            session_repo,
            access_token_repo,
            id_generator,
        }
    }
}

#[async_trait]
impl SessionService for SessionServiceImpl {
    async fn list_sessions(&self, requesting_user: &User) -> Result<Vec<Session>, AppError> {
        let sessions = self
            .session_repo
            .list_by_user(requesting_user.id, false)
            .await?;
        Ok(sessions.into_iter().filter(Session::is_open).collect())
    }

    async fn revoke_session(
        &self,
        requesting_user: &User,
        id: SessionId,
    ) -> Result<Session, AppError> {
        let mut session = self
            .session_repo
            .get_by_id(id, false)
            .await?
            .filter(|s| s.user_id == requesting_user.id)
            .ok_or_else(|| {
                AppError::not_found(ErrorName::SessionNotFound, format!("Session {} not found", id))
            })?;

        // Tokens go first; a failure here leaves the session open for a retry.
        let deleted = self.access_token_repo.delete_by_session(id).await?;
        if !session.is_open() {
            return Ok(session);
        }
        session.state = SessionState::Closed;
        let session = self.session_repo.update(&session).await?;

        tracing::info!(
            user_id = %requesting_user.id,
            session_id = %id,
            tokens_deleted = deleted,
            "Session revoked"
        );
        Ok(session)
    }

    async fn create_session(
        &self,
        user_id: UserId,
        ip_address: Option<String>,
    ) -> Result<Session, AppError> {
        let session = Session::new(
            SessionId::new(self.id_generator.generate()),
            user_id,
            ip_address,
        );
        self.session_repo.create(&session).await
    }
}
