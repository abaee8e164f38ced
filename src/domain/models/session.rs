//! Session model and repository trait.
//!
//! A session records one sign-up or log-in from a client address.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;
use crate::domain::value_objects::{SessionId, UserId};
use crate::shared::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Opened,
    Closed,
}

impl SessionState {
    pub fn from_db(s: &str) -> Self {
        match s {
            "closed" => Self::Closed,
            _ => Self::Opened,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub ip_address: Option<String>,
    pub state: SessionState,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    pub user: Option<Box<User>>,
}

impl Session {
    pub fn new(id: SessionId, user_id: UserId, ip_address: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            ip_address,
            state: SessionState::Opened,
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

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Opened
    }
}

/// Repository trait for Session data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Sessions of one user, newest first.
    async fn list_by_user(
        &self,
        user_id: UserId,
        include_user: bool,
    ) -> Result<Vec<Session>, AppError>;

    async fn get_by_id(
        &self,
        id: SessionId,
        include_user: bool,
    ) -> Result<Option<Session>, AppError>;

    async fn create(&self, session: &Session) -> Result<Session, AppError>;

    async fn update(&self, session: &Session) -> Result<Session, AppError>;

    async fn delete(&self, id: SessionId) -> Result<(), AppError>;

    async fn exists_by_id(&self, id: SessionId) -> Result<bool, AppError>;
}
