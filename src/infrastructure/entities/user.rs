use chrono::{DateTime, Utc};

use super::{AccessTokenEntity, EmailEntity, SessionEntity};

/// Row of the `users` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub about: Option<String>,
    pub avatar_url: Option<String>,
    pub state: String,
    pub password_hash: Option<String>,
    pub reset_password_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    #[sqlx(skip)]
    pub email: Option<Box<EmailEntity>>,
    #[sqlx(skip)]
    pub sessions: Option<Vec<SessionEntity>>,
    #[sqlx(skip)]
    pub access_tokens: Option<Vec<AccessTokenEntity>>,
}

impl UserEntity {
    /// Copy without related rows.
    pub fn pure_copy(&self) -> Self {
        Self {
            email: None,
            sessions: None,
            access_tokens: None,
            ..self.clone()
        }
    }
}

pub const USER_COLUMNS: &str = "id, username, display_name, about, avatar_url, state, \
     password_hash, reset_password_code, created_at, modified_at";
