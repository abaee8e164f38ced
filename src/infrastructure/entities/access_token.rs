use chrono::{DateTime, Utc};

use super::UserEntity;

/// Row of the `access_tokens` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct AccessTokenEntity {
    pub id: i64,
    pub user_id: i64,
    pub session_id: i64,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    #[sqlx(skip)]
    pub user: Option<Box<UserEntity>>,
}

impl AccessTokenEntity {
    /// Copy without related rows.
    pub fn pure_copy(&self) -> Self {
        Self {
            user: None,
            ..self.clone()
        }
    }
}

pub const ACCESS_TOKEN_COLUMNS: &str = "id, user_id, session_id, value, created_at, modified_at";
