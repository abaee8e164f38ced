use chrono::{DateTime, Utc};

use super::UserEntity;

/// Row of the `sessions` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SessionEntity {
    pub id: i64,
    pub user_id: i64,
    pub ip_address: Option<String>,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    #[sqlx(skip)]
    pub user: Option<Box<UserEntity>>,
}

impl SessionEntity {
    /// Copy without related rows.
    pub fn pure_copy(&self) -> Self {
        Self {
            user: None,
            ..self.clone()
        }
    }
}

pub const SESSION_COLUMNS: &str = "id, user_id, ip_address, state, created_at, modified_at";
