use chrono::{DateTime, Utc};

use super::UserEntity;

/// Row of the `emails` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct EmailEntity {
    pub id: i64,
    pub user_id: i64,
    pub address: String,
    pub activation_status: String,
    pub activation_code: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    #[sqlx(skip)]
    pub user: Option<Box<UserEntity>>,
}

impl EmailEntity {
    /// Copy without related rows.
    pub fn pure_copy(&self) -> Self {
        Self {
            user: None,
            ..self.clone()
        }
    }
}

pub const EMAIL_COLUMNS: &str =
    "id, user_id, address, activation_status, activation_code, created_at, modified_at";
