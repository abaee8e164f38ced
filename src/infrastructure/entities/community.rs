use chrono::{DateTime, Utc};

use super::UserEntity;

/// Row of the `communities` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CommunityEntity {
    pub id: i64,
    pub name: String,
    pub creator_id: i64,
    pub creator_username: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    #[sqlx(skip)]
    pub creator: Option<Box<UserEntity>>,
}

impl CommunityEntity {
    /// Copy without related rows.
    pub fn pure_copy(&self) -> Self {
        Self {
            creator: None,
            ..self.clone()
        }
    }
}

pub const COMMUNITY_COLUMNS: &str =
    "id, name, creator_id, creator_username, created_at, modified_at";
