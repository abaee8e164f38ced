use chrono::{DateTime, Utc};

use super::{CommunityEntity, UserEntity};

/// Row of the `posts` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PostEntity {
    pub id: i64,
    pub author_id: i64,
    pub author_username: String,
    pub community_id: i64,
    pub community_name: String,
    pub vote: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    #[sqlx(skip)]
    pub author: Option<Box<UserEntity>>,
    #[sqlx(skip)]
    pub community: Option<Box<CommunityEntity>>,
}

impl PostEntity {
    /// Copy without related rows.
    pub fn pure_copy(&self) -> Self {
        Self {
            author: None,
            community: None,
            ..self.clone()
        }
    }
}

pub const POST_COLUMNS: &str = "id, author_id, author_username, community_id, community_name, \
     vote, content, created_at, modified_at";
