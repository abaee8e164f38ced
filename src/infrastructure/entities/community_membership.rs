use chrono::{DateTime, Utc};

use super::{CommunityEntity, UserEntity};

/// Row of the `community_memberships` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CommunityMembershipEntity {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub community_id: i64,
    pub community_name: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    #[sqlx(skip)]
    pub user: Option<Box<UserEntity>>,
    #[sqlx(skip)]
    pub community: Option<Box<CommunityEntity>>,
}

impl CommunityMembershipEntity {
    /// Copy without related rows.
    pub fn pure_copy(&self) -> Self {
        Self {
            user: None,
            community: None,
            ..self.clone()
        }
    }
}

pub const COMMUNITY_MEMBERSHIP_COLUMNS: &str =
    "id, user_id, username, community_id, community_name, created_at, modified_at";
