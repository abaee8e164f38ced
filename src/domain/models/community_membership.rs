//! Community membership model and repository trait.
//!
//! Maps to the `community_memberships` table, unique on
//! `(user_id, community_id)`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Community, User};
use crate::domain::value_objects::{CommunityId, CommunityMembershipId, UserId};
use crate::shared::error::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommunityMembershipInclude {
    pub user: bool,
    pub community: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommunityMembership {
    pub id: CommunityMembershipId,
    pub user_id: UserId,
    pub username: String,
    pub community_id: CommunityId,
    pub community_name: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    pub user: Option<Box<User>>,
    pub community: Option<Box<Community>>,
}

impl CommunityMembership {
    pub fn new(id: CommunityMembershipId, user: &User, community: &Community) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id: user.id,
            username: user.username.clone(),
            community_id: community.id,
            community_name: community.name.clone(),
            created_at: now,
            modified_at: now,
            user: None,
            community: None,
        }
    }

    pub fn pure_copy(&self) -> Self {
        Self {
            user: None,
            community: None,
            ..self.clone()
        }
    }
}

/// Repository trait for CommunityMembership data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityMembershipRepository: Send + Sync {
    async fn list_by_user(
        &self,
        user_id: UserId,
        include: CommunityMembershipInclude,
    ) -> Result<Vec<CommunityMembership>, AppError>;

    async fn get_by_id(
        &self,
        id: CommunityMembershipId,
        include: CommunityMembershipInclude,
    ) -> Result<Option<CommunityMembership>, AppError>;

    async fn create(
        &self,
        membership: &CommunityMembership,
    ) -> Result<CommunityMembership, AppError>;

    async fn delete(&self, id: CommunityMembershipId) -> Result<(), AppError>;

    async fn exists_by_id(&self, id: CommunityMembershipId) -> Result<bool, AppError>;

    async fn exists(&self, user_id: UserId, community_id: CommunityId) -> Result<bool, AppError>;
}
