//! Community Membership Service
//!
//! Joining and leaving communities.

use std::sync::Arc;

use async_trait::async_trait;

use super::community_service::find_community;
use crate::domain::{
    CommunityId, CommunityMembership, CommunityMembershipId, CommunityMembershipInclude,
    CommunityMembershipRepository, CommunityRepository, IdOrName, User,
};
use crate::shared::error::{AppError, ErrorName};
use crate::shared::snowflake::SnowflakeGenerator;

/// Community membership service trait
#[async_trait]
pub trait CommunityMembershipService: Send + Sync {
    async fn list_memberships(
        &self,
        requesting_user: &User,
        include: CommunityMembershipInclude,
    ) -> Result<Vec<CommunityMembership>, AppError>;

    async fn get_membership(
        &self,
        requesting_user: &User,
        id: CommunityMembershipId,
        include: CommunityMembershipInclude,
    ) -> Result<CommunityMembership, AppError>;

    async fn create_membership(
        &self,
        requesting_user: &User,
        community: IdOrName<CommunityId>,
    ) -> Result<CommunityMembership, AppError>;

    /// Leave a community. The creator cannot leave their own community.
    async fn delete_membership(
        &self,
        requesting_user: &User,
        id: CommunityMembershipId,
    ) -> Result<(), AppError>;
}

/// CommunityMembershipService implementation
pub struct CommunityMembershipServiceImpl {
    membership_repo: Arc<dyn CommunityMembershipRepository>,
    community_repo: Arc<dyn CommunityRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl CommunityMembershipServiceImpl {
    pub fn new(
        membership_repo: Arc<dyn CommunityMembershipRepository>,
        community_repo: Arc<dyn CommunityRepository>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            membership_repo,
            community_repo,
            id_generator,
        }
    }
}

#[async_trait]
impl CommunityMembershipService for CommunityMembershipServiceImpl {
    async fn list_memberships(
        &self,
        requesting_user: &User,
        include: CommunityMembershipInclude,
    ) -> Result<Vec<CommunityMembership>, AppError> {
        self.membership_repo
            .list_by_user(requesting_user.id, include)
            .await
    }

    async fn get_membership(
        &self,
        requesting_user: &User,
        id: CommunityMembershipId,
        include: CommunityMembershipInclude,
    ) -> Result<CommunityMembership, AppError> {
        let membership = self
            .membership_repo
            .get_by_id(id, include)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    ErrorName::CommunityMembershipNotFound,
                    format!("Community membership {} not found", id),
                )
            })?;

        if membership.user_id != requesting_user.id {
            return Err(AppError::forbidden(
                ErrorName::AccessDenied,
                "Community membership belongs to another user",
            ));
        }
        Ok(membership)
    }

    async fn create_membership(
        &self,
        requesting_user: &User,
        community: IdOrName<CommunityId>,
    ) -> Result<CommunityMembership, AppError> {
        let community = find_community(self.community_repo.as_ref(), community, false).await?;
        if self
            .membership_repo
            .exists(requesting_user.id, community.id)
            .await?
        {
            return Err(AppError::conflict(
                ErrorName::CommunityMembershipExists,
                format!("Already a member of '{}'", community.name),
            ));
        }

        let membership = CommunityMembership::new(
            CommunityMembershipId::new(self.id_generator.generate()),
            requesting_user,
            &community,
        );
        let membership = self.membership_repo.create(&membership).await?;

        tracing::info!(
            user_id = %requesting_user.id,
            community_id = %community.id,
            "Joined community"
        );
        Ok(membership)
    }

    async fn delete_membership(
        &self,
        requesting_user: &User,
        id: CommunityMembershipId,
    ) -> Result<(), AppError> {
        let membership = self
            .get_membership(requesting_user, id, CommunityMembershipInclude::default())
            .await?;

        let community = self
            .community_repo
            .get_by_id(membership.community_id, false)
            .await?;
        if community.is_some_and(|c| c.is_creator(requesting_user.id)) {
            return Err(AppError::forbidden(
                ErrorName::CreatorCannotLeaveCommunity,
                "The creator cannot leave their community",
            ));
        }

        self.membership_repo.delete(id).await?;
        tracing::info!(
            user_id = %requesting_user.id,
            community_id = %membership.community_id,
            "Left community"
        );
        Ok(())
    }
}
