//! Community Service
//!
//! Handles community management operations.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    Community, CommunityFilter, CommunityId, CommunityMembership, CommunityMembershipId,
    CommunityMembershipRepository, CommunityName, CommunityRepository, IdOrName, User,
};
use crate::shared::error::{AppError, ErrorName};
use crate::shared::snowflake::SnowflakeGenerator;

/// Community service trait
#[async_trait]
pub trait CommunityService: Send + Sync {
    async fn list_communities(
        &self,
        filter: CommunityFilter,
        include_creator: bool,
    ) -> Result<Vec<Community>, AppError>;

    async fn get_community(
        &self,
        id_or_name: IdOrName<CommunityId>,
        include_creator: bool,
    ) -> Result<Community, AppError>;

    /// Create a community and make its creator the first member.
    async fn create_community(
        &self,
        requesting_user: &User,
        name: CommunityName,
    ) -> Result<Community, AppError>;

    /// Rename a community. Creator only.
    async fn update_community(
        &self,
        requesting_user: &User,
        id_or_name: IdOrName<CommunityId>,
        name: CommunityName,
    ) -> Result<Community, AppError>;

    /// Delete a community with its posts and memberships. Creator only.
    async fn delete_community(
        &self,
        requesting_user: &User,
        id_or_name: IdOrName<CommunityId>,
    ) -> Result<(), AppError>;
}

/// CommunityService implementation
pub struct CommunityServiceImpl {
    community_repo: Arc<dyn CommunityRepository>,
    membership_repo: Arc<dyn CommunityMembershipRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl CommunityServiceImpl {
    pub fn new(
        community_repo: Arc<dyn CommunityRepository>,
        membership_repo: Arc<dyn CommunityMembershipRepository>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            community_repo,
            membership_repo,
            id_generator,
        }
    }

    async fn load_as_creator(
        &self,
        requesting_user: &User,
        id_or_name: IdOrName<CommunityId>,
    ) -> Result<Community, AppError> {
        let community = self.get_community(id_or_name, false).await?;
        if !community.is_creator(requesting_user.id) {
            return Err(AppError::forbidden(
                ErrorName::AccessDenied,
                "Only the creator can change this community",
            ));
        }
        Ok(community)
    }

    fn name_taken(name: &CommunityName) -> AppError {
        AppError::conflict(
            ErrorName::CommunityNameExists,
            format!("Community name '{}' already exists", name),
        )
    }
}

/// Resolve a community by id or name through `repo`.
pub(crate) async fn find_community(
    repo: &dyn CommunityRepository,
    id_or_name: IdOrName<CommunityId>,
    include_creator: bool,
) -> Result<Community, AppError> {
    let community = match &id_or_name {
        IdOrName::Id(id) => repo.get_by_id(*id, include_creator).await?,
        IdOrName::Name(name) => repo.get_by_name(name, include_creator).await?,
    };
    community.ok_or_else(|| {
        AppError::not_found(
            ErrorName::CommunityNotFound,
            format!("Community {} not found", id_or_name),
        )
    })
}

#[async_trait]
impl CommunityService for CommunityServiceImpl {
    async fn list_communities(
        &self,
        filter: CommunityFilter,
        include_creator: bool,
    ) -> Result<Vec<Community>, AppError> {
        self.community_repo.list(filter, include_creator).await
    }

    async fn get_community(
        &self,
        id_or_name: IdOrName<CommunityId>,
        include_creator: bool,
    ) -> Result<Community, AppError> {
        find_community(self.community_repo.as_ref(), id_or_name, include_creator).await
    }

    async fn create_community(
        &self,
        requesting_user: &User,
        name: CommunityName,
    ) -> Result<Community, AppError> {
        if self.community_repo.exists_by_name(name.as_str()).await? {
            return Err(Self::name_taken(&name));
        }

        let community = Community::new(
            CommunityId::new(self.id_generator.generate()),
            name.into_inner(),
            requesting_user,
        );
        let community = self.community_repo.create(&community).await?;

        let membership = CommunityMembership::new(
            CommunityMembershipId::new(self.id_generator.generate()),
            requesting_user,
            &community,
        );
        if let Err(err) = self.membership_repo.create(&membership).await {
            if let Err(cleanup_err) = self.community_repo.delete(community.id).await {
                tracing::error!(
                    community_id = %community.id,
                    error = %cleanup_err,
                    "Failed to remove community without creator membership"
                );
            }
            return Err(err);
        }

        tracing::info!(
            community_id = %community.id,
            name = %community.name,
            creator_id = %requesting_user.id,
            "Community created"
        );
        Ok(community)
    }

    async fn update_community(
        &self,
        requesting_user: &User,
        id_or_name: IdOrName<CommunityId>,
        name: CommunityName,
    ) -> Result<Community, AppError> {
        let mut community = self.load_as_creator(requesting_user, id_or_name).await?;
        if community.name == name.as_str() {
            return Ok(community);
        }
        if self.community_repo.exists_by_name(name.as_str()).await? {
            return Err(Self::name_taken(&name));
        }

        community.name = name.into_inner();
        self.community_repo.update(&community).await
    }

    async fn delete_community(
        &self,
        requesting_user: &User,
        id_or_name: IdOrName<CommunityId>,
    ) -> Result<(), AppError> {
        let community = self.load_as_creator(requesting_user, id_or_name).await?;
        self.community_repo.delete(community.id).await?;

        tracing::info!(community_id = %community.id, "Community deleted");
        Ok(())
    }
}
