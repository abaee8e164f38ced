//! Post Service
//!
//! Handles post operations. Only members may post in a community and only
//! the author may edit or delete a post.

use std::sync::Arc;

use async_trait::async_trait;

use super::community_service::find_community;
use crate::domain::{
    CommunityId, CommunityMembershipRepository, CommunityRepository, IdOrName, Post, PostFilter,
    PostId, PostInclude, PostRepository, User,
};
use crate::shared::error::{AppError, ErrorName};
use crate::shared::snowflake::SnowflakeGenerator;

/// Post service trait
#[async_trait]
pub trait PostService: Send + Sync {
    /// Newest first.
    async fn list_posts(&self, filter: PostFilter, include: PostInclude)
        -> Result<Vec<Post>, AppError>;

    async fn get_post(&self, id: PostId, include: PostInclude) -> Result<Post, AppError>;

    async fn create_post(
        &self,
        requesting_user: &User,
        community: IdOrName<CommunityId>,
        content: String,
    ) -> Result<Post, AppError>;

    async fn update_post_content(
        &self,
        requesting_user: &User,
        id: PostId,
        content: String,
    ) -> Result<Post, AppError>;

    /// Add one up or down vote.
    async fn vote_post(&self, requesting_user: &User, id: PostId, is_up: bool)
        -> Result<Post, AppError>;

    async fn delete_post(&self, requesting_user: &User, id: PostId) -> Result<(), AppError>;
}

/// PostService implementation
pub struct PostServiceImpl {
    post_repo: Arc<dyn PostRepository>,
    community_repo: Arc<dyn CommunityRepository>,
    membership_repo: Arc<dyn CommunityMembershipRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl PostServiceImpl {
    pub fn new(
        post_repo: Arc<dyn PostRepository>,
        community_repo: Arc<dyn CommunityRepository>,
        membership_repo: Arc<dyn CommunityMembershipRepository>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            post_repo,
            community_repo,
            membership_repo,
            id_generator,
        }
    }

    async fn load_as_author(&self, requesting_user: &User, id: PostId) -> Result<Post, AppError> {
        let post = self.get_post(id, PostInclude::default()).await?;
        if !post.is_author(requesting_user.id) {
            return Err(AppError::forbidden(
                ErrorName::AccessDenied,
                "Only the author can change this post",
            ));
        }
        Ok(post)
    }
}

#[async_trait]
impl PostService for PostServiceImpl {
    async fn list_posts(
        &self,
        filter: PostFilter,
        include: PostInclude,
    ) -> Result<Vec<Post>, AppError> {
        self.post_repo.list(filter, include).await
    }

    async fn get_post(&self, id: PostId, include: PostInclude) -> Result<Post, AppError> {
        self.post_repo
            .get_by_id(id, include)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorName::PostNotFound, format!("Post {} not found", id)))
    }

    async fn create_post(
        &self,
        requesting_user: &User,
        community: IdOrName<CommunityId>,
        content: String,
    ) -> Result<Post, AppError> {
        let community = find_community(self.community_repo.as_ref(), community, false).await?;
        if !self
            .membership_repo
            .exists(requesting_user.id, community.id)
            .await?
        {
            return Err(AppError::forbidden(
                ErrorName::NotCommunityMember,
                format!("Join '{}' before posting", community.name),
            ));
        }

        let post = Post::new(
            PostId::new(self.id_generator.generate()),
            requesting_user,
            &community,
            content,
        );
        let post = self.post_repo.create(&post).await?;

        tracing::info!(post_id = %post.id, community_id = %community.id, "Post created");
        Ok(post)
    }

    async fn update_post_content(
        &self,
        requesting_user: &User,
        id: PostId,
        content: String,
    ) -> Result<Post, AppError> {
        let mut post = self.load_as_author(requesting_user, id).await?;
        post.content = content;
        self.post_repo.update(&post).await
    }

    async fn vote_post(
        &self,
        requesting_user: &User,
        id: PostId,
        is_up: bool,
    ) -> Result<Post, AppError> {
        let mut post = self.get_post(id, PostInclude::default()).await?;
        post.vote = if is_up {
            post.vote.saturating_add(1)
        } else {
            post.vote.saturating_sub(1)
        };
        let post = self.post_repo.update(&post).await?;

        tracing::debug!(post_id = %id, user_id = %requesting_user.id, is_up, "Post voted");
        Ok(post)
    }

    async fn delete_post(&self, requesting_user: &User, id: PostId) -> Result<(), AppError> {
        let post = self.load_as_author(requesting_user, id).await?;
        self.post_repo.delete(post.id).await
    }
}
