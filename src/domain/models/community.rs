//! Community model and repository trait.
//!
//! Maps to the `communities` table. The creator's username is denormalized
//! onto the row so listings never need a join.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::User;
use crate::domain::value_objects::{CommunityId, UserId};
use crate::shared::error::AppError;

pub const DEFAULT_PAGE_LIMIT: i64 = 50;
pub const MAX_PAGE_LIMIT: i64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Community {
    pub id: CommunityId,
    pub name: String,
    pub creator_id: UserId,
    pub creator_username: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    pub creator: Option<Box<User>>,
}

impl Community {
    pub fn new(id: CommunityId, name: String, creator: &User) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            creator_id: creator.id,
            creator_username: creator.username.clone(),
            created_at: now,
            modified_at: now,
            creator: None,
        }
    }

    pub fn pure_copy(&self) -> Self {
        Self {
            creator: None,
            ..self.clone()
        }
    }

    pub fn is_creator(&self, user_id: UserId) -> bool {
        self.creator_id == user_id
    }
}

/// Listing filter. `name` matches as a case-insensitive substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityFilter {
    pub name: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for CommunityFilter {
    fn default() -> Self {
        Self {
            name: None,
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl CommunityFilter {
    /// In-memory form of the listing predicate.
    pub fn matches(&self, community: &Community) -> bool {
        match &self.name {
            Some(search) => community
                .name
                .to_lowercase()
                .contains(&search.to_lowercase()),
            None => true,
        }
    }
}

/// Repository trait for Community data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityRepository: Send + Sync {
    async fn list(
        &self,
        filter: CommunityFilter,
        include_creator: bool,
    ) -> Result<Vec<Community>, AppError>;

    async fn get_by_id(
        &self,
        id: CommunityId,
        include_creator: bool,
    ) -> Result<Option<Community>, AppError>;

    async fn get_by_name(
        &self,
        name: &str,
        include_creator: bool,
    ) -> Result<Option<Community>, AppError>;

    async fn create(&self, community: &Community) -> Result<Community, AppError>;

    /// Saves the row and propagates a rename to the denormalized
    /// `community_name` columns of posts and memberships.
    async fn update(&self, community: &Community) -> Result<Community, AppError>;

    async fn delete(&self, id: CommunityId) -> Result<(), AppError>;

    async fn exists_by_id(&self, id: CommunityId) -> Result<bool, AppError>;

    async fn exists_by_name(&self, name: &str) -> Result<bool, AppError>;
}
