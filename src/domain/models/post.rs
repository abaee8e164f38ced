//! Post model and repository trait.
//!
//! Maps to the `posts` table. Author and community names are denormalized.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::community::DEFAULT_PAGE_LIMIT;
use super::{Community, User};
use crate::domain::value_objects::{CommunityId, PostId, UserId};
use crate::shared::error::AppError;

pub const POST_CONTENT_MAX_LENGTH: usize = 2000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostInclude {
    pub author: bool,
    pub community: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub author_username: String,
    pub community_id: CommunityId,
    pub community_name: String,
    pub vote: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    pub author: Option<Box<User>>,
    pub community: Option<Box<Community>>,
}

impl Post {
    pub fn new(id: PostId, author: &User, community: &Community, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id: author.id,
            author_username: author.username.clone(),
            community_id: community.id,
            community_name: community.name.clone(),
            vote: 0,
            content,
            created_at: now,
            modified_at: now,
            author: None,
            community: None,
        }
    }

    pub fn pure_copy(&self) -> Self {
        Self {
            author: None,
            community: None,
            ..self.clone()
        }
    }

    pub fn is_author(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}

/// Listing filter; `search` is a case-insensitive substring of the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFilter {
    pub community_id: Option<CommunityId>,
    pub author_id: Option<UserId>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self {
            community_id: None,
            author_id: None,
            search: None,
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl PostFilter {
    /// In-memory form of the listing predicate.
    pub fn matches(&self, post: &Post) -> bool {
        self.community_id.map_or(true, |id| post.community_id == id)
            && self.author_id.map_or(true, |id| post.author_id == id)
            && self.search.as_ref().map_or(true, |s| {
                post.content.to_lowercase().contains(&s.to_lowercase())
            })
    }
}

/// Repository trait for Post data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Newest first.
    async fn list(&self, filter: PostFilter, include: PostInclude) -> Result<Vec<Post>, AppError>;

    async fn get_by_id(&self, id: PostId, include: PostInclude) -> Result<Option<Post>, AppError>;

    async fn create(&self, post: &Post) -> Result<Post, AppError>;

    async fn update(&self, post: &Post) -> Result<Post, AppError>;

    async fn delete(&self, id: PostId) -> Result<(), AppError>;

    async fn exists_by_id(&self, id: PostId) -> Result<bool, AppError>;
}
