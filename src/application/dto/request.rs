//! Request DTOs
//!
//! Data structures for API request bodies and query strings.
//!
//! Every field is optional here. Presence and format are checked by the
//! domain validators so that a missing field is reported with its name.

use serde::Deserialize;

use crate::domain::{CommunityMembershipInclude, PostInclude, UserInclude};

/// Sign up with email request
#[derive(Debug, Default, Deserialize)]
pub struct SignUpWithEmailRequest {
    pub email_address: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Log in with email request
#[derive(Debug, Default, Deserialize)]
pub struct LogInWithEmailRequest {
    pub email_address: Option<String>,
    pub password: Option<String>,
}

/// Log in with username request
#[derive(Debug, Default, Deserialize)]
pub struct LogInWithUsernameRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SendResetPasswordCodeRequest {
    pub email_address: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResetPasswordWithCodeRequest {
    pub email_address: Option<String>,
    pub reset_password_code: Option<String>,
    pub new_password: Option<String>,
}

/// Update user request
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub display_name: Option<String>,
    pub about: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatePasswordRequest {
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivateEmailRequest {
    pub activation_code: Option<i32>,
}

/// Create or rename a community
#[derive(Debug, Default, Deserialize)]
pub struct CommunityNameRequest {
    pub name: Option<String>,
}

/// Join a community, given by id or name
#[derive(Debug, Default, Deserialize)]
pub struct CreateCommunityMembershipRequest {
    pub community_id_or_name: Option<String>,
}

/// Create or edit a post
#[derive(Debug, Default, Deserialize)]
pub struct PostContentRequest {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VotePostRequest {
    #[serde(default = "default_is_up")]
    pub is_up: bool,
}

fn default_is_up() -> bool {
    true
}

// ============================================================================
// Query strings
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct UserIncludeQuery {
    #[serde(default)]
    pub include_email: bool,
    #[serde(default)]
    pub include_sessions: bool,
    #[serde(default)]
    pub include_access_tokens: bool,
}

impl From<UserIncludeQuery> for UserInclude {
    fn from(query: UserIncludeQuery) -> Self {
        Self {
            email: query.include_email,
            sessions: query.include_sessions,
            access_tokens: query.include_access_tokens,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct IncludeUserQuery {
    #[serde(default)]
    pub include_user: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct IncludeCreatorQuery {
    #[serde(default)]
    pub include_creator: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListCommunitiesQuery {
    pub name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(default)]
    pub include_creator: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct MembershipIncludeQuery {
    #[serde(default)]
    pub include_user: bool,
    #[serde(default)]
    pub include_community: bool,
}

impl From<MembershipIncludeQuery> for CommunityMembershipInclude {
    fn from(query: MembershipIncludeQuery) -> Self {
        Self {
            user: query.include_user,
            community: query.include_community,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PostIncludeQuery {
    #[serde(default)]
    pub include_author: bool,
    #[serde(default)]
    pub include_community: bool,
}

impl From<PostIncludeQuery> for PostInclude {
    fn from(query: PostIncludeQuery) -> Self {
        Self {
            author: query.include_author,
            community: query.include_community,
        }
    }
}

/// `community` and `author` are ids.
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    pub community: Option<String>,
    pub author: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(default)]
    pub include_author: bool,
    #[serde(default)]
    pub include_community: bool,
}

impl ListPostsQuery {
    pub fn include(&self) -> PostInclude {
        PostInclude {
            author: self.include_author,
            community: self.include_community,
        }
    }
}
