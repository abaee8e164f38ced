//! Response DTOs
//!
//! Data structures for API response bodies.
//!
//! Ids are rendered as strings so that JavaScript clients keep all 64 bits.
//! Password hashes, reset codes and activation codes never leave the server.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::SignedInUser;
use crate::domain::{
    AccessToken, Community, CommunityMembership, Email, Post, Session, User,
};

/// `{"items": [...]}` wrapper for every listing.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
}

impl<T, M> From<Vec<M>> for ListResponse<T>
where
    T: From<M>,
{
    fn from(models: Vec<M>) -> Self {
        Self {
            items: models.into_iter().map(T::from).collect(),
        }
    }
}

fn boxed<M, T: From<M>>(model: Option<Box<M>>) -> Option<Box<T>> {
    model.map(|m| Box::new(T::from(*m)))
}

/// User response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub about: Option<String>,
    pub avatar_url: Option<String>,
    pub state: String,
    pub has_password: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Box<EmailResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessions: Option<Vec<SessionResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_tokens: Option<Vec<AccessTokenResponse>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            has_password: user.has_password(),
            state: user.state.as_str().to_string(),
            username: user.username,
            display_name: user.display_name,
            about: user.about,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
            modified_at: user.modified_at,
            email: boxed(user.email),
            sessions: user
                .sessions
                .map(|s| s.into_iter().map(SessionResponse::from).collect()),
            access_tokens: user
                .access_tokens
                .map(|t| t.into_iter().map(AccessTokenResponse::from).collect()),
        }
    }
}

/// Email response
#[derive(Debug, Serialize)]
pub struct EmailResponse {
    pub id: String,
    pub user_id: String,
    pub address: String,
    pub activation_status: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Box<UserResponse>>,
}

impl From<Email> for EmailResponse {
    fn from(email: Email) -> Self {
        Self {
            id: email.id.to_string(),
            user_id: email.user_id.to_string(),
            activation_status: email.activation.status.as_str().to_string(),
            address: email.address,
            created_at: email.created_at,
            modified_at: email.modified_at,
            user: boxed(email.user),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub user_id: String,
    pub ip_address: Option<String>,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Box<UserResponse>>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id.to_string(),
            user_id: session.user_id.to_string(),
            state: session.state.as_str().to_string(),
            ip_address: session.ip_address,
            created_at: session.created_at,
            modified_at: session.modified_at,
            user: boxed(session.user),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub id: String,
    pub user_id: String,
    pub session_id: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Box<UserResponse>>,
}

impl From<AccessToken> for AccessTokenResponse {
    fn from(token: AccessToken) -> Self {
        Self {
            id: token.id.to_string(),
            user_id: token.user_id.to_string(),
            session_id: token.session_id.to_string(),
            value: token.value,
            created_at: token.created_at,
            modified_at: token.modified_at,
            user: boxed(token.user),
        }
    }
}

/// Body of sign-up and login responses. The token is also set as a cookie.
#[derive(Debug, Serialize)]
pub struct SignedInResponse {
    pub user: UserResponse,
    pub access_token: AccessTokenResponse,
}

impl From<SignedInUser> for SignedInResponse {
    fn from(signed_in: SignedInUser) -> Self {
        Self {
            user: signed_in.user.into(),
            access_token: signed_in.access_token.into(),
        }
    }
}

/// Community response
#[derive(Debug, Serialize)]
pub struct CommunityResponse {
    pub id: String,
    pub name: String,
    pub creator_id: String,
    pub creator_username: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<Box<UserResponse>>,
}

impl From<Community> for CommunityResponse {
    fn from(community: Community) -> Self {
        Self {
            id: community.id.to_string(),
            creator_id: community.creator_id.to_string(),
            name: community.name,
            creator_username: community.creator_username,
            created_at: community.created_at,
            modified_at: community.modified_at,
            creator: boxed(community.creator),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommunityMembershipResponse {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub community_id: String,
    pub community_name: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Box<UserResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<Box<CommunityResponse>>,
}

impl From<CommunityMembership> for CommunityMembershipResponse {
    fn from(membership: CommunityMembership) -> Self {
        Self {
            id: membership.id.to_string(),
            user_id: membership.user_id.to_string(),
            community_id: membership.community_id.to_string(),
            username: membership.username,
            community_name: membership.community_name,
            created_at: membership.created_at,
            modified_at: membership.modified_at,
            user: boxed(membership.user),
            community: boxed(membership.community),
        }
    }
}

/// Post response
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub author_username: String,
    pub community_id: String,
    pub community_name: String,
    pub vote: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Box<UserResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<Box<CommunityResponse>>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            community_id: post.community_id.to_string(),
            author_username: post.author_username,
            community_name: post.community_name,
            vote: post.vote,
            content: post.content,
            created_at: post.created_at,
            modified_at: post.modified_at,
            author: boxed(post.author),
            community: boxed(post.community),
        }
    }
}
