//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **GlobalService**: Site-wide settings row
//! - **UserService**: Sign-up, login, profile and password management
//! - **EmailService**: Email activation
//! - **AccessTokenService**: Token issuance and authentication
//! - **SessionService**: Login sessions
//! - **CommunityService**: Community management
//! - **CommunityMembershipService**: Joining and leaving communities
//! - **PostService**: Post CRUD and votes

use std::sync::Arc;

use crate::domain::gateways::EmailGateway;
use crate::domain::{
    AccessTokenRepository, CommunityMembershipRepository, CommunityRepository, EmailRepository,
    GlobalRepository, GlobalValues, PostRepository, SessionRepository, UserRepository,
};
use crate::shared::snowflake::SnowflakeGenerator;

pub mod access_token_service;
pub mod community_membership_service;
pub mod community_service;
pub mod email_service;
pub mod global_service;
pub mod post_service;
pub mod session_service;
pub mod user_service;

pub use access_token_service::{AccessTokenService, AccessTokenServiceImpl};
pub use community_membership_service::{
    CommunityMembershipService, CommunityMembershipServiceImpl,
};
pub use community_service::{CommunityService, CommunityServiceImpl};
pub use email_service::{EmailService, EmailServiceImpl};
pub use global_service::{GlobalService, GlobalServiceImpl};
pub use post_service::{PostService, PostServiceImpl};
pub use session_service::{SessionService, SessionServiceImpl};
pub use user_service::{SignedInUser, UserService, UserServiceImpl};

/// One implementation per repository trait.
#[derive(Clone)]
pub struct Repositories {
    pub globals: Arc<dyn GlobalRepository>,
    pub users: Arc<dyn UserRepository>,
    pub emails: Arc<dyn EmailRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub access_tokens: Arc<dyn AccessTokenRepository>,
    pub communities: Arc<dyn CommunityRepository>,
    pub community_memberships: Arc<dyn CommunityMembershipRepository>,
    pub posts: Arc<dyn PostRepository>,
}

/// The services the HTTP layer calls, wired once at startup.
#[derive(Clone)]
pub struct Services {
    pub globals: Arc<dyn GlobalService>,
    pub users: Arc<dyn UserService>,
    pub emails: Arc<dyn EmailService>,
    pub access_tokens: Arc<dyn AccessTokenService>,
    pub sessions: Arc<dyn SessionService>,
    pub communities: Arc<dyn CommunityService>,
    pub community_memberships: Arc<dyn CommunityMembershipService>,
    pub posts: Arc<dyn PostService>,
}

impl Services {
    pub fn new(
        repos: Repositories,
        email_gateway: Arc<dyn EmailGateway>,
        id_generator: Arc<SnowflakeGenerator>,
        globals: Arc<GlobalValues>,
        token_length: usize,
    ) -> Self {
        let sessions: Arc<dyn SessionService> = Arc::new(SessionServiceImpl::new(
            repos.sessions.clone(),
            repos.access_tokens.clone(),
            id_generator.clone(),
        ));
        let access_tokens: Arc<dyn AccessTokenService> = Arc::new(AccessTokenServiceImpl::new(
            repos.access_tokens.clone(),
            repos.users.clone(),
            id_generator.clone(),
            token_length,
        ));

        Self {
            globals: Arc::new(GlobalServiceImpl::new(repos.globals.clone())),
            users: Arc::new(UserServiceImpl::new(
                repos.users.clone(),
                repos.emails.clone(),
                sessions.clone(),
                access_tokens.clone(),
                email_gateway.clone(),
                id_generator.clone(),
                globals.clone(),
            )),
            emails: Arc::new(EmailServiceImpl::new(
                repos.emails.clone(),
                repos.users.clone(),
                email_gateway,
                globals,
            )),
            access_tokens,
            sessions,
            communities: Arc::new(CommunityServiceImpl::new(
                repos.communities.clone(),
                repos.community_memberships.clone(),
                id_generator.clone(),
            )),
            community_memberships: Arc::new(CommunityMembershipServiceImpl::new(
                repos.community_memberships.clone(),
                repos.communities.clone(),
                id_generator.clone(),
            )),
            posts: Arc::new(PostServiceImpl::new(
                repos.posts,
                repos.communities,
                repos.community_memberships,
                id_generator,
            )),
        }
    }
}
