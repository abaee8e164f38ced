//! Common Test Utilities
//!
//! An in-memory store implementing every repository trait, a router built
//! over it, and request helpers.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::Utc;
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use parking_lot::{Mutex, MutexGuard};
use serde_json::Value;
use tower::ServiceExt;

use fireplace_api::application::services::{Repositories, Services};
use fireplace_api::config::{
    AuthSettings, CorsSettings, DatabaseSettings, GlobalSettings, ServerSettings, Settings,
    SnowflakeSettings,
};
use fireplace_api::domain::gateways::{EmailGateway, OutgoingEmail};
use fireplace_api::domain::*;
use fireplace_api::presentation::http::handlers::health::ReadinessCheck;
use fireplace_api::shared::error::{AppError, ErrorName};
use fireplace_api::shared::snowflake::{SnowflakeGenerator, FIREPLACE_EPOCH};
use fireplace_api::startup::{build_router, AppState};

pub const PASSWORD: &str = "P@ssw0rd";

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
struct Tables {
    globals: BTreeMap<i32, Global>,
    users: BTreeMap<UserId, User>,
    emails: BTreeMap<EmailId, Email>,
    sessions: BTreeMap<SessionId, Session>,
    access_tokens: BTreeMap<AccessTokenId, AccessToken>,
    communities: BTreeMap<CommunityId, Community>,
    memberships: BTreeMap<CommunityMembershipId, CommunityMembership>,
    posts: BTreeMap<PostId, Post>,
}

impl Tables {
    fn pure_user(&self, id: UserId) -> Option<Box<User>> {
        self.users.get(&id).map(|u| Box::new(u.pure_copy()))
    }

    fn pure_community(&self, id: CommunityId) -> Option<Box<Community>> {
        self.communities.get(&id).map(|c| Box::new(c.pure_copy()))
    }

    fn user_with(&self, user: &User, include: UserInclude) -> User {
        let mut user = user.pure_copy();
        if include.email {
            user.email = self
                .emails
                .values()
                .find(|e| e.user_id == user.id)
                .map(|e| Box::new(e.pure_copy()));
        }
        if include.sessions {
            user.sessions = Some(self.sessions_of(user.id));
        }
        if include.access_tokens {
            user.access_tokens = Some(
                self.access_tokens
                    .values()
                    .filter(|t| t.user_id == user.id)
                    .cloned()
                    .collect(),
            );
        }
        user
    }

    fn sessions_of(&self, user_id: UserId) -> Vec<Session> {
        let mut sessions: Vec<Session> = self
            .sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sessions
    }

    fn email_with(&self, email: &Email, include_user: bool) -> Email {
        let mut email = email.pure_copy();
        if include_user {
            email.user = self.pure_user(email.user_id);
        }
        email
    }

    fn session_with(&self, session: &Session, include_user: bool) -> Session {
        let mut session = session.pure_copy();
        if include_user {
            session.user = self.pure_user(session.user_id);
        }
        session
    }

    fn token_with(&self, token: &AccessToken, include_user: bool) -> AccessToken {
        let mut token = token.pure_copy();
        if include_user {
            token.user = self.pure_user(token.user_id);
        }
        token
    }

    fn community_with(&self, community: &Community, include_creator: bool) -> Community {
        let mut community = community.pure_copy();
        if include_creator {
            community.creator = self.pure_user(community.creator_id);
        }
        community
    }

    fn membership_with(
        &self,
        membership: &CommunityMembership,
        include: CommunityMembershipInclude,
    ) -> CommunityMembership {
        let mut membership = membership.pure_copy();
        if include.user {
            membership.user = self.pure_user(membership.user_id);
        }
        if include.community {
            membership.community = self.pure_community(membership.community_id);
        }
        membership
    }

    fn post_with(&self, post: &Post, include: PostInclude) -> Post {
        let mut post = post.pure_copy();
        if include.author {
            post.author = self.pure_user(post.author_id);
        }
        if include.community {
            post.community = self.pure_community(post.community_id);
        }
        post
    }

    fn delete_community_rows(&mut self, id: CommunityId) {
        self.communities.remove(&id);
        self.memberships.retain(|_, m| m.community_id != id);
        self.posts.retain(|_, p| p.community_id != id);
    }
}

/// Postgres stand-in: one lock over all tables, unique keys reported as
/// conflicts and deletes cascading like the foreign keys do.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock()
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            globals: self.clone(),
            users: self.clone(),
            emails: self.clone(),
            sessions: self.clone(),
            access_tokens: self.clone(),
            communities: self.clone(),
            community_memberships: self.clone(),
            posts: self.clone(),
        }
    }
}

fn conflict(name: ErrorName) -> AppError {
    AppError::conflict(name, "Resource already exists")
}

fn missing(table: &str) -> AppError {
    AppError::Internal(format!("{} row vanished", table))
}

fn not_found(name: ErrorName) -> AppError {
    AppError::not_found(name, "Row not found")
}

#[async_trait]
impl GlobalRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Global>, AppError> {
        Ok(self.lock().globals.values().cloned().collect())
    }

    async fn get_by_id(&self, id: GlobalId) -> Result<Option<Global>, AppError> {
        Ok(self.lock().globals.get(&id.value()).cloned())
    }

    async fn create(&self, global: &Global) -> Result<Global, AppError> {
        let mut t = self.lock();
        if t.globals.contains_key(&global.id.value()) {
            return Err(conflict(ErrorName::GlobalExists));
        }
        t.globals.insert(global.id.value(), global.clone());
        Ok(global.clone())
    }

    async fn update(&self, global: &Global) -> Result<Global, AppError> {
        let mut t = self.lock();
        let row = t.globals.get_mut(&global.id.value()).ok_or_else(|| missing("globals"))?;
        *row = Global {
            modified_at: Utc::now(),
            ..global.clone()
        };
        Ok(row.clone())
    }

    async fn delete(&self, id: GlobalId) -> Result<(), AppError> {
        self.lock()
            .globals
            .remove(&id.value())
            .map(|_| ())
            .ok_or_else(|| not_found(ErrorName::GlobalNotFound))
    }

    async fn exists_by_id(&self, id: GlobalId) -> Result<bool, AppError> {
        Ok(self.lock().globals.contains_key(&id.value()))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn list(&self, include: UserInclude) -> Result<Vec<User>, AppError> {
        let t = self.lock();
        Ok(t.users.values().map(|u| t.user_with(u, include)).collect())
    }

    async fn get_by_id(&self, id: UserId, include: UserInclude) -> Result<Option<User>, AppError> {
        let t = self.lock();
        Ok(t.users.get(&id).map(|u| t.user_with(u, include)))
    }

    async fn get_by_username(
        &self,
        username: &str,
        include: UserInclude,
    ) -> Result<Option<User>, AppError> {
        let t = self.lock();
        Ok(t
            .users
            .values()
            .find(|u| u.username == username)
            .map(|u| t.user_with(u, include)))
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut t = self.lock();
        if t.users.values().any(|u| u.username == user.username) {
            return Err(conflict(ErrorName::UsernameExists));
        }
        t.users.insert(user.id, user.pure_copy());
        Ok(user.pure_copy())
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut t = self.lock();
        let row = t.users.get_mut(&user.id).ok_or_else(|| missing("users"))?;
        *row = User {
            modified_at: Utc::now(),
            ..user.pure_copy()
        };
        Ok(row.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), AppError> {
        let mut t = self.lock();
        t.users.remove(&id).ok_or_else(|| not_found(ErrorName::UserNotFound))?;
        t.emails.retain(|_, e| e.user_id != id);
        t.sessions.retain(|_, s| s.user_id != id);
        t.access_tokens.retain(|_, a| a.user_id != id);
        let created: Vec<CommunityId> = t
            .communities
            .values()
            .filter(|c| c.creator_id == id)
            .map(|c| c.id)
            .collect();
        for community_id in created {
            t.delete_community_rows(community_id);
        }
        t.memberships.retain(|_, m| m.user_id != id);
        t.posts.retain(|_, p| p.author_id != id);
        Ok(())
    }

    async fn exists_by_id(&self, id: UserId) -> Result<bool, AppError> {
        Ok(self.lock().users.contains_key(&id))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.lock().users.values().any(|u| u.username == username))
    }
}

#[async_trait]
impl EmailRepository for MemoryStore {
    async fn get_by_id(&self, id: EmailId, include_user: bool) -> Result<Option<Email>, AppError> {
        let t = self.lock();
        Ok(t.emails.get(&id).map(|e| t.email_with(e, include_user)))
    }

    async fn get_by_address(
        &self,
        address: &str,
        include_user: bool,
    ) -> Result<Option<Email>, AppError> {
        let t = self.lock();
        Ok(t
            .emails
            .values()
            .find(|e| e.address == address)
            .map(|e| t.email_with(e, include_user)))
    }

    async fn get_by_user_id(
        &self,
        user_id: UserId,
        include_user: bool,
    ) -> Result<Option<Email>, AppError> {
        let t = self.lock();
        Ok(t
            .emails
            .values()
            .find(|e| e.user_id == user_id)
            .map(|e| t.email_with(e, include_user)))
    }

    async fn create(&self, email: &Email) -> Result<Email, AppError> {
        let mut t = self.lock();
        if t.emails
            .values()
            .any(|e| e.address == email.address || e.user_id == email.user_id)
        {
            return Err(conflict(ErrorName::EmailAddressExists));
        }
        t.emails.insert(email.id, email.pure_copy());
        Ok(email.pure_copy())
    }

    async fn update(&self, email: &Email) -> Result<Email, AppError> {
        let mut t = self.lock();
        let row = t.emails.get_mut(&email.id).ok_or_else(|| missing("emails"))?;
        *row = Email {
            modified_at: Utc::now(),
            ..email.pure_copy()
        };
        Ok(row.clone())
    }

    async fn delete(&self, id: EmailId) -> Result<(), AppError> {
        self.lock()
            .emails
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(ErrorName::EmailNotFound))
    }

    async fn exists_by_id(&self, id: EmailId) -> Result<bool, AppError> {
        Ok(self.lock().emails.contains_key(&id))
    }

    async fn exists_by_address(&self, address: &str) -> Result<bool, AppError> {
        Ok(self.lock().emails.values().any(|e| e.address == address))
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn list_by_user(
        &self,
        user_id: UserId,
        include_user: bool,
    ) -> Result<Vec<Session>, AppError> {
        let t = self.lock();
        Ok(t
            .sessions_of(user_id)
            .iter()
            .map(|s| t.session_with(s, include_user))
            .collect())
    }

    async fn get_by_id(
        &self,
        id: SessionId,
        include_user: bool,
    ) -> Result<Option<Session>, AppError> {
        let t = self.lock();
        Ok(t.sessions.get(&id).map(|s| t.session_with(s, include_user)))
    }

    async fn create(&self, session: &Session) -> Result<Session, AppError> {
        self.lock().sessions.insert(session.id, session.pure_copy());
        Ok(session.pure_copy())
    }

    async fn update(&self, session: &Session) -> Result<Session, AppError> {
        let mut t = self.lock();
        let row = t.sessions.get_mut(&session.id).ok_or_else(|| missing("sessions"))?;
        *row = Session {
            modified_at: Utc::now(),
            ..session.pure_copy()
        };
        Ok(row.clone())
    }

    async fn delete(&self, id: SessionId) -> Result<(), AppError> {
        self.lock()
            .sessions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(ErrorName::SessionNotFound))
    }

    async fn exists_by_id(&self, id: SessionId) -> Result<bool, AppError> {
        Ok(self.lock().sessions.contains_key(&id))
    }
}

#[async_trait]
impl AccessTokenRepository for MemoryStore {
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<AccessToken>, AppError> {
        Ok(self
            .lock()
            .access_tokens
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_by_id(
        &self,
        id: AccessTokenId,
        include_user: bool,
    ) -> Result<Option<AccessToken>, AppError> {
        let t = self.lock();
        Ok(t.access_tokens.get(&id).map(|a| t.token_with(a, include_user)))
    }

    async fn get_by_value(
        &self,
        value: &str,
        include_user: bool,
    ) -> Result<Option<AccessToken>, AppError> {
        let t = self.lock();
        Ok(t
            .access_tokens
            .values()
            .find(|a| a.value == value)
            .map(|a| t.token_with(a, include_user)))
    }

    async fn create(&self, token: &AccessToken) -> Result<AccessToken, AppError> {
        let mut t = self.lock();
        if t.access_tokens.values().any(|a| a.value == token.value) {
            return Err(conflict(ErrorName::AccessTokenExists));
        }
        t.access_tokens.insert(token.id, token.pure_copy());
        Ok(token.pure_copy())
    }

    async fn delete(&self, id: AccessTokenId) -> Result<(), AppError> {
        self.lock()
            .access_tokens
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(ErrorName::AccessTokenNotFound))
    }

    async fn delete_by_session(&self, session_id: SessionId) -> Result<u64, AppError> {
        let mut t = self.lock();
        let before = t.access_tokens.len();
        t.access_tokens.retain(|_, a| a.session_id != session_id);
        Ok((before - t.access_tokens.len()) as u64)
    }

    async fn exists_by_id(&self, id: AccessTokenId) -> Result<bool, AppError> {
        Ok(self.lock().access_tokens.contains_key(&id))
    }

    async fn exists_by_value(&self, value: &str) -> Result<bool, AppError> {
        Ok(self.lock().access_tokens.values().any(|a| a.value == value))
    }
}

#[async_trait]
impl CommunityRepository for MemoryStore {
    async fn list(
        &self,
        filter: CommunityFilter,
        include_creator: bool,
    ) -> Result<Vec<Community>, AppError> {
        let t = self.lock();
        let mut matching: Vec<&Community> =
            t.communities.values().filter(|c| filter.matches(c)).collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .map(|c| t.community_with(c, include_creator))
            .collect())
    }

    async fn get_by_id(
        &self,
        id: CommunityId,
        include_creator: bool,
    ) -> Result<Option<Community>, AppError> {
        let t = self.lock();
        Ok(t.communities.get(&id).map(|c| t.community_with(c, include_creator)))
    }

    async fn get_by_name(
        &self,
        name: &str,
        include_creator: bool,
    ) -> Result<Option<Community>, AppError> {
        let t = self.lock();
        Ok(t
            .communities
            .values()
            .find(|c| c.name == name)
            .map(|c| t.community_with(c, include_creator)))
    }

    async fn create(&self, community: &Community) -> Result<Community, AppError> {
        let mut t = self.lock();
        if t.communities.values().any(|c| c.name == community.name) {
            return Err(conflict(ErrorName::CommunityNameExists));
        }
        t.communities.insert(community.id, community.pure_copy());
        Ok(community.pure_copy())
    }

    async fn update(&self, community: &Community) -> Result<Community, AppError> {
        let mut t = self.lock();
        if t.communities
            .values()
            .any(|c| c.name == community.name && c.id != community.id)
        {
            return Err(conflict(ErrorName::CommunityNameExists));
        }
        let row = t
            .communities
            .get_mut(&community.id)
            .ok_or_else(|| missing("communities"))?;
        *row = Community {
            modified_at: Utc::now(),
            ..community.pure_copy()
        };
        let saved = row.clone();
        for post in t.posts.values_mut().filter(|p| p.community_id == saved.id) {
            post.community_name = saved.name.clone();
        }
        for m in t.memberships.values_mut().filter(|m| m.community_id == saved.id) {
            m.community_name = saved.name.clone();
        }
        Ok(saved)
    }

    async fn delete(&self, id: CommunityId) -> Result<(), AppError> {
        let mut t = self.lock();
        if !t.communities.contains_key(&id) {
            return Err(not_found(ErrorName::CommunityNotFound));
        }
        t.delete_community_rows(id);
        Ok(())
    }

    async fn exists_by_id(&self, id: CommunityId) -> Result<bool, AppError> {
        Ok(self.lock().communities.contains_key(&id))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, AppError> {
        Ok(self.lock().communities.values().any(|c| c.name == name))
    }
}

#[async_trait]
impl CommunityMembershipRepository for MemoryStore {
    async fn list_by_user(
        &self,
        user_id: UserId,
        include: CommunityMembershipInclude,
    ) -> Result<Vec<CommunityMembership>, AppError> {
        let t = self.lock();
        Ok(t
            .memberships
            .values()
            .filter(|m| m.user_id == user_id)
            .map(|m| t.membership_with(m, include))
            .collect())
    }

    async fn get_by_id(
        &self,
        id: CommunityMembershipId,
        include: CommunityMembershipInclude,
    ) -> Result<Option<CommunityMembership>, AppError> {
        let t = self.lock();
        Ok(t.memberships.get(&id).map(|m| t.membership_with(m, include)))
    }

    async fn create(
        &self,
        membership: &CommunityMembership,
    ) -> Result<CommunityMembership, AppError> {
        let mut t = self.lock();
        if t.memberships.values().any(|m| {
            m.user_id == membership.user_id && m.community_id == membership.community_id
        }) {
            return Err(conflict(ErrorName::CommunityMembershipExists));
        }
        t.memberships.insert(membership.id, membership.pure_copy());
        Ok(membership.pure_copy())
    }

    async fn delete(&self, id: CommunityMembershipId) -> Result<(), AppError> {
        self.lock()
            .memberships
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(ErrorName::CommunityMembershipNotFound))
    }

    async fn exists_by_id(&self, id: CommunityMembershipId) -> Result<bool, AppError> {
        Ok(self.lock().memberships.contains_key(&id))
    }

    async fn exists(&self, user_id: UserId, community_id: CommunityId) -> Result<bool, AppError> {
        Ok(self
            .lock()
            .memberships
            .values()
            .any(|m| m.user_id == user_id && m.community_id == community_id))
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn list(&self, filter: PostFilter, include: PostInclude) -> Result<Vec<Post>, AppError> {
        let t = self.lock();
        let mut matching: Vec<&Post> = t.posts.values().filter(|p| filter.matches(p)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .map(|p| t.post_with(p, include))
            .collect())
    }

    async fn get_by_id(&self, id: PostId, include: PostInclude) -> Result<Option<Post>, AppError> {
        let t = self.lock();
        Ok(t.posts.get(&id).map(|p| t.post_with(p, include)))
    }

    async fn create(&self, post: &Post) -> Result<Post, AppError> {
        self.lock().posts.insert(post.id, post.pure_copy());
        Ok(post.pure_copy())
    }

    async fn update(&self, post: &Post) -> Result<Post, AppError> {
        let mut t = self.lock();
        let row = t.posts.get_mut(&post.id).ok_or_else(|| missing("posts"))?;
        *row = Post {
            modified_at: Utc::now(),
            ..post.pure_copy()
        };
        Ok(row.clone())
    }

    async fn delete(&self, id: PostId) -> Result<(), AppError> {
        self.lock()
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(ErrorName::PostNotFound))
    }

    async fn exists_by_id(&self, id: PostId) -> Result<bool, AppError> {
        Ok(self.lock().posts.contains_key(&id))
    }
}

// ============================================================================
// Outbound doubles
// ============================================================================

/// Keeps every email the server tried to send.
#[derive(Default)]
pub struct Outbox {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl Outbox {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().clone()
    }

    pub fn last_to(&self, address: &str) -> Option<OutgoingEmail> {
        self.sent()
            .into_iter()
            .rev()
            .find(|e| e.to_address == address)
    }
}

#[async_trait]
impl EmailGateway for Outbox {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        self.sent.lock().push(email);
        Ok(())
    }
}

struct AlwaysReady;

#[async_trait]
impl ReadinessCheck for AlwaysReady {
    async fn ping(&self) -> Result<(), String> {
        Ok(())
    }
}

// ============================================================================
// Test application
// ============================================================================

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "postgres://unused".into(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout: 1,
            run_migrations: false,
        },
        auth: AuthSettings::default(),
        snowflake: SnowflakeSettings {
            machine_id: 1,
            epoch: FIREPLACE_EPOCH,
        },
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        globals: GlobalSettings {
            id: "test".into(),
            ..GlobalSettings::default()
        },
        environment: "test".into(),
    }
}

/// Test application over the in-memory store
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub outbox: Arc<Outbox>,
}

/// A decoded response.
pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl TestResponse {
    /// `name=value` part of the `Set-Cookie` header.
    pub fn cookie_pair(&self) -> Option<String> {
        self.set_cookie
            .as_deref()
            .and_then(|c| c.split(';').next())
            .map(str::to_string)
    }
}

impl TestApp {
    /// Create a new test application with in-memory dependencies
    pub fn new() -> Self {
        let settings = test_settings();
        let store = Arc::new(MemoryStore::default());
        let outbox = Arc::new(Outbox::default());

        let services = Services::new(
            store.repositories(),
            outbox.clone(),
            Arc::new(SnowflakeGenerator::new(1, FIREPLACE_EPOCH)),
            Arc::new(settings.globals.values()),
            settings.auth.token_length,
        );
        let state = AppState {
            services,
            settings: Arc::new(settings),
            health: Arc::new(AlwaysReady),
        };

        Self {
            router: build_router(state),
            store,
            outbox,
        }
    }

    /// Send a request; `auth` is a `name=value` cookie pair.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        auth: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = auth {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// POST an arbitrary payload, for bodies that are not valid JSON.
    pub async fn post_raw(
        &self,
        uri: &str,
        content_type: &str,
        body: &'static str,
        auth: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type);
        if let Some(cookie) = auth {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response: Response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            set_cookie,
            body,
        }
    }

    pub async fn get(&self, uri: &str, auth: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, None, auth).await
    }

    pub async fn post(&self, uri: &str, body: Value, auth: Option<&str>) -> TestResponse {
        self.request(Method::POST, uri, Some(body), auth).await
    }

    pub async fn patch(&self, uri: &str, body: Value, auth: &str) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body), Some(auth)).await
    }

    pub async fn delete(&self, uri: &str, auth: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None, Some(auth)).await
    }

    /// Sign up and return the session cookie pair.
    pub async fn sign_up(&self, email_address: &str, username: &str) -> String {
        let response = self
            .post(
                "/users/sign-up-with-email",
                serde_json::json!({
                    "email_address": email_address,
                    "username": username,
                    "password": PASSWORD,
                }),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.cookie_pair().expect("sign-up sets a cookie")
    }

    /// Sign up a user with a generated address.
    pub async fn sign_up_fake(&self, username: &str) -> String {
        let email: String = SafeEmail().fake();
        self.sign_up(&email, username).await
    }
}

/// The code at the end of an activation or reset-password email.
pub fn code_in(email: &OutgoingEmail) -> String {
    email
        .body
        .trim_end_matches('.')
        .rsplit(' ')
        .next()
        .unwrap_or_default()
        .to_string()
}
