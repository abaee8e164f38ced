//! Repository Implementations
//!
//! PostgreSQL implementations of the repository traits defined next to each
//! domain model. Reads run on one pooled connection and eagerly load the
//! requested relations; writes run inside a [`PgUnitOfWork`] transaction.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use fireplace_api::infrastructure::repositories::{PgCommunityRepository, PgUserRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let community_repo = PgCommunityRepository::new(pool);
//! }
//! ```
//!
//! [`PgUnitOfWork`]: crate::infrastructure::database::PgUnitOfWork

mod loaders;

pub mod access_token_repository;
pub mod community_membership_repository;
pub mod community_repository;
pub mod email_repository;
pub mod global_repository;
pub mod post_repository;
pub mod session_repository;
pub mod user_repository;

pub use access_token_repository::PgAccessTokenRepository;
pub use community_membership_repository::PgCommunityMembershipRepository;
pub use community_repository::PgCommunityRepository;
pub use email_repository::PgEmailRepository;
pub use global_repository::PgGlobalRepository;
pub use post_repository::PgPostRepository;
pub use session_repository::PgSessionRepository;
pub use user_repository::PgUserRepository;

/// Build an `ILIKE` pattern matching `search` anywhere, with the LIKE
/// wildcards in `search` escaped.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
