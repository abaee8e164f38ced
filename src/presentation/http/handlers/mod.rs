//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod access_token;
pub mod community;
pub mod community_membership;
pub mod email;
pub mod health;
pub mod post;
pub mod session;
pub mod user;
