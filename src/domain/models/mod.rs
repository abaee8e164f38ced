//! # Domain Models
//!
//! In-memory models with optional, explicitly included relations, and the
//! repository traits that load and persist them.

mod access_token;
mod community;
mod community_membership;
mod email;
mod global;
mod post;
mod session;
mod user;

pub use access_token::*;
pub use community::*;
pub use community_membership::*;
pub use email::*;
pub use global::*;
pub use post::*;
pub use session::*;
pub use user::*;
