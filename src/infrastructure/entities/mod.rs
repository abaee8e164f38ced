//! Persistence Entities
//!
//! Row shapes of the Postgres tables. Foreign keys are plain ids; related
//! rows are attached by the repositories only when an include flag asks
//! for them.

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
