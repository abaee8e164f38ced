//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **Ids**: one Snowflake-backed newtype per entity, plus `GlobalId`
//! - **Password**: strength-checked plain password with Argon2 helpers
//! - **Names**: `Username`, `CommunityName` and `EmailAddress`

mod ids;
mod names;
mod password;

pub use ids::*;
pub use names::*;
pub use password::*;
