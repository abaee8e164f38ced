//! # Validators
//!
//! Turn raw request values into the typed inputs services consume.
//!
//! Each aggregate check first asserts that every required field is present,
//! then checks formats in field order, failing on the first violation.

mod community;
mod email;
mod post;
mod user;

pub use community::*;
pub use email::*;
pub use post::*;
pub use user::*;

use std::str::FromStr;

use crate::shared::error::AppError;

/// Parse a path/query id such as `PostId` or `SessionId`.
pub fn validate_id<Id>(raw: &str) -> Result<Id, AppError>
where
    Id: FromStr<Err = AppError>,
{
    raw.parse()
}
