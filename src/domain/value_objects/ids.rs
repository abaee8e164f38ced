//! Strongly typed identifiers.
//!
//! Every persisted row has a Snowflake id wrapped in its own newtype, so a
//! `PostId` can never be passed where a `UserId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::error::{AppError, ErrorName, FieldName};

fn parse_id(s: &str) -> Result<i64, AppError> {
    s.parse::<i64>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| {
            AppError::validation(
                ErrorName::IdInvalidFormat,
                FieldName::Id,
                format!("'{}' is not a valid id", s),
            )
        })
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_id(s).map(Self)
            }
        }
    };
}

define_id!(UserId);
define_id!(EmailId);
define_id!(SessionId);
define_id!(AccessTokenId);
define_id!(CommunityId);
define_id!(CommunityMembershipId);
define_id!(PostId);

/// Which configuration row of the `globals` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalId {
    Main = 1,
    Test = 2,
}

impl GlobalId {
    pub fn value(&self) -> i32 {
        *self as i32
    }

    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Main),
            2 => Some(Self::Test),
            _ => None,
        }
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str("main"),
            Self::Test => f.write_str("test"),
        }
    }
}

impl FromStr for GlobalId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "1" => Ok(Self::Main),
            "test" | "2" => Ok(Self::Test),
            _ => Err(AppError::validation(
                ErrorName::IdInvalidFormat,
                FieldName::Id,
                format!("'{}' is not a valid global id", s),
            )),
        }
    }
}

/// A path segment that may be either a numeric id or a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdOrName<Id> {
    Id(Id),
    Name(String),
}

impl<Id: FromStr<Err = AppError>> IdOrName<Id> {
    /// All-digit segments are ids; anything else is a name.
    pub fn parse(segment: &str) -> Result<Self, AppError> {
        if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
            segment.parse().map(Self::Id)
        } else {
            Ok(Self::Name(segment.to_string()))
        }
    }
}

impl<Id: fmt::Display> fmt::Display for IdOrName<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Name(name) => f.write_str(name),
        }
    }
}
