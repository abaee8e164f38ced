//! Usernames, community names and email addresses.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidateEmail;

use crate::shared::error::{AppError, ErrorName, FieldName};
use crate::shared::validation::validate_char_length;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 30;
pub const COMMUNITY_NAME_MIN_LENGTH: usize = 3;
pub const COMMUNITY_NAME_MAX_LENGTH: usize = 50;
pub const EMAIL_ADDRESS_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let invalid = |message: &str| {
            AppError::validation(
                ErrorName::UsernameInvalidFormat,
                FieldName::Username,
                message.to_string(),
            )
        };

        validate_char_length(
            raw,
            USERNAME_MIN_LENGTH,
            USERNAME_MAX_LENGTH,
            ErrorName::UsernameInvalidFormat,
            FieldName::Username,
        )?;
        if !raw.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(invalid("username must start with a letter"));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(invalid(
                "username may only contain letters, digits, '_' and '-'",
            ));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommunityName(String);

impl CommunityName {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let invalid = |message: &str| {
            AppError::validation(
                ErrorName::CommunityNameInvalidFormat,
                FieldName::CommunityName,
                message.to_string(),
            )
        };

        validate_char_length(
            raw,
            COMMUNITY_NAME_MIN_LENGTH,
            COMMUNITY_NAME_MAX_LENGTH,
            ErrorName::CommunityNameInvalidFormat,
            FieldName::CommunityName,
        )?;
        if !raw.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(invalid("community name must start with a lowercase letter"));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(invalid(
                "community name may only contain lowercase letters, digits and '-'",
            ));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Lower-cased, shape-checked email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.len() > EMAIL_ADDRESS_MAX_LENGTH || !trimmed.validate_email() {
            return Err(AppError::validation(
                ErrorName::EmailAddressInvalidFormat,
                FieldName::EmailAddress,
                format!("'{}' is not a valid email address", raw),
            ));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! impl_display_as_str {
    ($($name:ident),*) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }
        )*
    };
}

impl_display_as_str!(Username, CommunityName, EmailAddress);
