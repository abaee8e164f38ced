//! Plain-text password with hashing helpers.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::fmt;

use crate::shared::error::{AppError, ErrorName, FieldName};
use crate::shared::validation::validate_char_length;

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// A password that passed the strength rules. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn parse(plain: &str, field: FieldName) -> Result<Self, AppError> {
        validate_char_length(
            plain,
            PASSWORD_MIN_LENGTH,
            PASSWORD_MAX_LENGTH,
            ErrorName::PasswordInvalidFormat,
            field,
        )?;

        let rules: [(fn(&char) -> bool, &str); 4] = [
            (char::is_ascii_lowercase, "a lowercase letter"),
            (char::is_ascii_uppercase, "an uppercase letter"),
            (char::is_ascii_digit, "a digit"),
            (|c: &char| !c.is_alphanumeric(), "a symbol"),
        ];
        for (rule, description) in rules {
            if !plain.chars().any(|c| rule(&c)) {
                return Err(AppError::validation(
                    ErrorName::PasswordInvalidFormat,
                    field,
                    format!("{} must contain {}", field, description),
                ));
            }
        }

        Ok(Self(plain.to_string()))
    }

    /// Hash with Argon2id and a random salt.
    pub fn hash(&self) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(self.0.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Check against a stored hash. A malformed hash never matches.
    pub fn verify(&self, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(self.0.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                false
            }
        }
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}
