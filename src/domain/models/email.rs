//! Email model and repository trait.
//!
//! Maps to the `emails` table. Each user has at most one email.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;
use crate::domain::value_objects::{EmailId, UserId};
use crate::shared::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivationStatus {
    #[default]
    NotActivated,
    Activated,
}

impl ActivationStatus {
    pub fn from_db(s: &str) -> Self {
        match s {
            "activated" => Self::Activated,
            _ => Self::NotActivated,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotActivated => "not_activated",
            Self::Activated => "activated",
        }
    }
}

/// Activation state of an address and the code that unlocks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub status: ActivationStatus,
    pub code: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Email {
    pub id: EmailId,
    pub user_id: UserId,
    pub address: String,
    pub activation: Activation,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    pub user: Option<Box<User>>,
}

impl Email {
    pub fn new(id: EmailId, user_id: UserId, address: String, activation_code: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            address,
            activation: Activation {
                status: ActivationStatus::NotActivated,
                code: activation_code,
            },
            created_at: now,
            modified_at: now,
            user: None,
        }
    }

    pub fn pure_copy(&self) -> Self {
        Self {
            user: None,
            ..self.clone()
        }
    }

    pub fn is_activated(&self) -> bool {
        self.activation.status == ActivationStatus::Activated
    }
}

/// Repository trait for Email data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailRepository: Send + Sync {
    async fn get_by_id(&self, id: EmailId, include_user: bool) -> Result<Option<Email>, AppError>;

    async fn get_by_address(
        &self,
        address: &str,
        include_user: bool,
    ) -> Result<Option<Email>, AppError>;

    async fn get_by_user_id(
        &self,
        user_id: UserId,
        include_user: bool,
    ) -> Result<Option<Email>, AppError>;

    async fn create(&self, email: &Email) -> Result<Email, AppError>;

    async fn update(&self, email: &Email) -> Result<Email, AppError>;

    async fn delete(&self, id: EmailId) -> Result<(), AppError>;

    async fn exists_by_id(&self, id: EmailId) -> Result<bool, AppError>;

    async fn exists_by_address(&self, address: &str) -> Result<bool, AppError>;
}
