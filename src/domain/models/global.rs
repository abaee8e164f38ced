//! Global model and repository trait.
//!
//! Maps to the `globals` table: one row per deployment flavour holding the
//! process-wide settings as JSON.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::GlobalId;
use crate::shared::error::AppError;

/// Process-wide values read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalValues {
    pub site_name: String,
    pub api_base_url: String,
    pub email_sender_address: String,
    pub email_sender_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Global {
    pub id: GlobalId,
    pub values: GlobalValues,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Global {
    pub fn new(id: GlobalId, values: GlobalValues) -> Self {
        let now = Utc::now();
        Self {
            id,
            values,
            created_at: now,
            modified_at: now,
        }
    }

    /// Globals have no relations; kept for symmetry with the other models.
    pub fn pure_copy(&self) -> Self {
        self.clone()
    }
}

/// Repository trait for Global data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GlobalRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Global>, AppError>;

    async fn get_by_id(&self, id: GlobalId) -> Result<Option<Global>, AppError>;

    async fn create(&self, global: &Global) -> Result<Global, AppError>;

    async fn update(&self, global: &Global) -> Result<Global, AppError>;

    async fn delete(&self, id: GlobalId) -> Result<(), AppError>;

    async fn exists_by_id(&self, id: GlobalId) -> Result<bool, AppError>;
}
