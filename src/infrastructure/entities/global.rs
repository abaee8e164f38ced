use chrono::{DateTime, Utc};
use sqlx::types::Json;

use crate::domain::models::GlobalValues;

/// Row of the `globals` table; `values` is a JSONB document.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct GlobalEntity {
    pub id: i32,
    pub values: Json<GlobalValues>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

pub const GLOBAL_COLUMNS: &str = "id, \"values\", created_at, modified_at";
