//! Database Module
//!
//! PostgreSQL connection pool, migrations, transaction management and the
//! mapping of store failures onto typed application errors.

pub mod unit_of_work;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::config::DatabaseSettings;
use crate::shared::error::{AppError, ErrorName};

pub use unit_of_work::{PgUnitOfWork, TransactionContext};

const SERIALIZATION_FAILURE: &str = "40001";

/// Create a PostgreSQL connection pool
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(&settings.url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Map a write failure onto a typed error.
///
/// Unique violations become `Conflict`; `conflicts` maps a constraint name to
/// the error name reported for it, the first entry being the fallback.
/// Serialization failures are not retried and surface as `Internal`.
pub fn map_write_error(err: sqlx::Error, conflicts: &[(&str, ErrorName)]) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            let name = conflicts
                .iter()
                .find(|(c, _)| *c == constraint)
                .or_else(|| conflicts.first())
                .map(|(_, name)| *name);
            if let Some(name) = name {
                tracing::debug!(constraint, "Unique violation");
                return AppError::conflict(name, conflict_message(name));
            }
        }
        if db_err.code().as_deref() == Some(SERIALIZATION_FAILURE) {
            return AppError::Internal(format!("Concurrent update conflict: {}", db_err));
        }
    }
    AppError::Database(err)
}

/// `update` found no row to save.
pub fn row_vanished(table: &str, id: i64) -> AppError {
    AppError::Internal(format!("{} row {} vanished before it could be saved", table, id))
}

fn conflict_message(name: ErrorName) -> &'static str {
    match name {
        ErrorName::UsernameExists => "Username already exists",
        ErrorName::EmailAddressExists => "Email address already exists",
        ErrorName::CommunityNameExists => "Community name already exists",
        ErrorName::CommunityMembershipExists => "User is already a member of this community",
        ErrorName::AccessTokenExists => "Access token already exists",
        ErrorName::GlobalExists => "Global already exists",
        _ => "Resource already exists",
    }
}
