//! Global Repository Implementation
//!
//! `values` is a reserved word in SQL and is always quoted.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::models::{Global, GlobalRepository};
use crate::domain::value_objects::GlobalId;
use crate::infrastructure::converters::{Converter, GlobalConverter};
use crate::infrastructure::database::{map_write_error, row_vanished, PgUnitOfWork};
use crate::infrastructure::entities::{GlobalEntity, GLOBAL_COLUMNS};
use crate::shared::error::{AppError, ErrorName};

const CONFLICTS: &[(&str, ErrorName)] = &[("globals_pkey", ErrorName::GlobalExists)];

/// PostgreSQL global repository implementation.
#[derive(Clone)]
pub struct PgGlobalRepository {
    pool: PgPool,
    uow: PgUnitOfWork,
    converter: GlobalConverter,
}

impl PgGlobalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            uow: PgUnitOfWork::from_pool(pool.clone()),
            pool,
            converter: GlobalConverter,
        }
    }
}

#[async_trait]
impl GlobalRepository for PgGlobalRepository {
    async fn list(&self) -> Result<Vec<Global>, AppError> {
        let rows = sqlx::query_as::<_, GlobalEntity>(&format!(
            "SELECT {GLOBAL_COLUMNS} FROM globals ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|r| self.converter.to_model(r)).collect())
    }

    async fn get_by_id(&self, id: GlobalId) -> Result<Option<Global>, AppError> {
        let row = sqlx::query_as::<_, GlobalEntity>(&format!(
            "SELECT {GLOBAL_COLUMNS} FROM globals WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| self.converter.to_model(&r)))
    }

    async fn create(&self, global: &Global) -> Result<Global, AppError> {
        let entity = self.converter.to_entity(global);
        let mut tx = self.uow.begin().await?;
        let row = sqlx::query_as::<_, GlobalEntity>(&format!(
            r#"
            INSERT INTO globals (id, "values", created_at, modified_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {GLOBAL_COLUMNS}
            "#
        ))
        .bind(entity.id)
        .bind(&entity.values)
        .bind(entity.created_at)
        .bind(entity.modified_at)
        .fetch_one(tx.conn())
        .await
        .map_err(|e| map_write_error(e, CONFLICTS))?;
        tx.commit().await?;

        tracing::info!(global_id = row.id, "Global created");
        Ok(self.converter.to_model(&row))
    }

    async fn update(&self, global: &Global) -> Result<Global, AppError> {
        let entity = self.converter.to_entity(global);
        let mut tx = self.uow.begin().await?;
        let row = sqlx::query_as::<_, GlobalEntity>(&format!(
            r#"
            UPDATE globals
            SET "values" = $2,
                modified_at = NOW()
            WHERE id = $1
            RETURNING {GLOBAL_COLUMNS}
            "#
        ))
        .bind(entity.id)
        .bind(&entity.values)
        .fetch_optional(tx.conn())
        .await
        .map_err(|e| map_write_error(e, CONFLICTS))?
        .ok_or_else(|| row_vanished("globals", i64::from(entity.id)))?;
        tx.commit().await?;

        Ok(self.converter.to_model(&row))
    }

    async fn delete(&self, id: GlobalId) -> Result<(), AppError> {
        let mut tx = self.uow.begin().await?;
        let result = sqlx::query("DELETE FROM globals WHERE id = $1")
            .bind(id.value())
            .execute(tx.conn())
            .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                ErrorName::GlobalNotFound,
                format!("Global {} not found", id),
            ));
        }
        Ok(())
    }

    async fn exists_by_id(&self, id: GlobalId) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM globals WHERE id = $1)")
                .bind(id.value())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
