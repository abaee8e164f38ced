//! Session Repository Implementation

use async_trait::async_trait;
use sqlx::PgPool;

use super::loaders;
use crate::domain::models::{Session, SessionRepository};
use crate::domain::value_objects::{SessionId, UserId};
use crate::infrastructure::converters::{Converter, SessionConverter};
use crate::infrastructure::database::{map_write_error, row_vanished, PgUnitOfWork};
use crate::infrastructure::entities::{SessionEntity, SESSION_COLUMNS};
use crate::shared::error::{AppError, ErrorName};

/// PostgreSQL session repository implementation.
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
    uow: PgUnitOfWork,
    converter: SessionConverter,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            uow: PgUnitOfWork::from_pool(pool.clone()),
            pool,
            converter: SessionConverter,
        }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn list_by_user(
        &self,
        user_id: UserId,
        include_user: bool,
    ) -> Result<Vec<Session>, AppError> {
        let mut conn = self.pool.acquire().await?;
        let mut rows = sqlx::query_as::<_, SessionEntity>(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id.value())
        .fetch_all(&mut *conn)
        .await?;

        if include_user {
            loaders::attach_users(
                &mut conn,
                &mut rows,
                |s: &SessionEntity| s.user_id,
                |s: &mut SessionEntity, u| s.user = u,
            )
            .await?;
        }
        Ok(rows.iter().map(|r| self.converter.to_model(r)).collect())
    }

    async fn get_by_id(
        &self,
        id: SessionId,
        include_user: bool,
    ) -> Result<Option<Session>, AppError> {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, SessionEntity>(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&mut *conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut rows = [row];
        if include_user {
            loaders::attach_users(
                &mut conn,
                &mut rows,
                |s: &SessionEntity| s.user_id,
                |s: &mut SessionEntity, u| s.user = u,
            )
            .await?;
        }
        Ok(Some(self.converter.to_model(&rows[0])))
    }

    async fn create(&self, session: &Session) -> Result<Session, AppError> {
        let entity = self.converter.to_entity(&session.pure_copy());
        let mut tx = self.uow.begin().await?;
        let row = sqlx::query_as::<_, SessionEntity>(&format!(
            r#"
            INSERT INTO sessions (id, user_id, ip_address, state, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SESSION_COLUMNS}
            "#
        ))
        .bind(entity.id)
        .bind(entity.user_id)
        .bind(&entity.ip_address)
        .bind(&entity.state)
        .bind(entity.created_at)
        .bind(entity.modified_at)
        .fetch_one(tx.conn())
        .await
        .map_err(|e| map_write_error(e, &[]))?;
        tx.commit().await?;

        Ok(self.converter.to_model(&row))
    }

    async fn update(&self, session: &Session) -> Result<Session, AppError> {
        let entity = self.converter.to_entity(&session.pure_copy());
        let mut tx = self.uow.begin().await?;
        let row = sqlx::query_as::<_, SessionEntity>(&format!(
            r#"
            UPDATE sessions
            SET ip_address = $2,
                state = $3,
                modified_at = NOW()
            WHERE id = $1
            RETURNING {SESSION_COLUMNS}
            "#
        ))
        .bind(entity.id)
        .bind(&entity.ip_address)
        .bind(&entity.state)
        .fetch_optional(tx.conn())
        .await
        .map_err(|e| map_write_error(e, &[]))?
        .ok_or_else(|| row_vanished("sessions", entity.id))?;
        tx.commit().await?;

        Ok(self.converter.to_model(&row))
    }

    async fn delete(&self, id: SessionId) -> Result<(), AppError> {
        let mut tx = self.uow.begin().await?;
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id.value())
            .execute(tx.conn())
            .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                ErrorName::SessionNotFound,
                format!("Session {} not found", id),
            ));
        }
        Ok(())
    }

    async fn exists_by_id(&self, id: SessionId) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM sessions WHERE id = $1)")
                .bind(id.value())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
