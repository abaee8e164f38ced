//! Access Token Repository Implementation

use async_trait::async_trait;
use sqlx::PgPool;

use super::loaders;
use crate::domain::models::{AccessToken, AccessTokenRepository};
use crate::domain::value_objects::{AccessTokenId, SessionId, UserId};
use crate::infrastructure::converters::{AccessTokenConverter, Converter};
use crate::infrastructure::database::{map_write_error, PgUnitOfWork};
use crate::infrastructure::entities::{AccessTokenEntity, ACCESS_TOKEN_COLUMNS};
use crate::shared::error::{AppError, ErrorName};

const CONFLICTS: &[(&str, ErrorName)] =
    &[("access_tokens_value_key", ErrorName::AccessTokenExists)];

/// PostgreSQL access token repository implementation.
#[derive(Clone)]
pub struct PgAccessTokenRepository {
    pool: PgPool,
    uow: PgUnitOfWork,
    converter: AccessTokenConverter,
}

impl PgAccessTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            uow: PgUnitOfWork::from_pool(pool.clone()),
            pool,
            converter: AccessTokenConverter,
        }
    }

    async fn get_one<T>(
        &self,
        column: &str,
        value: T,
        include_user: bool,
    ) -> Result<Option<AccessToken>, AppError>
    where
        T: for<'q> sqlx::Encode<'q, sqlx::Postgres> + sqlx::Type<sqlx::Postgres> + Send + 'static,
    {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, AccessTokenEntity>(&format!(
            "SELECT {ACCESS_TOKEN_COLUMNS} FROM access_tokens WHERE {column} = $1"
        ))
        .bind(value)
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
                |t: &AccessTokenEntity| t.user_id,
                |t: &mut AccessTokenEntity, u| t.user = u,
            )
            .await?;
        }
        Ok(Some(self.converter.to_model(&rows[0])))
    }
}

#[async_trait]
impl AccessTokenRepository for PgAccessTokenRepository {
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<AccessToken>, AppError> {
        let rows = sqlx::query_as::<_, AccessTokenEntity>(&format!(
            "SELECT {ACCESS_TOKEN_COLUMNS} FROM access_tokens WHERE user_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|r| self.converter.to_model(r)).collect())
    }

    async fn get_by_id(
        &self,
        id: AccessTokenId,
        include_user: bool,
    ) -> Result<Option<AccessToken>, AppError> {
        self.get_one("id", id.value(), include_user).await
    }

    async fn get_by_value(
        &self,
        value: &str,
        include_user: bool,
    ) -> Result<Option<AccessToken>, AppError> {
        self.get_one("value", value.to_string(), include_user)
            .await
    }

    async fn create(&self, token: &AccessToken) -> Result<AccessToken, AppError> {
        let entity = self.converter.to_entity(&token.pure_copy());
        let mut tx = self.uow.begin().await?;
        let row = sqlx::query_as::<_, AccessTokenEntity>(&format!(
            r#"
            INSERT INTO access_tokens (id, user_id, session_id, value, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ACCESS_TOKEN_COLUMNS}
            "#
        ))
        .bind(entity.id)
        .bind(entity.user_id)
        .bind(entity.session_id)
        .bind(&entity.value)
        .bind(entity.created_at)
        .bind(entity.modified_at)
        .fetch_one(tx.conn())
        .await
        .map_err(|e| map_write_error(e, CONFLICTS))?;
        tx.commit().await?;

        Ok(self.converter.to_model(&row))
    }

    async fn delete(&self, id: AccessTokenId) -> Result<(), AppError> {
        let mut tx = self.uow.begin().await?;
        let result = sqlx::query("DELETE FROM access_tokens WHERE id = $1")
            .bind(id.value())
            .execute(tx.conn())
            .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                ErrorName::AccessTokenNotFound,
                format!("Access token {} not found", id),
            ));
        }
        Ok(())
    }

    async fn delete_by_session(&self, session_id: SessionId) -> Result<u64, AppError> {
        let mut tx = self.uow.begin().await?;
        let result = sqlx::query("DELETE FROM access_tokens WHERE session_id = $1")
            .bind(session_id.value())
            .execute(tx.conn())
            .await?;
        tx.commit().await?;

        Ok(result.rows_affected())
    }

    async fn exists_by_id(&self, id: AccessTokenId) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM access_tokens WHERE id = $1)",
        )
        .bind(id.value())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn exists_by_value(&self, value: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM access_tokens WHERE value = $1)",
        )
        .bind(value)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
