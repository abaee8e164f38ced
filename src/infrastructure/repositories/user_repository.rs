//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use super::loaders;
use crate::domain::models::{User, UserInclude, UserRepository};
use crate::domain::value_objects::UserId;
use crate::infrastructure::converters::{Converter, UserConverter};
use crate::infrastructure::database::{map_write_error, row_vanished, PgUnitOfWork};
use crate::infrastructure::entities::{UserEntity, USER_COLUMNS};
use crate::shared::error::{AppError, ErrorName};

const CONFLICTS: &[(&str, ErrorName)] = &[("users_username_key", ErrorName::UsernameExists)];

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
    uow: PgUnitOfWork,
    converter: UserConverter,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            uow: PgUnitOfWork::from_pool(pool.clone()),
            pool,
            converter: UserConverter,
        }
    }

    async fn get_one<T>(
        &self,
        column: &str,
        value: T,
        include: UserInclude,
    ) -> Result<Option<User>, AppError>
    where
        T: for<'q> sqlx::Encode<'q, sqlx::Postgres> + sqlx::Type<sqlx::Postgres> + Send + 'static,
    {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {column} = $1"
        ))
        .bind(value)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut rows = [row];
        loaders::attach_user_relations(&mut conn, &mut rows, include).await?;
        Ok(Some(self.converter.to_model(&rows[0])))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self, include: UserInclude) -> Result<Vec<User>, AppError> {
        let mut conn = self.pool.acquire().await?;
        let mut rows = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&mut *conn)
        .await?;

        loaders::attach_user_relations(&mut conn, &mut rows, include).await?;
        Ok(rows.iter().map(|r| self.converter.to_model(r)).collect())
    }

    async fn get_by_id(&self, id: UserId, include: UserInclude) -> Result<Option<User>, AppError> {
        self.get_one("id", id.value(), include).await
    }

    async fn get_by_username(
        &self,
        username: &str,
        include: UserInclude,
    ) -> Result<Option<User>, AppError> {
        self.get_one("username", username.to_string(), include)
            .await
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let entity = self.converter.to_entity(&user.pure_copy());
        let mut tx = self.uow.begin().await?;
        let row = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            INSERT INTO users (id, username, display_name, about, avatar_url, state,
                               password_hash, reset_password_code, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(entity.id)
        .bind(&entity.username)
        .bind(&entity.display_name)
        .bind(&entity.about)
        .bind(&entity.avatar_url)
        .bind(&entity.state)
        .bind(&entity.password_hash)
        .bind(&entity.reset_password_code)
        .bind(entity.created_at)
        .bind(entity.modified_at)
        .fetch_one(tx.conn())
        .await
        .map_err(|e| map_write_error(e, CONFLICTS))?;
        tx.commit().await?;

        tracing::debug!(user_id = row.id, "User created");
        Ok(self.converter.to_model(&row))
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let entity = self.converter.to_entity(&user.pure_copy());
        let mut tx = self.uow.begin().await?;
        let row = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            UPDATE users
            SET username = $2,
                display_name = $3,
                about = $4,
                avatar_url = $5,
                state = $6,
                password_hash = $7,
                reset_password_code = $8,
                modified_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(entity.id)
        .bind(&entity.username)
        .bind(&entity.display_name)
        .bind(&entity.about)
        .bind(&entity.avatar_url)
        .bind(&entity.state)
        .bind(&entity.password_hash)
        .bind(&entity.reset_password_code)
        .fetch_optional(tx.conn())
        .await
        .map_err(|e| map_write_error(e, CONFLICTS))?
        .ok_or_else(|| row_vanished("users", entity.id))?;
        tx.commit().await?;

        Ok(self.converter.to_model(&row))
    }

    async fn delete(&self, id: UserId) -> Result<(), AppError> {
        let mut tx = self.uow.begin().await?;
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.value())
            .execute(tx.conn())
            .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                ErrorName::UserNotFound,
                format!("User {} not found", id),
            ));
        }
        tracing::debug!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn exists_by_id(&self, id: UserId) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(id.value())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
