//! Email Repository Implementation

use async_trait::async_trait;
use sqlx::PgPool;

use super::loaders;
use crate::domain::models::{Email, EmailRepository};
use crate::domain::value_objects::{EmailId, UserId};
use crate::infrastructure::converters::{Converter, EmailConverter};
use crate::infrastructure::database::{map_write_error, row_vanished, PgUnitOfWork};
use crate::infrastructure::entities::{EmailEntity, EMAIL_COLUMNS};
use crate::shared::error::{AppError, ErrorName};

const CONFLICTS: &[(&str, ErrorName)] = &[
    ("emails_address_key", ErrorName::EmailAddressExists),
    ("emails_user_id_key", ErrorName::EmailAddressExists),
];

/// PostgreSQL email repository implementation.
#[derive(Clone)]
pub struct PgEmailRepository {
    pool: PgPool,
    uow: PgUnitOfWork,
    converter: EmailConverter,
}

impl PgEmailRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            uow: PgUnitOfWork::from_pool(pool.clone()),
            pool,
            converter: EmailConverter,
        }
    }

    async fn get_one<T>(
        &self,
        column: &str,
        value: T,
        include_user: bool,
    ) -> Result<Option<Email>, AppError>
    where
        T: for<'q> sqlx::Encode<'q, sqlx::Postgres> + sqlx::Type<sqlx::Postgres> + Send + 'static,
    {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, EmailEntity>(&format!(
            "SELECT {EMAIL_COLUMNS} FROM emails WHERE {column} = $1"
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
                |e: &EmailEntity| e.user_id,
                |e: &mut EmailEntity, u| e.user = u,
            )
            .await?;
        }
        Ok(Some(self.converter.to_model(&rows[0])))
    }
}

#[async_trait]
impl EmailRepository for PgEmailRepository {
    async fn get_by_id(&self, id: EmailId, include_user: bool) -> Result<Option<Email>, AppError> {
        self.get_one("id", id.value(), include_user).await
    }

    async fn get_by_address(
        &self,
        address: &str,
        include_user: bool,
    ) -> Result<Option<Email>, AppError> {
        self.get_one("address", address.to_string(), include_user)
            .await
    }

    async fn get_by_user_id(
        &self,
        user_id: UserId,
        include_user: bool,
    ) -> Result<Option<Email>, AppError> {
        self.get_one("user_id", user_id.value(), include_user)
            .await
    }

    async fn create(&self, email: &Email) -> Result<Email, AppError> {
        let entity = self.converter.to_entity(&email.pure_copy());
        let mut tx = self.uow.begin().await?;
        let row = sqlx::query_as::<_, EmailEntity>(&format!(
            r#"
            INSERT INTO emails (id, user_id, address, activation_status, activation_code,
                                created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {EMAIL_COLUMNS}
            "#
        ))
        .bind(entity.id)
        .bind(entity.user_id)
        .bind(&entity.address)
        .bind(&entity.activation_status)
        .bind(entity.activation_code)
        .bind(entity.created_at)
        .bind(entity.modified_at)
        .fetch_one(tx.conn())
        .await
        .map_err(|e| map_write_error(e, CONFLICTS))?;
        tx.commit().await?;

        Ok(self.converter.to_model(&row))
    }

    async fn update(&self, email: &Email) -> Result<Email, AppError> {
        let entity = self.converter.to_entity(&email.pure_copy());
        let mut tx = self.uow.begin().await?;
        let row = sqlx::query_as::<_, EmailEntity>(&format!(
            r#"
            UPDATE emails
            SET address = $2,
                activation_status = $3,
                activation_code = $4,
                modified_at = NOW()
            WHERE id = $1
            RETURNING {EMAIL_COLUMNS}
            "#
        ))
        .bind(entity.id)
        .bind(&entity.address)
        .bind(&entity.activation_status)
        .bind(entity.activation_code)
        .fetch_optional(tx.conn())
        .await
        .map_err(|e| map_write_error(e, CONFLICTS))?
        .ok_or_else(|| row_vanished("emails", entity.id))?;
        tx.commit().await?;

        Ok(self.converter.to_model(&row))
    }

    async fn delete(&self, id: EmailId) -> Result<(), AppError> {
        let mut tx = self.uow.begin().await?;
        let result = sqlx::query("DELETE FROM emails WHERE id = $1")
            .bind(id.value())
            .execute(tx.conn())
            .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                ErrorName::EmailNotFound,
                format!("Email {} not found", id),
            ));
        }
        Ok(())
    }

    async fn exists_by_id(&self, id: EmailId) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM emails WHERE id = $1)")
                .bind(id.value())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn exists_by_address(&self, address: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM emails WHERE address = $1)",
        )
        .bind(address)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
