//! Community Repository Implementation

use async_trait::async_trait;
use sqlx::PgPool;

use super::{like_pattern, loaders};
use crate::domain::models::{Community, CommunityFilter, CommunityRepository};
use crate::domain::value_objects::CommunityId;
use crate::infrastructure::converters::{CommunityConverter, Converter};
use crate::infrastructure::database::{map_write_error, row_vanished, PgUnitOfWork};
use crate::infrastructure::entities::{CommunityEntity, COMMUNITY_COLUMNS};
use crate::shared::error::{AppError, ErrorName};

const CONFLICTS: &[(&str, ErrorName)] =
    &[("communities_name_key", ErrorName::CommunityNameExists)];

/// PostgreSQL community repository implementation.
#[derive(Clone)]
pub struct PgCommunityRepository {
    pool: PgPool,
    uow: PgUnitOfWork,
    converter: CommunityConverter,
}

impl PgCommunityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            uow: PgUnitOfWork::from_pool(pool.clone()),
            pool,
            converter: CommunityConverter::default(),
        }
    }

    async fn get_one<T>(
        &self,
        column: &str,
        value: T,
        include_creator: bool,
    ) -> Result<Option<Community>, AppError>
    where
        T: for<'q> sqlx::Encode<'q, sqlx::Postgres> + sqlx::Type<sqlx::Postgres> + Send + 'static,
    {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, CommunityEntity>(&format!(
            "SELECT {COMMUNITY_COLUMNS} FROM communities WHERE {column} = $1"
        ))
        .bind(value)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut rows = [row];
        if include_creator {
            loaders::attach_users(
                &mut conn,
                &mut rows,
                |c: &CommunityEntity| c.creator_id,
                |c: &mut CommunityEntity, u| c.creator = u,
            )
            .await?;
        }
        Ok(Some(self.converter.to_model(&rows[0])))
    }
}

#[async_trait]
impl CommunityRepository for PgCommunityRepository {
    async fn list(
        &self,
        filter: CommunityFilter,
        include_creator: bool,
    ) -> Result<Vec<Community>, AppError> {
        let mut conn = self.pool.acquire().await?;
        let mut rows = sqlx::query_as::<_, CommunityEntity>(&format!(
            r#"
            SELECT {COMMUNITY_COLUMNS}
            FROM communities
            WHERE ($1::TEXT IS NULL OR name ILIKE $1)
            ORDER BY created_at, id
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(filter.name.as_deref().map(like_pattern))
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&mut *conn)
        .await?;

        if include_creator {
            loaders::attach_users(
                &mut conn,
                &mut rows,
                |c: &CommunityEntity| c.creator_id,
                |c: &mut CommunityEntity, u| c.creator = u,
            )
            .await?;
        }
        Ok(rows.iter().map(|r| self.converter.to_model(r)).collect())
    }

    async fn get_by_id(
        &self,
        id: CommunityId,
        include_creator: bool,
    ) -> Result<Option<Community>, AppError> {
        self.get_one("id", id.value(), include_creator).await
    }

    async fn get_by_name(
        &self,
        name: &str,
        include_creator: bool,
    ) -> Result<Option<Community>, AppError> {
        self.get_one("name", name.to_string(), include_creator)
            .await
    }

    async fn create(&self, community: &Community) -> Result<Community, AppError> {
        let entity = self.converter.to_entity(&community.pure_copy());
        let mut tx = self.uow.begin().await?;
        let row = sqlx::query_as::<_, CommunityEntity>(&format!(
            r#"
            INSERT INTO communities (id, name, creator_id, creator_username,
                                     created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COMMUNITY_COLUMNS}
            "#
        ))
        .bind(entity.id)
        .bind(&entity.name)
        .bind(entity.creator_id)
        .bind(&entity.creator_username)
        .bind(entity.created_at)
        .bind(entity.modified_at)
        .fetch_one(tx.conn())
        .await
        .map_err(|e| map_write_error(e, CONFLICTS))?;
        tx.commit().await?;

        tracing::debug!(community_id = row.id, name = %row.name, "Community created");
        Ok(self.converter.to_model(&row))
    }

    async fn update(&self, community: &Community) -> Result<Community, AppError> {
        let entity = self.converter.to_entity(&community.pure_copy());
        let mut tx = self.uow.begin().await?;
        let row = sqlx::query_as::<_, CommunityEntity>(&format!(
            r#"
            UPDATE communities
            SET name = $2,
                modified_at = NOW()
            WHERE id = $1
            RETURNING {COMMUNITY_COLUMNS}
            "#
        ))
        .bind(entity.id)
        .bind(&entity.name)
        .fetch_optional(tx.conn())
        .await
        .map_err(|e| map_write_error(e, CONFLICTS))?
        .ok_or_else(|| row_vanished("communities", entity.id))?;

        sqlx::query("UPDATE posts SET community_name = $2 WHERE community_id = $1")
            .bind(row.id)
            .bind(&row.name)
            .execute(tx.conn())
            .await?;
        sqlx::query(
            "UPDATE community_memberships SET community_name = $2 WHERE community_id = $1",
        )
        .bind(row.id)
        .bind(&row.name)
        .execute(tx.conn())
        .await?;
        tx.commit().await?;

        Ok(self.converter.to_model(&row))
    }

    async fn delete(&self, id: CommunityId) -> Result<(), AppError> {
        let mut tx = self.uow.begin().await?;
        let result = sqlx::query("DELETE FROM communities WHERE id = $1")
            .bind(id.value())
            .execute(tx.conn())
            .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                ErrorName::CommunityNotFound,
                format!("Community {} not found", id),
            ));
        }
        Ok(())
    }

    async fn exists_by_id(&self, id: CommunityId) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM communities WHERE id = $1)",
        )
        .bind(id.value())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM communities WHERE name = $1)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
