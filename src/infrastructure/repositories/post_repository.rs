//! Post Repository Implementation

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::{like_pattern, loaders};
use crate::domain::models::{Post, PostFilter, PostInclude, PostRepository};
use crate::domain::value_objects::PostId;
use crate::infrastructure::converters::{Converter, PostConverter};
use crate::infrastructure::database::{map_write_error, row_vanished, PgUnitOfWork};
use crate::infrastructure::entities::{PostEntity, POST_COLUMNS};
use crate::shared::error::{AppError, ErrorName};

/// PostgreSQL post repository implementation.
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
    uow: PgUnitOfWork,
    converter: PostConverter,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            uow: PgUnitOfWork::from_pool(pool.clone()),
            pool,
            converter: PostConverter::default(),
        }
    }

    async fn attach(
        conn: &mut PgConnection,
        rows: &mut [PostEntity],
        include: PostInclude,
    ) -> Result<(), AppError> {
        if include.author {
            loaders::attach_users(
                conn,
                rows,
                |p: &PostEntity| p.author_id,
                |p: &mut PostEntity, u| p.author = u,
            )
            .await?;
        }
        if include.community {
            loaders::attach_communities(
                conn,
                rows,
                |p: &PostEntity| p.community_id,
                |p: &mut PostEntity, c| p.community = c,
            )
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn list(&self, filter: PostFilter, include: PostInclude) -> Result<Vec<Post>, AppError> {
        let mut conn = self.pool.acquire().await?;
        let mut rows = sqlx::query_as::<_, PostEntity>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE ($1::BIGINT IS NULL OR community_id = $1)
              AND ($2::BIGINT IS NULL OR author_id = $2)
              AND ($3::TEXT IS NULL OR content ILIKE $3)
            ORDER BY created_at DESC, id DESC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(filter.community_id.map(|id| id.value()))
        .bind(filter.author_id.map(|id| id.value()))
        .bind(filter.search.as_deref().map(like_pattern))
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&mut *conn)
        .await?;

        Self::attach(&mut conn, &mut rows, include).await?;
        Ok(rows.iter().map(|r| self.converter.to_model(r)).collect())
    }

    async fn get_by_id(&self, id: PostId, include: PostInclude) -> Result<Option<Post>, AppError> {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, PostEntity>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&mut *conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut rows = [row];
        Self::attach(&mut conn, &mut rows, include).await?;
        Ok(Some(self.converter.to_model(&rows[0])))
    }

    async fn create(&self, post: &Post) -> Result<Post, AppError> {
        let entity = self.converter.to_entity(&post.pure_copy());
        let mut tx = self.uow.begin().await?;
        let row = sqlx::query_as::<_, PostEntity>(&format!(
            r#"
            INSERT INTO posts (id, author_id, author_username, community_id, community_name,
                               vote, content, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(entity.id)
        .bind(entity.author_id)
        .bind(&entity.author_username)
        .bind(entity.community_id)
        .bind(&entity.community_name)
        .bind(entity.vote)
        .bind(&entity.content)
        .bind(entity.created_at)
        .bind(entity.modified_at)
        .fetch_one(tx.conn())
        .await
        .map_err(|e| map_write_error(e, &[]))?;
        tx.commit().await?;

        tracing::debug!(post_id = row.id, community_id = row.community_id, "Post created");
        Ok(self.converter.to_model(&row))
    }

    async fn update(&self, post: &Post) -> Result<Post, AppError> {
        let entity = self.converter.to_entity(&post.pure_copy());
        let mut tx = self.uow.begin().await?;
        let row = sqlx::query_as::<_, PostEntity>(&format!(
            r#"
            UPDATE posts
            SET content = $2,
                vote = $3,
                modified_at = NOW()
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(entity.id)
        .bind(&entity.content)
        .bind(entity.vote)
        .fetch_optional(tx.conn())
        .await
        .map_err(|e| map_write_error(e, &[]))?
        .ok_or_else(|| row_vanished("posts", entity.id))?;
        tx.commit().await?;

        Ok(self.converter.to_model(&row))
    }

    async fn delete(&self, id: PostId) -> Result<(), AppError> {
        let mut tx = self.uow.begin().await?;
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.value())
            .execute(tx.conn())
            .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                ErrorName::PostNotFound,
                format!("Post {} not found", id),
            ));
        }
        Ok(())
    }

    async fn exists_by_id(&self, id: PostId) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
                .bind(id.value())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
