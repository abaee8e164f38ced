//! Community Membership Repository Implementation

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::loaders;
use crate::domain::models::{
    CommunityMembership, CommunityMembershipInclude, CommunityMembershipRepository,
};
use crate::domain::value_objects::{CommunityId, CommunityMembershipId, UserId};
use crate::infrastructure::converters::{CommunityMembershipConverter, Converter};
use crate::infrastructure::database::{map_write_error, PgUnitOfWork};
use crate::infrastructure::entities::{
    CommunityMembershipEntity, COMMUNITY_MEMBERSHIP_COLUMNS,
};
use crate::shared::error::{AppError, ErrorName};

const CONFLICTS: &[(&str, ErrorName)] = &[(
    "community_memberships_user_id_community_id_key",
    ErrorName::CommunityMembershipExists,
)];

/// PostgreSQL community membership repository implementation.
#[derive(Clone)]
pub struct PgCommunityMembershipRepository {
    pool: PgPool,
    uow: PgUnitOfWork,
    converter: CommunityMembershipConverter,
}

impl PgCommunityMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            uow: PgUnitOfWork::from_pool(pool.clone()),
            pool,
            converter: CommunityMembershipConverter::default(),
        }
    }

    async fn attach(
        conn: &mut PgConnection,
        rows: &mut [CommunityMembershipEntity],
        include: CommunityMembershipInclude,
    ) -> Result<(), AppError> {
        if include.user {
            loaders::attach_users(
                conn,
                rows,
                |m: &CommunityMembershipEntity| m.user_id,
                |m: &mut CommunityMembershipEntity, u| m.user = u,
            )
            .await?;
        }
        if include.community {
            loaders::attach_communities(
                conn,
                rows,
                |m: &CommunityMembershipEntity| m.community_id,
                |m: &mut CommunityMembershipEntity, c| m.community = c,
            )
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CommunityMembershipRepository for PgCommunityMembershipRepository {
    async fn list_by_user(
        &self,
        user_id: UserId,
        include: CommunityMembershipInclude,
    ) -> Result<Vec<CommunityMembership>, AppError> {
        let mut conn = self.pool.acquire().await?;
        let mut rows = sqlx::query_as::<_, CommunityMembershipEntity>(&format!(
            "SELECT {COMMUNITY_MEMBERSHIP_COLUMNS} FROM community_memberships \
             WHERE user_id = $1 ORDER BY created_at"
        ))
        .bind(user_id.value())
        .fetch_all(&mut *conn)
        .await?;

        Self::attach(&mut conn, &mut rows, include).await?;
        Ok(rows.iter().map(|r| self.converter.to_model(r)).collect())
    }

    async fn get_by_id(
        &self,
        id: CommunityMembershipId,
        include: CommunityMembershipInclude,
    ) -> Result<Option<CommunityMembership>, AppError> {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, CommunityMembershipEntity>(&format!(
            "SELECT {COMMUNITY_MEMBERSHIP_COLUMNS} FROM community_memberships WHERE id = $1"
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

    async fn create(
        &self,
        membership: &CommunityMembership,
    ) -> Result<CommunityMembership, AppError> {
        let entity = self.converter.to_entity(&membership.pure_copy());
        let mut tx = self.uow.begin().await?;
        let row = sqlx::query_as::<_, CommunityMembershipEntity>(&format!(
            r#"
            INSERT INTO community_memberships (id, user_id, username, community_id,
                                               community_name, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COMMUNITY_MEMBERSHIP_COLUMNS}
            "#
        ))
        .bind(entity.id)
        .bind(entity.user_id)
        .bind(&entity.username)
        .bind(entity.community_id)
        .bind(&entity.community_name)
        .bind(entity.created_at)
        .bind(entity.modified_at)
        .fetch_one(tx.conn())
        .await
        .map_err(|e| map_write_error(e, CONFLICTS))?;
        tx.commit().await?;

        tracing::debug!(
            membership_id = row.id,
            user_id = row.user_id,
            community_id = row.community_id,
            "Community membership created"
        );
        Ok(self.converter.to_model(&row))
    }

    async fn delete(&self, id: CommunityMembershipId) -> Result<(), AppError> {
        let mut tx = self.uow.begin().await?;
        let result = sqlx::query("DELETE FROM community_memberships WHERE id = $1")
            .bind(id.value())
            .execute(tx.conn())
            .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                ErrorName::CommunityMembershipNotFound,
                format!("Community membership {} not found", id),
            ));
        }
        Ok(())
    }

    async fn exists_by_id(&self, id: CommunityMembershipId) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM community_memberships WHERE id = $1)",
        )
        .bind(id.value())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn exists(&self, user_id: UserId, community_id: CommunityId) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM community_memberships \
             WHERE user_id = $1 AND community_id = $2)",
        )
        .bind(user_id.value())
        .bind(community_id.value())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
