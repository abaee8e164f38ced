//! Global Service
//!
//! Site-wide settings stored as one JSON row per environment.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Global, GlobalId, GlobalRepository, GlobalValues};
use crate::shared::error::{AppError, ErrorName};

/// Global service trait
#[async_trait]
pub trait GlobalService: Send + Sync {
    async fn list_globals(&self) -> Result<Vec<Global>, AppError>;

    async fn get_global(&self, id: GlobalId) -> Result<Global, AppError>;

    async fn create_global(&self, id: GlobalId, values: GlobalValues) -> Result<Global, AppError>;

    async fn update_global(&self, global: Global) -> Result<Global, AppError>;

    async fn delete_global(&self, id: GlobalId) -> Result<(), AppError>;

    async fn exists_global(&self, id: GlobalId) -> Result<bool, AppError>;

    /// Return the stored row, seeding it with `defaults` on first start.
    async fn load_or_create(&self, id: GlobalId, defaults: GlobalValues)
        -> Result<Global, AppError>;
}

/// GlobalService implementation
pub struct GlobalServiceImpl {
    global_repo: Arc<dyn GlobalRepository>,
}

impl GlobalServiceImpl {
    pub fn new(global_repo: Arc<dyn GlobalRepository>) -> Self {
        Self { global_repo }
    }

    fn not_found(id: GlobalId) -> AppError {
        AppError::not_found(ErrorName::GlobalNotFound, format!("Global {} not found", id))
    }
}

#[async_trait]
impl GlobalService for GlobalServiceImpl {
    async fn list_globals(&self) -> Result<Vec<Global>, AppError> {
        self.global_repo.list().await
    }

    async fn get_global(&self, id: GlobalId) -> Result<Global, AppError> {
        self.global_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create_global(&self, id: GlobalId, values: GlobalValues) -> Result<Global, AppError> {
        if self.global_repo.exists_by_id(id).await? {
            return Err(AppError::conflict(
                ErrorName::GlobalExists,
                format!("Global {} already exists", id),
            ));
        }
        self.global_repo.create(&Global::new(id, values)).await
    }

    async fn update_global(&self, global: Global) -> Result<Global, AppError> {
        if !self.global_repo.exists_by_id(global.id).await? {
            return Err(Self::not_found(global.id));
        }
        self.global_repo.update(&global).await
    }

    async fn delete_global(&self, id: GlobalId) -> Result<(), AppError> {
        self.global_repo.delete(id).await
    }

    async fn exists_global(&self, id: GlobalId) -> Result<bool, AppError> {
        self.global_repo.exists_by_id(id).await
    }

    async fn load_or_create(
        &self,
        id: GlobalId,
        defaults: GlobalValues,
    ) -> Result<Global, AppError> {
        if let Some(global) = self.global_repo.get_by_id(id).await? {
            return Ok(global);
        }
        tracing::info!(global_id = %id, "Seeding global values");
        match self.create_global(id, defaults).await {
            // Another instance seeded the row first.
            Err(AppError::Conflict { .. }) => self.get_global(id).await,
            other => other,
        }
    }
}
