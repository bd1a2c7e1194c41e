//! # 카테고리 유스케이스
//!
//! 요청 하나를 처리하는 순서를 정합니다.
//!
//! | 동작 | 순서 |
//! |------|------|
//! | `create` | 검증 → begin_write → `save` → commit → 응답 |
//! | `update` | 검증 → begin_write → `find_by_id`(404) → `update` → commit → 응답 |
//! | `delete` | begin_write → `find_by_id`(404) → `delete` → commit |
//! | `find_by_id` | begin → `find_by_id` → commit → 응답 |
//! | `find_all` | begin → `find_all` → commit → 응답 |
//!
//! 저장소 호출 중 하나라도 실패하면 트랜잭션은 롤백되고 에러가 그대로 전파됩니다.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};
use validator::Validate;

use crate::{
    db::{self, CategoryRepository},
    error::AppError,
    models::{
        categories_to_response, Category, CategoryResponse, CreateCategoryRequest,
        UpdateCategoryRequest,
    },
};

#[async_trait]
pub trait CategoryUseCase: Send + Sync {
    async fn create(&self, request: CreateCategoryRequest) -> Result<CategoryResponse, AppError>;

    async fn update(
        &self,
        id: &str,
        request: UpdateCategoryRequest,
    ) -> Result<CategoryResponse, AppError>;

    async fn delete(&self, id: &str) -> Result<(), AppError>;

    async fn find_by_id(&self, id: &str) -> Result<CategoryResponse, AppError>;

    async fn find_all(&self) -> Result<Vec<CategoryResponse>, AppError>;
}

/// 연결 풀과 저장소를 주입받는 CategoryUseCase 구현
#[derive(Clone)]
pub struct CategoryService {
    pool: SqlitePool,
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(pool: SqlitePool, repository: Arc<dyn CategoryRepository>) -> Self {
        Self { pool, repository }
    }

    async fn update_existing(
        &self,
        conn: &mut SqliteConnection,
        id: &str,
        name: String,
    ) -> Result<Category, AppError> {
        self.repository.find_by_id(conn, id).await?;
        self.repository
            .update(
                conn,
                Category {
                    id: id.to_string(),
                    name,
                },
            )
            .await
    }

    async fn delete_existing(&self, conn: &mut SqliteConnection, id: &str) -> Result<(), AppError> {
        self.repository.find_by_id(conn, id).await?;
        self.repository.delete(conn, id).await
    }
}

#[async_trait]
impl CategoryUseCase for CategoryService {
    async fn create(&self, request: CreateCategoryRequest) -> Result<CategoryResponse, AppError> {
        const OP: &str = "category > usecase > create";
        request.validate()?;

        let mut tx = db::begin_write(&self.pool, OP).await?;
        let result = self
            .repository
            .save(&mut *tx, Category::unsaved(request.name))
            .await;
        let category = db::finish(tx, result, OP).await?;

        tracing::info!(category_id = %category.id, "category created");
        Ok(category.into())
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateCategoryRequest,
    ) -> Result<CategoryResponse, AppError> {
        const OP: &str = "category > usecase > update";
        request.validate()?;

        let mut tx = db::begin_write(&self.pool, OP).await?;
        let result = self.update_existing(&mut *tx, id, request.name).await;
        let category = db::finish(tx, result, OP).await?;

        Ok(category.into())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        const OP: &str = "category > usecase > delete";

        let mut tx = db::begin_write(&self.pool, OP).await?;
        let result = self.delete_existing(&mut *tx, id).await;
        db::finish(tx, result, OP).await?;

        tracing::info!(category_id = %id, "category deleted");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<CategoryResponse, AppError> {
        const OP: &str = "category > usecase > find_by_id";

        let mut tx = db::begin(&self.pool, OP).await?;
        let result = self.repository.find_by_id(&mut *tx, id).await;
        let category = db::finish(tx, result, OP).await?;

        Ok(category.into())
    }

    async fn find_all(&self) -> Result<Vec<CategoryResponse>, AppError> {
        const OP: &str = "category > usecase > find_all";

        let mut tx = db::begin(&self.pool, OP).await?;
        let result = self.repository.find_all(&mut *tx).await;
        let categories = db::finish(tx, result, OP).await?;

        Ok(categories_to_response(categories))
    }
}
