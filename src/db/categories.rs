//! # 카테고리 데이터베이스 쿼리 모듈
//!
//! `categories` 테이블에 대한 SQL을 실행하는 저장소(repository)입니다.
//! 모든 메서드는 호출자가 연 트랜잭션의 연결(`&mut SqliteConnection`)을 받아,
//! 유스케이스가 정한 트랜잭션 경계 안에서 실행됩니다.
//!
//! ## 테이블 구조
//! - `categories`: (id TEXT PRIMARY KEY, name TEXT, 길이 3~128)

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqliteConnection;

use crate::{
    error::{AppError, InternalContext},
    models::Category,
    services::id_gen::IdGenerator,
};

/// 생성되는 카테고리 ID의 길이
pub const ID_LENGTH: usize = 36;

/// 저장 시 ID 충돌을 만나면 다시 생성해 보는 최대 횟수
pub const MAX_ID_ATTEMPTS: usize = 10;

pub const CATEGORY_NOT_FOUND: &str = "category is not found";

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// 새 ID를 생성해 카테고리를 저장하고, ID가 채워진 엔티티를 반환합니다.
    async fn save(
        &self,
        conn: &mut SqliteConnection,
        category: Category,
    ) -> Result<Category, AppError>;

    /// 이름을 덮어씁니다. 존재 여부는 확인하지 않습니다.
    async fn update(
        &self,
        conn: &mut SqliteConnection,
        category: Category,
    ) -> Result<Category, AppError>;

    /// ID로 삭제합니다. 존재 여부는 확인하지 않습니다.
    async fn delete(&self, conn: &mut SqliteConnection, id: &str) -> Result<(), AppError>;

    /// ID로 조회합니다. 행이 없으면 `AppError::NotFound`입니다.
    async fn find_by_id(&self, conn: &mut SqliteConnection, id: &str)
        -> Result<Category, AppError>;

    async fn find_all(&self, conn: &mut SqliteConnection) -> Result<Vec<Category>, AppError>;
}

/// SQLite 구현의 CategoryRepository
#[derive(Clone)]
pub struct SqliteCategoryRepository {
    id_generator: Arc<dyn IdGenerator>,
}

impl SqliteCategoryRepository {
    pub fn new(id_generator: Arc<dyn IdGenerator>) -> Self {
        Self { id_generator }
    }
}

/// 행 하나를 INSERT한 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// 같은 `id`의 행이 이미 있음 (기본 키 중복)
    Collided,
}

/// 행을 INSERT하고, 기본 키 중복은 에러 대신 `Collided`로 돌려줍니다.
///
/// SQLite는 제약 위반 시 해당 문장만 되돌리므로 트랜잭션은 계속 쓸 수 있습니다.
pub async fn insert_row(
    conn: &mut SqliteConnection,
    id: &str,
    name: &str,
) -> Result<InsertOutcome, sqlx::Error> {
    let inserted = sqlx::query("INSERT INTO categories (id, name) VALUES (?, ?)")
        .bind(id)
        .bind(name)
        .execute(&mut *conn)
        .await;

    match inserted {
        Ok(_) => Ok(InsertOutcome::Inserted),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(InsertOutcome::Collided),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    /// ## 처리 흐름
    /// 1. 36글자 ID 후보 생성
    /// 2. INSERT → 기본 키 중복이면(`Collided`) 1로
    /// 3. `MAX_ID_ATTEMPTS`번 안에 성공하지 못하면 내부 에러
    ///
    /// 중복 여부는 호출자의 트랜잭션 안에서 기본 키 제약이 판정합니다.
    async fn save(
        &self,
        conn: &mut SqliteConnection,
        mut category: Category,
    ) -> Result<Category, AppError> {
        const OP: &str = "category > repository > save";

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let candidate = self.id_generator.generate(ID_LENGTH).internal(OP)?;

            match insert_row(conn, &candidate, &category.name).await.internal(OP)? {
                InsertOutcome::Inserted => {
                    category.id = candidate;
                    return Ok(category);
                }
                InsertOutcome::Collided => {
                    tracing::debug!(attempt, "generated category id is taken, retrying");
                }
            }
        }

        Err(AppError::internal(
            OP,
            anyhow::anyhow!("no unused category id after {MAX_ID_ATTEMPTS} attempts"),
        ))
    }

    async fn update(
        &self,
        conn: &mut SqliteConnection,
        category: Category,
    ) -> Result<Category, AppError> {
        sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
            .bind(&category.name)
            .bind(&category.id)
            .execute(&mut *conn)
            .await
            .internal("category > repository > update")?;

        Ok(category)
    }

    async fn delete(&self, conn: &mut SqliteConnection, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .internal("category > repository > delete")?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .internal("category > repository > find_by_id")?
            .ok_or_else(|| AppError::NotFound(CATEGORY_NOT_FOUND.to_string()))
    }

    async fn find_all(&self, conn: &mut SqliteConnection) -> Result<Vec<Category>, AppError> {
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories")
            .fetch_all(&mut *conn)
            .await
            .internal("category > repository > find_all")
    }
}
