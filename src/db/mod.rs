//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 연결 풀 생성, 마이그레이션, 트랜잭션 마무리(commit/rollback) 도우미와
//! 카테고리 저장소를 담고 있습니다.
//!
//! ## 트랜잭션 수명주기
//! `begin`/`begin_write` → 작업 → 작업이 `Ok`면 `commit`, `Err`면 `rollback` → 연결 반환
//!
//! 쓰기 작업은 `begin_write`(`BEGIN IMMEDIATE`)로 시작합니다.
//! 기본(DEFERRED) 트랜잭션은 읽은 뒤 쓰기 잠금으로 올라가는 순간 다른 쓰기와
//! 부딪히면 기다리지 않고 바로 `SQLITE_BUSY`로 실패하기 때문입니다.
//! IMMEDIATE는 시작 시점에 쓰기 잠금을 잡고, 잠금이 없으면 `busy_timeout`만큼 기다립니다.
//!
//! 작업 도중 panic이 일어나면 `sqlx::Transaction`이 drop되면서 롤백되므로,
//! 어떤 경우에도 실패한 작업이 커밋되지는 않습니다.

pub mod categories;

pub use categories::*;

use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Sqlite, SqlitePool, Transaction,
};

use crate::{
    config::DatabaseConfig,
    error::{AppError, InternalContext},
};

/// 설정값대로 SQLite 연결 풀을 만듭니다.
///
/// 데이터베이스 파일이 없으면 새로 만듭니다.
/// WAL 모드에서는 쓰기 중에도 읽기가 막히지 않습니다. (인메모리 DB는 무시됨)
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.busy_timeout);

    SqlitePoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .max_lifetime(config.max_lifetime)
        .idle_timeout(config.max_idle)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await
}

/// `./migrations` 폴더의 SQL을 아직 적용되지 않은 것만 순서대로 실행합니다.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// 트랜잭션을 시작합니다. 실패하면 `detail` 라벨이 붙은 내부 에러입니다.
pub async fn begin(
    pool: &SqlitePool,
    detail: &'static str,
) -> Result<Transaction<'static, Sqlite>, AppError> {
    pool.begin().await.internal(detail)
}

/// 쓰기 잠금을 먼저 잡는 트랜잭션(`BEGIN IMMEDIATE`)을 시작합니다.
///
/// 다른 쓰기 트랜잭션이 진행 중이면 `busy_timeout` 동안 기다렸다가 시작합니다.
pub async fn begin_write(
    pool: &SqlitePool,
    detail: &'static str,
) -> Result<Transaction<'static, Sqlite>, AppError> {
    pool.begin_with("BEGIN IMMEDIATE").await.internal(detail)
}

/// 작업 결과에 따라 트랜잭션을 커밋하거나 롤백합니다.
///
/// - `Ok(value)`: 커밋 후 `value`를 반환합니다. 커밋 실패는 내부 에러입니다.
/// - `Err(err)`: 롤백 후 원래의 `err`를 그대로 반환합니다.
///   롤백 자체가 실패하면 로그만 남깁니다. (연결이 닫히면서 어차피 버려집니다)
pub async fn finish<T>(
    tx: Transaction<'_, Sqlite>,
    result: Result<T, AppError>,
    detail: &'static str,
) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            tx.commit().await.internal(detail)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(detail, error = %rollback_err, "failed to roll back transaction");
            }
            Err(err)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    const DETAIL: &str = "test > finish";

    async fn insert_in(tx: &mut Transaction<'static, Sqlite>, id: &str) {
        sqlx::query("INSERT INTO categories (id, name) VALUES (?, 'Fashions')")
            .bind(id)
            .execute(&mut **tx)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn finish_commits_successful_work() {
        let pool = memory_pool().await;
        let mut tx = begin(&pool, DETAIL).await.unwrap();
        insert_in(&mut tx, "CAT-1").await;

        let value = finish(tx, Ok(7), DETAIL).await.unwrap();

        assert_eq!(value, 7);
        assert_eq!(count_categories(&pool).await, 1);
    }

    #[tokio::test]
    async fn finish_rolls_back_failed_work_and_keeps_the_error() {
        let pool = memory_pool().await;
        let mut tx = begin(&pool, DETAIL).await.unwrap();
        insert_in(&mut tx, "CAT-1").await;

        let result: Result<(), AppError> = finish(
            tx,
            Err(AppError::NotFound("category is not found".to_string())),
            DETAIL,
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(count_categories(&pool).await, 0);
    }

    #[tokio::test]
    async fn dropped_transaction_is_rolled_back() {
        let pool = memory_pool().await;
        {
            let mut tx = begin(&pool, DETAIL).await.unwrap();
            insert_in(&mut tx, "CAT-1").await;
        }

        assert_eq!(count_categories(&pool).await, 0);
    }

    #[tokio::test]
    async fn write_transaction_commits_like_a_deferred_one() {
        let pool = memory_pool().await;
        let mut tx = begin_write(&pool, DETAIL).await.unwrap();
        insert_in(&mut tx, "CAT-1").await;

        finish(tx, Ok(()), DETAIL).await.unwrap();

        assert_eq!(count_categories(&pool).await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn write_transaction_waits_for_the_current_writer() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite:{}", dir.path().join("categories.db").display()),
            min_connections: 1,
            max_connections: 2,
            max_lifetime: None,
            max_idle: None,
            acquire_timeout: std::time::Duration::from_secs(10),
            busy_timeout: std::time::Duration::from_secs(5),
        };
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let mut first = begin_write(&pool, DETAIL).await.unwrap();
        insert_in(&mut first, "CAT-1").await;
        let waiting = tokio::spawn({
            let pool = pool.clone();
            async move {
                let mut second = begin_write(&pool, DETAIL).await.unwrap();
                insert_in(&mut second, "CAT-2").await;
                finish(second, Ok(()), DETAIL).await
            }
        });
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        finish(first, Ok(()), DETAIL).await.unwrap();

        waiting.await.unwrap().unwrap();
        assert_eq!(count_categories(&pool).await, 2);
    }

    #[tokio::test]
    async fn name_length_is_also_checked_by_the_schema() {
        let pool = memory_pool().await;

        let result = sqlx::query("INSERT INTO categories (id, name) VALUES ('CAT-1', 'A')")
            .execute(&pool)
            .await;

        assert!(result.is_err());
    }
}
