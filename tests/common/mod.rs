//! 통합 테스트 공용 헬퍼

#![allow(dead_code)]

use std::{path::Path, sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use category_api::{
    app,
    config::Config,
    db::{self, SqliteCategoryRepository},
    middleware::{ApiKey, API_KEY_HEADER},
    services::{CategoryService, NanoIdGenerator},
    AppState,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const API_KEY: &str = "RAHASIA";

/// 실제 구현을 모두 조립한 테스트 서버
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    timeout: Duration,
}

impl TestApp {
    /// 인메모리 DB 위의 테스트 서버
    ///
    /// 인메모리 DB는 연결마다 따로 존재하므로 연결 하나를 끝까지 유지합니다.
    pub async fn spawn() -> Self {
        Self::build(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_MAX_CONNECTIONS", "1"),
            ("DB_MAX_LIFETIME_MINS", "0"),
            ("DB_MAX_IDLE_MINS", "0"),
        ])
        .await
    }

    /// 파일 DB 위의 테스트 서버. 연결 풀 크기 등은 기본 설정을 그대로 씁니다.
    pub async fn spawn_on_file(path: &Path) -> Self {
        let url = format!("sqlite:{}", path.display());
        Self::build(&[("DATABASE_URL", url.as_str())]).await
    }

    async fn build(overrides: &[(&str, &str)]) -> Self {
        let config = Config::from_lookup(|key| {
            if key == "API_KEY" {
                return Some(API_KEY.to_string());
            }
            overrides
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
        .unwrap();
        let pool = db::create_pool(&config.database).await.unwrap();
        db::run_migrations(&pool).await.unwrap();

        let repository = Arc::new(SqliteCategoryRepository::new(Arc::new(NanoIdGenerator)));
        let categories = Arc::new(CategoryService::new(pool.clone(), repository));
        let router = app(AppState::new(
            categories,
            ApiKey::new(&config.server.api_key),
        ));

        Self {
            router,
            pool,
            timeout: config.test.timeout,
        }
    }

    /// 올바른 API 키를 붙여 요청을 보냅니다.
    pub async fn call(&self, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        self.send(request(method, uri, body, Some(API_KEY))).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = tokio::time::timeout(self.timeout, self.router.clone().oneshot(request))
            .await
            .expect("request timed out")
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn insert(&self, id: &str, name: &str) {
        sqlx::query("INSERT INTO categories (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await
            .unwrap();
    }

    pub async fn count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

pub fn request(
    method: Method,
    uri: &str,
    body: Option<&str>,
    api_key: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header(API_KEY_HEADER, key);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
