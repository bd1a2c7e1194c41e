//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 유스케이스 호출로 바꾸고, 결과를 JSON 응답 봉투로 감쌉니다.
//!
//! - `categories`: 카테고리 CRUD 핸들러

pub mod categories;

use std::sync::Arc;

use axum::{
    extract::FromRequest,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::{
    error::{AppError, InternalContext},
    middleware::ApiKey,
    services::CategoryUseCase,
};

/// 모든 핸들러가 공유하는 애플리케이션 상태
///
/// 유스케이스는 트레이트 객체로 보관하므로, 테스트에서는 스텁 구현을 넣을 수 있습니다.
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn CategoryUseCase>,
    pub api_key: ApiKey,
}

impl AppState {
    pub fn new(categories: Arc<dyn CategoryUseCase>, api_key: ApiKey) -> Self {
        Self {
            categories,
            api_key,
        }
    }
}

/// JSON 요청 본문 추출자
///
/// `axum::Json`과 같지만 파싱 실패가 `AppError`(400 `"malformed request body"`)로 바뀝니다.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// 본문을 직접 JSON으로 인코딩해 응답을 만듭니다.
///
/// 인코딩에 실패하면 `detail` 라벨이 붙은 내부 에러가 됩니다.
pub fn respond<T: Serialize>(
    status: StatusCode,
    body: &T,
    detail: &'static str,
) -> Result<Response, AppError> {
    let bytes = serde_json::to_vec(body).internal(detail)?;

    Ok((
        status,
        [(header::CONTENT_TYPE, "application/json")],
        bytes,
    )
        .into_response())
}

/// `/api/categories` 아래의 모든 경로
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/categories",
            get(categories::find_all).post(categories::create),
        )
        .route(
            "/api/categories/{category_id}",
            get(categories::find_by_id)
                .put(categories::update)
                .delete(categories::delete),
        )
}
