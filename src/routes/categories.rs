//! # 카테고리 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 성공 응답 |
//! |--------|------|--------|-----------|
//! | GET | /api/categories | `find_all` | 200, 카테고리 배열 |
//! | GET | /api/categories/{category_id} | `find_by_id` | 200, 카테고리 |
//! | POST | /api/categories | `create` | 201, 생성된 카테고리 |
//! | PUT | /api/categories/{category_id} | `update` | 200, 수정된 카테고리 |
//! | DELETE | /api/categories/{category_id} | `delete` | 200, 삭제 메시지 |
//!
//! 핸들러는 요청을 해석하고 유스케이스를 호출한 뒤 결과를 봉투에 담을 뿐입니다.
//! 검증, 트랜잭션, 404 판정은 모두 유스케이스가 맡습니다.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use crate::{
    error::AppError,
    models::{CreateCategoryRequest, UpdateCategoryRequest, WebResponse, WebResponseMessage},
    routes::{respond, AppState, JsonBody},
};

/// 삭제 성공 시 `message`에 담기는 문구
pub const CATEGORY_DELETED: &str = "category is successfully deleted";

/// `GET /api/categories`
pub async fn find_all(State(state): State<AppState>) -> Result<Response, AppError> {
    let categories = state.categories.find_all().await?;

    respond(
        StatusCode::OK,
        &WebResponse::new(StatusCode::OK, categories),
        "category > controller > find_all",
    )
}

/// `GET /api/categories/{category_id}`
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Response, AppError> {
    let category = state.categories.find_by_id(&category_id).await?;

    respond(
        StatusCode::OK,
        &WebResponse::new(StatusCode::OK, category),
        "category > controller > find_by_id",
    )
}

/// `POST /api/categories` + `{ "name": "..." }`
///
/// 본문이 JSON이 아니면 유스케이스를 호출하기 전에 400으로 끝납니다.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateCategoryRequest>,
) -> Result<Response, AppError> {
    let category = state.categories.create(request).await?;

    respond(
        StatusCode::CREATED,
        &WebResponse::new(StatusCode::CREATED, category),
        "category > controller > create",
    )
}

/// `PUT /api/categories/{category_id}` + `{ "name": "..." }`
pub async fn update(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    JsonBody(request): JsonBody<UpdateCategoryRequest>,
) -> Result<Response, AppError> {
    let category = state.categories.update(&category_id, request).await?;

    respond(
        StatusCode::OK,
        &WebResponse::new(StatusCode::OK, category),
        "category > controller > update",
    )
}

/// `DELETE /api/categories/{category_id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Response, AppError> {
    state.categories.delete(&category_id).await?;

    respond(
        StatusCode::OK,
        &WebResponseMessage::new(StatusCode::OK, CATEGORY_DELETED),
        "category > controller > delete",
    )
}
