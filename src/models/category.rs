//! # 카테고리 모델 정의
//!
//! ## 구조체 역할
//! - `Category`: `categories` 테이블의 한 행(row)
//! - `CreateCategoryRequest` / `UpdateCategoryRequest`: 클라이언트가 보내는 JSON 본문
//! - `CategoryResponse`: 클라이언트에게 돌려주는 외부 표현

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 카테고리 엔티티. DB의 `categories` 테이블 한 행에 대응합니다.
///
/// `id`는 저장 시점에 저장소가 생성해서 채워 넣습니다.
/// 그 전까지는 빈 문자열입니다.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    /// 아직 ID가 할당되지 않은 새 카테고리
    pub fn unsaved(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
        }
    }
}

/// 카테고리 생성 요청: `POST /api/categories`의 요청 본문
///
/// `#[serde(default)]`: `name` 필드가 빠지면 빈 문자열이 되고,
/// 이어지는 검증에서 길이 제약 위반(400)으로 걸러집니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    #[validate(length(min = 3, max = 128))]
    pub name: String,
}

/// 카테고리 수정 요청: `PUT /api/categories/{id}`의 요청 본문
///
/// PUT은 전체 교체이므로 `name`이 필수입니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    #[validate(length(min = 3, max = 128))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

/// 엔티티 목록을 응답 목록으로 변환합니다.
pub fn categories_to_response(categories: Vec<Category>) -> Vec<CategoryResponse> {
    categories.into_iter().map(CategoryResponse::from).collect()
}
