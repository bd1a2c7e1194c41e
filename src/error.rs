//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 종류를 `AppError` 하나로 모읍니다.
//! 모든 계층(저장소 → 유스케이스 → 컨트롤러)은 `Result<T, AppError>`를 반환하고,
//! HTTP 경계에서 `IntoResponse` 구현이 단 한 번 응답으로 변환합니다.
//!
//! ## 분류 순서
//! 1. 클라이언트 요청 에러 (`BadRequest`, `Unauthorized`, `NotFound`)
//!    → 해당 상태 코드 + `message`에 상세 메시지
//! 2. 필드 검증 에러 (`Validation`)
//!    → 400 + 검증 라이브러리가 만든 메시지
//! 3. 그 밖의 모든 것 (`Internal`)
//!    → 500 + `"something went wrong"`, 원인은 로그에만 기록

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::WebResponseMessage;

/// 500 응답에서 클라이언트에게 보여주는 고정 메시지
pub const INTERNAL_ERROR_MESSAGE: &str = "something went wrong";

/// 요청 본문을 JSON으로 해석하지 못했을 때의 메시지
pub const MALFORMED_REQUEST_BODY: &str = "malformed request body";

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
#[derive(Debug, Error)]
pub enum AppError {
    /// 잘못된 요청 (HTTP 400)
    #[error("bad request: {0}")]
    BadRequest(String),

    /// 인증 실패 (HTTP 401)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("not found: {0}")]
    NotFound(String),

    /// 구조체 필드 검증 실패 (HTTP 400)
    /// #[from]: `req.validate()?`가 자동으로 이 variant로 변환됩니다.
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// 서버 내부 오류 (HTTP 500)
    ///
    /// `detail`은 어느 계층/동작에서 실패했는지를 나타내는 라벨입니다.
    /// (예: `"category > repository > save"`) 로그에만 남고 응답에는 포함되지 않습니다.
    #[error("internal error at {detail}: {cause:#}")]
    Internal {
        detail: &'static str,
        cause: anyhow::Error,
    },
}

impl AppError {
    /// 원인 에러를 감싸 `Internal` 에러를 만듭니다.
    pub fn internal(detail: &'static str, cause: impl Into<anyhow::Error>) -> Self {
        AppError::Internal {
            detail,
            cause: cause.into(),
        }
    }

    /// 이 에러가 만들어낼 HTTP 상태 코드
    pub fn status_code(&self) -> StatusCode {
        // `|`로 여러 variant를 한 갈래에서 처리하고, `_`/`{ .. }`로 내부 값은 무시합니다.
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 `{code, status, message}` 형태의 JSON 응답으로 변환합니다.
    ///
    /// 내부 에러는 원인과 라벨을 로그에 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let status = self.status_code();
        // match는 모든 variant를 다뤄야 컴파일됩니다.
        // 새 variant를 추가하면 이 자리에서 응답 형태를 정하도록 컴파일러가 알려줍니다.
        // `self`를 값으로 match하므로 각 variant의 String을 복사 없이 꺼낼 수 있습니다.
        let message = match self {
            AppError::BadRequest(detail)
            | AppError::Unauthorized(detail)
            | AppError::NotFound(detail) => detail,
            AppError::Validation(errors) => errors.to_string(),
            AppError::Internal { detail, cause } => {
                tracing::error!(detail, error = ?cause, "internal server error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        // Json이 content-type: application/json 헤더를 설정합니다.
        (status, Json(WebResponseMessage::new(status, message))).into_response()
    }
}

// 요청 본문 추출 실패(잘못된 JSON, content-type 누락 등)는 모두 같은 400 메시지로 처리합니다.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected request body");
        AppError::BadRequest(MALFORMED_REQUEST_BODY.to_string())
    }
}

/// 임의의 에러를 라벨이 붙은 `AppError::Internal`로 바꾸는 확장 트레이트
///
/// ```rust,ignore
/// let mut tx = pool.begin().await.internal("category > usecase > create")?;
/// ```
pub trait InternalContext<T> {
    fn internal(self, detail: &'static str) -> Result<T, AppError>;
}

impl<T, E> InternalContext<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn internal(self, detail: &'static str) -> Result<T, AppError> {
        self.map_err(|e| AppError::internal(detail, e))
    }
}
