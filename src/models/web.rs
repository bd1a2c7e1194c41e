//! # 응답 봉투(envelope) 모델
//!
//! 모든 응답 본문은 다음 둘 중 하나의 형태를 가집니다.
//! - 성공 데이터: `{ "code": 200, "status": "OK", "data": ... }`
//! - 메시지: `{ "code": 404, "status": "NOT FOUND", "message": "..." }`
//!
//! 에러 응답은 항상 `message` 형태를 사용합니다.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// 상태 코드의 표준 사유 문구를 대문자로 반환합니다. (예: 404 → `"NOT FOUND"`)
pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebResponse<T> {
    pub code: u16,
    pub status: String,
    pub data: T,
}

impl<T> WebResponse<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            code: status.as_u16(),
            status: status_text(status),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebResponseMessage {
    pub code: u16,
    pub status: String,
    pub message: String,
}

impl WebResponseMessage {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            status: status_text(status),
            message: message.into(),
        }
    }
}
