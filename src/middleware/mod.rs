//! # 미들웨어
//!
//! 요청은 바깥에서 안쪽으로 다음 순서로 지나갑니다.
//! panic 복구(`recover`) → CORS → 요청 로깅 → API 키 인증(`auth`) → 라우터
//!
//! 조립은 `crate::app()`에서 합니다.

pub mod auth;
pub mod recover;

pub use auth::{require_api_key, ApiKey, API_KEY_HEADER};
pub use recover::{handle_panic, recover_panics};
