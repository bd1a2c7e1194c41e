//! # panic 복구
//!
//! 요청 처리 중 panic이 발생하면 `CatchPanicLayer`가 잡아 이 모듈의
//! `handle_panic`을 호출합니다. panic은 프로세스 밖으로 새어 나가지 않고,
//! 내부 서버 에러와 똑같은 500 응답(`"something went wrong"`) 하나로 바뀝니다.

use std::any::Any;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::AppError;

/// panic을 500 응답으로 바꾸는 레이어
pub fn recover_panics() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(handle_panic as fn(Box<dyn Any + Send + 'static>) -> Response)
}

/// panic 값(payload)을 로그에 남기고 내부 서버 에러 응답을 만듭니다.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::internal("panic recovery", anyhow::anyhow!(message)).into_response()
}
