use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;

/// API 키를 담는 요청 헤더 이름
pub const API_KEY_HEADER: &str = "x-api-key";

/// 설정에서 읽은 공유 비밀값
///
/// `Arc<str>`이므로 요청마다 clone해도 문자열이 복사되지 않습니다.
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    fn matches(&self, provided: Option<&str>) -> bool {
        provided == Some(self.0.as_ref())
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// `X-API-Key` 헤더가 설정된 키와 정확히 같을 때만 다음 핸들러로 넘깁니다.
///
/// 헤더가 없거나 다르면 401 `"unauthorized"`로 응답하고,
/// 내부 라우터는 호출되지 않습니다.
pub async fn require_api_key(
    State(api_key): State<ApiKey>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if !api_key.matches(provided) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "rejected request with missing or invalid api key"
        );
        return Err(AppError::Unauthorized("unauthorized".to_string()));
    }

    Ok(next.run(request).await)
}
