//! # 카테고리 API
//!
//! 카테고리 리소스 하나를 관리하는 REST API 서버의 라이브러리 부분입니다.
//! 바이너리(`main.rs`)는 설정을 읽고 의존성을 조립한 뒤 `app()`이 만든 라우터를 서빙합니다.
//!
//! ## 계층 구조
//! ```text
//! 요청 → panic 복구 → CORS → 요청 로깅 → API 키 인증 → 라우터 → 컨트롤러
//!      → 유스케이스(트랜잭션) → 저장소(SQL) → commit/rollback → 응답
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

// ── 외부 크레이트 가져오기 ──
use axum::{
    middleware::from_fn_with_state, // 상태(API 키)를 받는 함수형 미들웨어
    Router,                         // URL 경로와 핸들러를 연결하는 라우터
};
use tower_http::{
    cors::{Any, CorsLayer}, // CORS(Cross-Origin Resource Sharing) 설정
    trace::TraceLayer,      // HTTP 요청/응답 자동 로깅
};

// main.rs와 테스트에서 `category_api::AppState`로 바로 쓸 수 있게 재공개합니다.
pub use routes::AppState;

/// 미들웨어가 모두 적용된 애플리케이션 라우터
///
/// `.layer()`는 나중에 추가한 것이 더 바깥에서 실행됩니다.
/// 따라서 요청은 panic 복구 → CORS → 요청 로깅 → API 키 인증 → 핸들러 순으로 지나갑니다.
/// panic 복구가 가장 바깥이므로, 어느 레이어에서 panic이 나도 500 응답 하나로 끝납니다.
pub fn app(state: AppState) -> Router {
    // ── 1단계: CORS 설정 ──
    // 모든 출처/메서드/헤더를 허용합니다. 접근 제어는 API 키가 담당합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::router()
        // ── 2단계: API 키 인증 (가장 안쪽) ──
        // 키가 맞지 않으면 여기서 401로 끝나고 핸들러는 호출되지 않습니다.
        // Router::layer는 fallback(없는 경로)에도 적용됩니다.
        .layer(from_fn_with_state(
            state.api_key.clone(),
            middleware::require_api_key,
        ))
        // ── 3단계: 요청/응답 로깅 ──
        // 401을 포함한 모든 응답이 로그에 남도록 인증보다 바깥에 둡니다.
        .layer(TraceLayer::new_for_http())
        // ── 4단계: CORS ──
        .layer(cors)
        // ── 5단계: panic 복구 (가장 바깥) ──
        .layer(middleware::recover_panics())
        // ── 6단계: 상태 주입 ──
        // .with_state(): 모든 핸들러가 State<AppState>로 유스케이스를 꺼내 쓸 수 있게 합니다.
        .with_state(state)
}
