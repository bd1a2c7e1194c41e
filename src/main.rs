//! # 카테고리 API 서버 진입점
//!
//! 1. 환경변수(.env) 로딩과 설정 파싱
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성과 마이그레이션
//! 4. ID 생성기 → 저장소 → 유스케이스 → 라우터 순으로 의존성 조립
//! 5. HTTP 서버 시작, 종료 신호를 받으면 유예 시간 안에서 graceful shutdown

// ── 외부 크레이트 및 모듈에서 필요한 항목 가져오기 ──
use std::{
    future::IntoFuture, // axum::serve(...)를 select!에서 직접 기다리기 위한 변환
    sync::Arc,          // 여러 요청이 공유하는 의존성을 참조 카운트로 감쌉니다
    time::Duration,
};

use anyhow::Result; // 어떤 에러 타입이든 담을 수 있는 범용 Result
use category_api::{
    app,                                    // 미들웨어가 모두 적용된 라우터
    config::Config,                         // 환경변수에서 읽은 설정
    db::{self, SqliteCategoryRepository},   // 연결 풀 / 카테고리 저장소
    logging,                                // tracing 초기화
    middleware::ApiKey,                     // X-API-Key 비교 값
    services::{CategoryService, NanoIdGenerator},
    AppState,
};
use tokio::sync::Notify; // 종료 신호를 받았다는 사실을 다른 태스크에 알립니다

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러가 아닙니다. (.ok()로 무시)
    dotenvy::dotenv().ok();

    // ── 2단계: 설정 파싱 ──
    // API_KEY, DATABASE_URL이 없거나 값이 잘못되면 여기서 시작을 멈춥니다.
    let config = Config::from_env()?;

    // ── 3단계: 로깅(tracing) 초기화 ──
    // 이 시점 이후의 tracing::info! 등이 설정된 포맷/출력으로 기록됩니다.
    logging::init_tracing(&config.log)?;

    // ── 4단계: SQLite 연결 풀 생성 ──
    // WAL 모드와 busy_timeout이 모든 연결에 적용됩니다.
    let pool = db::create_pool(&config.database).await?;

    // ── 5단계: 데이터베이스 마이그레이션 ──
    // ./migrations 폴더의 SQL 중 아직 적용되지 않은 것만 실행합니다.
    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await?;

    // ── 6단계: 의존성 조립 (생성자 주입) ──
    // ID 생성기 → 저장소 → 유스케이스 → 애플리케이션 상태 순으로 안쪽부터 만듭니다.
    // Arc<구체 타입>은 인자로 넘길 때 Arc<dyn 트레이트>로 자동 변환됩니다.
    let id_generator = Arc::new(NanoIdGenerator);
    let repository = Arc::new(SqliteCategoryRepository::new(id_generator));
    let categories = Arc::new(CategoryService::new(pool.clone(), repository));
    let state = AppState::new(categories, ApiKey::new(&config.server.api_key));

    // ── 7단계: 서버 시작 ──
    // (host, port) 튜플로 바인딩합니다.
    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    // 종료 신호를 받으면 새 연결을 그만 받고, 진행 중인 요청이 끝나길 기다립니다.
    let stopping = Arc::new(Notify::new());
    let server = axum::serve(listener, app(state)).with_graceful_shutdown({
        let stopping = stopping.clone();
        async move {
            shutdown_signal().await;
            // notify_one은 대기자가 아직 없어도 허가(permit)를 남겨 둡니다.
            stopping.notify_one();
        }
    });

    // ── 8단계: 유예 시간 관리 ──
    // 종료 신호 이후 유예 시간이 지나도 끝나지 않은 요청은 기다리지 않습니다.
    // select!: 두 future 중 먼저 끝나는 쪽을 택하고 나머지는 취소합니다.
    let grace = config.server.shutdown_grace;
    tokio::select! {
        result = server.into_future() => result?,
        _ = grace_expired(&stopping, grace) => {
            tracing::warn!(?grace, "in-flight requests did not finish within the grace period");
        }
    }

    // ── 9단계: 정리 ──
    // 풀의 모든 연결을 닫아 WAL 내용을 데이터베이스 파일에 반영합니다.
    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn grace_expired(stopping: &Notify, grace: Duration) {
    stopping.notified().await;
    tracing::info!(?grace, "Shutting down, waiting for in-flight requests");
    tokio::time::sleep(grace).await;
}

/// Ctrl+C(SIGINT) 또는 SIGTERM을 기다립니다.
///
/// 시그널 핸들러 등록에 실패하면 로그를 남기고 해당 시그널은 무시합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}
