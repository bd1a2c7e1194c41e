//! # 로깅(tracing) 초기화
//!
//! `LogConfig`에 따라 전역 tracing subscriber를 등록합니다.
//! - 레벨: `RUST_LOG`가 있으면 그것을, 없으면 `LOG_LEVEL`을 사용
//! - 포맷: 사람이 읽는 텍스트 또는 JSON
//! - 출력: 표준 출력 또는 파일(덧붙여 쓰기)

use std::{fs::OpenOptions, sync::Arc};

use anyhow::Context;
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::config::{LogConfig, LogFormat, LogOutput};

/// 설정된 레벨로 이 크레이트와 HTTP 미들웨어 로그를 켜는 필터를 만듭니다.
pub fn env_filter(config: &LogConfig) -> anyhow::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directives = format!(
        "category_api={level},tower_http={level}",
        level = config.level
    );
    EnvFilter::try_new(&directives).with_context(|| format!("invalid LOG_LEVEL {:?}", config.level))
}

/// 전역 로거를 등록합니다. 프로세스당 한 번만 호출해야 합니다.
pub fn init_tracing(config: &LogConfig) -> anyhow::Result<()> {
    let filter = env_filter(config)?;

    let writer = match config.output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::File => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.file_path)
                .with_context(|| format!("failed to open log file {}", config.file_path.display()))?;
            BoxMakeWriter::new(Arc::new(file))
        }
    };

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(writer);

    match config.format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .try_init()?,
    }

    Ok(())
}
