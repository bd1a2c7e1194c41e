//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수(또는 `.env` 파일)에서 서버 설정값을 한 번 읽어 `Config`를 만듭니다.
//! 만들어진 `Config`는 `main`에서 각 구성 요소에 명시적으로 전달되며,
//! 전역 상태로 보관하지 않습니다.
//!
//! | 구역 | 환경변수 | 기본값 |
//! |------|----------|--------|
//! | server | `HOST` | `0.0.0.0` |
//! | server | `PORT` | `3000` |
//! | server | `API_KEY` | (필수) |
//! | server | `SHUTDOWN_GRACE_SECS` | `30` |
//! | database | `DATABASE_URL` | (필수) |
//! | database | `DB_MIN_CONNECTIONS` | `1` |
//! | database | `DB_MAX_CONNECTIONS` | `10` |
//! | database | `DB_MAX_LIFETIME_MINS` | `60` (`0`이면 무제한) |
//! | database | `DB_MAX_IDLE_MINS` | `10` (`0`이면 무제한) |
//! | database | `DB_ACQUIRE_TIMEOUT_SECS` | `10` |
//! | database | `DB_BUSY_TIMEOUT_SECS` | `5` |
//! | log | `LOG_LEVEL` | `info` |
//! | log | `LOG_FORMAT` | `text` / `json` |
//! | log | `LOG_OUTPUT` | `stdout` / `file` |
//! | log | `LOG_FILE_PATH` | `category-api.log` |
//! | test | `TEST_TIMEOUT_SECS` | `10` |

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// 애플리케이션 전체 설정
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub log: LogConfig,
    pub test: TestConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 서버가 바인딩할 호스트 주소
    pub host: String,
    pub port: u16,
    /// `X-API-Key` 헤더와 비교하는 공유 비밀값
    pub api_key: String,
    /// 종료 시그널 이후 처리 중인 요청을 기다려 주는 시간
    pub shutdown_grace: Duration,
}

/// 연결 풀 설정
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 데이터베이스 URL (예: `sqlite:data/categories.db`, `sqlite::memory:`)
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    /// 연결의 최대 수명. `None`이면 무제한
    pub max_lifetime: Option<Duration>,
    /// 유휴 연결을 닫기까지의 시간. `None`이면 무제한
    pub max_idle: Option<Duration>,
    /// 풀에서 연결을 얻기까지 기다리는 최대 시간
    pub acquire_timeout: Duration,
    /// 다른 연결이 쓰기 잠금을 쥐고 있을 때 SQLite가 기다려 주는 최대 시간
    pub busy_timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    File,
}

impl FromStr for LogOutput {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stdout" => Ok(LogOutput::Stdout),
            "file" => Ok(LogOutput::File),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// tracing 필터 레벨 (`trace`, `debug`, `info`, `warn`, `error`)
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
    /// `output`이 `File`일 때 로그를 덧붙여 쓸 파일
    pub file_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct TestConfig {
    /// 테스트에서 DB 작업 하나에 허용하는 최대 시간
    pub timeout: Duration,
}

impl Config {
    /// 프로세스 환경변수에서 설정을 읽습니다.
    ///
    /// # 에러
    /// `API_KEY`, `DATABASE_URL`이 없거나, 숫자/열거형 값을 해석할 수 없으면 에러입니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 키 → 값 조회 함수로부터 설정을 만듭니다.
    ///
    /// `from_env`의 본체입니다. 테스트에서는 프로세스 환경을 건드리지 않고
    /// `HashMap` 등을 조회 함수로 넘깁니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerConfig {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            api_key: required(&lookup, "API_KEY")?,
            shutdown_grace: Duration::from_secs(parse_or(&lookup, "SHUTDOWN_GRACE_SECS", 30)?),
        };

        let database = DatabaseConfig {
            url: required(&lookup, "DATABASE_URL")?,
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 1)?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            max_lifetime: minutes(parse_or(&lookup, "DB_MAX_LIFETIME_MINS", 60)?),
            max_idle: minutes(parse_or(&lookup, "DB_MAX_IDLE_MINS", 10)?),
            acquire_timeout: Duration::from_secs(parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 10)?),
            busy_timeout: Duration::from_secs(parse_or(&lookup, "DB_BUSY_TIMEOUT_SECS", 5)?),
        };
        if database.min_connections > database.max_connections {
            return Err(ConfigError::Invalid {
                key: "DB_MIN_CONNECTIONS",
                value: database.min_connections.to_string(),
            });
        }

        let log = LogConfig {
            level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: parse_or(&lookup, "LOG_FORMAT", LogFormat::Text)?,
            output: parse_or(&lookup, "LOG_OUTPUT", LogOutput::Stdout)?,
            file_path: lookup("LOG_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("category-api.log")),
        };

        let test = TestConfig {
            timeout: Duration::from_secs(parse_or(&lookup, "TEST_TIMEOUT_SECS", 10)?),
        };

        Ok(Self {
            server,
            database,
            log,
            test,
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or(ConfigError::Missing(key))
}

/// 값이 있으면 `T`로 해석하고, 없으면 기본값을 사용합니다.
fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

// 0분은 "제한 없음"
fn minutes(value: u64) -> Option<Duration> {
    (value > 0).then(|| Duration::from_secs(value * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn applies_defaults_when_only_required_values_are_set() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_KEY", "secret"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.api_key, "secret");
        assert_eq!(config.server.shutdown_grace, Duration::from_secs(30));
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.max_lifetime, Some(Duration::from_secs(3600)));
        assert_eq!(config.database.max_idle, Some(Duration::from_secs(600)));
        assert_eq!(config.database.acquire_timeout, Duration::from_secs(10));
        assert_eq!(config.database.busy_timeout, Duration::from_secs(5));
        assert_eq!(config.log.format, LogFormat::Text);
        assert_eq!(config.log.output, LogOutput::Stdout);
        assert_eq!(config.test.timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_explicit_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("API_KEY", "secret"),
            ("DATABASE_URL", "sqlite:data/categories.db"),
            ("DB_MIN_CONNECTIONS", "2"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_MAX_LIFETIME_MINS", "0"),
            ("DB_BUSY_TIMEOUT_SECS", "2"),
            ("LOG_FORMAT", "JSON"),
            ("LOG_OUTPUT", "file"),
            ("LOG_FILE_PATH", "/tmp/app.log"),
        ]))
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.min_connections, 2);
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.max_lifetime, None);
        assert_eq!(config.database.busy_timeout, Duration::from_secs(2));
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.output, LogOutput::File);
        assert_eq!(config.log.file_path, PathBuf::from("/tmp/app.log"));
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let error = Config::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite::memory:")]))
            .unwrap_err();

        assert_eq!(error, ConfigError::Missing("API_KEY"));
    }

    #[test]
    fn unparseable_port_is_an_error() {
        let error = Config::from_lookup(lookup_from(&[
            ("API_KEY", "secret"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("PORT", "http"),
        ]))
        .unwrap_err();

        assert_eq!(
            error,
            ConfigError::Invalid {
                key: "PORT",
                value: "http".to_string()
            }
        );
    }

    #[test]
    fn unknown_log_output_is_an_error() {
        let error = Config::from_lookup(lookup_from(&[
            ("API_KEY", "secret"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("LOG_OUTPUT", "syslog"),
        ]))
        .unwrap_err();

        assert!(matches!(error, ConfigError::Invalid { key: "LOG_OUTPUT", .. }));
    }

    #[test]
    fn min_connections_above_max_is_an_error() {
        let error = Config::from_lookup(lookup_from(&[
            ("API_KEY", "secret"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_MIN_CONNECTIONS", "20"),
        ]))
        .unwrap_err();

        assert!(matches!(error, ConfigError::Invalid { key: "DB_MIN_CONNECTIONS", .. }));
    }
}
