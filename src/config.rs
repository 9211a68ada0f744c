/*
 * Responsibility
 * - 環境変数 (.env 含む) から起動設定を読み込む
 * - 必須キーが無ければ起動失敗 (ConfigError)
 * - 数値系は不正値ならデフォルトに倒さずエラーにする
 */
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    pub run_migrations: bool,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,

    // HS256 shared secret; the auth server signs with the same value
    pub api_secret: String,
    pub access_token_leeway_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// `from_env` is the production entry point; tests pass a map-backed closure.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let database_url = required(&lookup, "DATABASE_URL")?;
        let db_max_connections: u32 = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid("DB_MAX_CONNECTIONS"));
        }
        let run_migrations: bool = parse_or(&lookup, "RUN_MIGRATIONS", true)?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECONDS", 30)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"));
        }
        let request_body_limit_bytes: usize =
            parse_or(&lookup, "REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;

        let api_secret = required(&lookup, "API_SECRET")?;
        let access_token_leeway_seconds: u64 =
            parse_or(&lookup, "ACCESS_TOKEN_LEEWAY_SECONDS", 60)?;

        Ok(Self {
            addr,
            database_url,
            db_max_connections,
            run_migrations,
            app_env,
            cors_allowed_origins,
            request_timeout: Duration::from_secs(timeout_secs),
            request_body_limit_bytes,
            api_secret,
            access_token_leeway_seconds,
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|_| ConfigError::Invalid(key))
        }
        _ => Ok(default),
    }
}
