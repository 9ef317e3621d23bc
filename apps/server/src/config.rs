use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{bail, Context};

/// Which record store backend to run on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Redis,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => bail!("Unknown FA_STORAGE '{other}' (expected sqlite, redis or memory)"),
        }
    }
}

/// Log output format (`FA_LOG_FORMAT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => bail!("Unknown FA_LOG_FORMAT '{other}' (expected json or text)"),
        }
    }
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub storage: StorageBackend,
    pub db_path: String,
    pub redis_url: Option<String>,
    /// Raw `FA_JWT_SECRET`; decoded by the credential module.
    pub jwt_secret: Option<String>,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_timeout: Duration,
    pub strict_plan_audit: bool,
    pub log_format: LogFormat,
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses `raw` when the variable is set; malformed values are startup errors.
fn parse_setting<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {key} '{value}': {e}")),
        None => Ok(default),
    }
}

fn setting<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_setting(key, std::env::var(key).ok(), default)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = var_or("FA_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid FA_LISTEN_ADDR")?;
        let storage: StorageBackend = var_or("FA_STORAGE", "sqlite").parse()?;
        let redis_url = std::env::var("FA_REDIS_URL").ok().filter(|s| !s.is_empty());
        if storage == StorageBackend::Redis && redis_url.is_none() {
            bail!("FA_REDIS_URL is required when FA_STORAGE=redis");
        }
        let cors_allow = var_or("FA_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = setting("FA_REQUEST_TIMEOUT_MS", 30_000)?;
        let llm_timeout_secs: u64 = setting("FA_LLM_TIMEOUT_SECS", 15)?;
        let log_format: LogFormat = setting("FA_LOG_FORMAT", LogFormat::Json)?;
        let strict_plan_audit = matches!(
            var_or("FA_STRICT_PLAN_AUDIT", "false")
                .to_ascii_lowercase()
                .as_str(),
            "1" | "true" | "yes"
        );

        Ok(Self {
            listen_addr,
            storage,
            db_path: var_or("FA_DB_PATH", "./db/app.db"),
            redis_url,
            jwt_secret: std::env::var("FA_JWT_SECRET").ok().filter(|s| !s.is_empty()),
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            llm_api_url: var_or("FA_LLM_API_URL", folioadvisor_ai::DEFAULT_API_URL),
            llm_model: var_or("FA_LLM_MODEL", folioadvisor_ai::DEFAULT_MODEL),
            llm_timeout: Duration::from_secs(llm_timeout_secs),
            strict_plan_audit,
            log_format,
        })
    }

    /// Defaults with the in-process store; what tests start from.
    pub fn in_memory() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            storage: StorageBackend::Memory,
            db_path: String::new(),
            redis_url: None,
            jwt_secret: None,
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_secs(30),
            llm_api_url: folioadvisor_ai::DEFAULT_API_URL.to_string(),
            llm_model: folioadvisor_ai::DEFAULT_MODEL.to_string(),
            llm_timeout: Duration::from_secs(15),
            strict_plan_audit: false,
            log_format: LogFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!("SQLite".parse::<StorageBackend>().unwrap(), StorageBackend::Sqlite);
        assert_eq!(" redis ".parse::<StorageBackend>().unwrap(), StorageBackend::Redis);
        assert!("postgres".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_malformed_numbers_are_rejected() {
        let err = parse_setting::<u64>("FA_REQUEST_TIMEOUT_MS", Some("30s".into()), 30_000)
            .unwrap_err();
        assert!(err.to_string().contains("FA_REQUEST_TIMEOUT_MS"));
        assert_eq!(
            parse_setting::<u64>("FA_LLM_TIMEOUT_SECS", Some(" 20 ".into()), 15).unwrap(),
            20
        );
        assert_eq!(parse_setting::<u64>("FA_LLM_TIMEOUT_SECS", None, 15).unwrap(), 15);
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!(parse_setting::<LogFormat>("FA_LOG_FORMAT", Some("xml".into()), LogFormat::Json)
            .is_err());
    }
}
