use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let storage_backend = match lookup("STORAGE_BACKEND")
            .map(|raw| raw.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("") | Some("postgres") => StorageBackend::Postgres,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(anyhow!(
                    "STORAGE_BACKEND must be 'postgres' or 'memory', got '{other}'"
                ));
            }
        };

        let database_url = match storage_backend {
            StorageBackend::Postgres => Some(
                get_required(&lookup, "DATABASE_URL").context("DATABASE_URL is required")?,
            ),
            StorageBackend::Memory => lookup("DATABASE_URL"),
        };
        let database_max_connections =
            parse_positive(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?;

        let http_addr = match lookup("HTTP_ADDR") {
            Some(addr) if !addr.trim().is_empty() => addr.trim().to_string(),
            _ => {
                let port: u16 = parse_positive(&lookup, "PORT", 3000u16)?;
                format!("0.0.0.0:{port}")
            }
        };
        let cors_origins = parse_cors_origins(
            lookup("CORS_ORIGINS").unwrap_or_else(|| "http://127.0.0.1:5500".to_string()),
        );
        if cors_origins.is_empty() {
            return Err(anyhow!("CORS_ORIGINS must list at least one origin"));
        }
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let http_request_body_limit_bytes =
            parse_positive(&lookup, "HTTP_REQUEST_BODY_LIMIT_BYTES", 64 * 1024usize)?;
        let http_concurrency_limit = parse_positive(&lookup, "HTTP_CONCURRENCY_LIMIT", 256usize)?;
        let http_request_timeout_secs = parse_positive(&lookup, "HTTP_REQUEST_TIMEOUT_SECS", 10u64)?;

        Ok(Self {
            storage_backend,
            database_url,
            database_max_connections,
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
        })
    }
}

fn get_required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    let value = lookup(key).ok_or_else(|| anyhow!("{key} is not set"))?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default + ToString,
{
    let value = lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<T>()
        .map_err(|_| anyhow!("Failed to parse {key}, expecting positive integer"))?;

    if value == T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{Settings, StorageBackend};

    fn settings_from(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let err = settings_from(&[]).expect_err("DATABASE_URL must be required");
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn memory_backend_uses_defaults() {
        let settings = settings_from(&[("STORAGE_BACKEND", "memory")]).expect("must parse");

        assert_eq!(settings.storage_backend, StorageBackend::Memory);
        assert_eq!(settings.http_addr, "0.0.0.0:3000");
        assert_eq!(settings.cors_origins, ["http://127.0.0.1:5500"]);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.http_request_timeout_secs, 10);
    }

    #[test]
    fn port_is_used_when_http_addr_missing() {
        let settings = settings_from(&[
            ("DATABASE_URL", "postgres://localhost/skillboard"),
            ("PORT", "8081"),
        ])
        .expect("must parse");

        assert_eq!(settings.storage_backend, StorageBackend::Postgres);
        assert_eq!(settings.http_addr, "0.0.0.0:8081");
    }

    #[test]
    fn http_addr_wins_over_port() {
        let settings = settings_from(&[
            ("STORAGE_BACKEND", "memory"),
            ("HTTP_ADDR", "127.0.0.1:9000"),
            ("PORT", "8081"),
        ])
        .expect("must parse");
        assert_eq!(settings.http_addr, "127.0.0.1:9000");
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let settings = settings_from(&[
            ("STORAGE_BACKEND", "memory"),
            ("CORS_ORIGINS", " http://a.test , ,http://b.test "),
        ])
        .expect("must parse");
        assert_eq!(settings.cors_origins, ["http://a.test", "http://b.test"]);
    }

    #[test]
    fn zero_limits_are_rejected() {
        let err = settings_from(&[("STORAGE_BACKEND", "memory"), ("HTTP_CONCURRENCY_LIMIT", "0")])
            .expect_err("zero must be rejected");
        assert!(err.to_string().contains("HTTP_CONCURRENCY_LIMIT"));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(settings_from(&[("STORAGE_BACKEND", "mongo")]).is_err());
    }
}
