use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: Option<String>,
    pub storage: StorageKind,
    pub database_max_connections: u32,
    pub api_prefix: String,
    pub public_rps: u32,
    pub admin_rps: u32,
    pub cors_allowed_origin: Option<String>,
    pub log_format: LogFormat,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL");
        let storage = match get("STORAGE").as_deref() {
            Some("postgres") => StorageKind::Postgres,
            Some("memory") => StorageKind::Memory,
            Some(other) => {
                return Err(Error::Config(format!(
                    "Invalid value for STORAGE: {} (expected postgres or memory)",
                    other
                )))
            }
            None if database_url.is_some() => StorageKind::Postgres,
            None => StorageKind::Memory,
        };
        if storage == StorageKind::Postgres && database_url.is_none() {
            return Err(Error::Config(
                "Missing environment variable: DATABASE_URL".to_string(),
            ));
        }

        let log_format = match get("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(Error::Config(format!(
                    "Invalid value for LOG_FORMAT: {}",
                    other
                )))
            }
        };

        let api_prefix = get("API_PREFIX").unwrap_or_else(|| "/api".to_string());
        let api_prefix = format!("/{}", api_prefix.trim_matches('/'));

        Ok(Self {
            server_address: get("SERVER_ADDRESS").unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            database_url,
            storage,
            database_max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 10)?,
            api_prefix,
            public_rps: parse_or(&get, "PUBLIC_RPS", 20)?,
            admin_rps: parse_or(&get, "ADMIN_RPS", 100)?,
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN"),
            log_format,
        })
    }
}

fn parse_or<T, F>(get: &F, name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        None => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_to_memory_without_database_url() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.server_address, "0.0.0.0:8000");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.public_rps, 20);
        assert_eq!(config.admin_rps, 100);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn database_url_selects_postgres() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/salaries")]).unwrap();
        assert_eq!(config.storage, StorageKind::Postgres);
        assert_eq!(config.database_max_connections, 10);
    }

    #[test]
    fn postgres_storage_requires_url() {
        let err = config_from(&[("STORAGE", "postgres")]).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("DATABASE_URL")));
    }

    #[test]
    fn prefix_is_normalized() {
        let config = config_from(&[("API_PREFIX", "v1/")]).unwrap();
        assert_eq!(config.api_prefix, "/v1");
    }

    #[test]
    fn rejects_unparsable_numbers() {
        let err = config_from(&[("PUBLIC_RPS", "lots")]).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("PUBLIC_RPS")));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("DATABASE_URL", "  "), ("LOG_FORMAT", "json")]).unwrap();
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
