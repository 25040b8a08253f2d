//! Process configuration, read from the environment after `.env` is loaded.
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3478;
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unsupported DB_DIALECT: {0}")]
    UnsupportedDialect(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid DATABASE_URL: {0}")]
    DatabaseUrl(#[source] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Memory,
}

impl FromStr for Dialect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "memory" => Ok(Dialect::Memory),
            other => Err(ConfigError::UnsupportedDialect(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub dialect: Dialect,
    /// Takes precedence over the individual `DB_*` parts when set.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let dialect = match get("DB_DIALECT") {
            Some(raw) => raw.parse()?,
            None => Dialect::Postgres,
        };

        Ok(Self {
            host: parse_or(get("HOST"), "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            database: DatabaseConfig {
                dialect,
                url: get("DATABASE_URL"),
                host: get("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: parse_or(get("DB_PORT"), "DB_PORT", DEFAULT_DB_PORT)?,
                name: get("DB_NAME"),
                user: get("DB_USER"),
                password: get("DB_PASS"),
                max_connections: parse_or(
                    get("DB_MAX_CONNECTIONS"),
                    "DB_MAX_CONNECTIONS",
                    DEFAULT_MAX_CONNECTIONS,
                )?,
            },
        })
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return url.parse().map_err(ConfigError::DatabaseUrl);
        }

        let name = self.name.as_deref().ok_or(ConfigError::Missing("DB_NAME"))?;
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(name);
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        Ok(options)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_bind_all_interfaces_on_3478() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.port, 3478);
        assert_eq!(config.database.dialect, Dialect::Postgres);
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.host, "localhost");
    }

    #[test]
    fn reads_database_parts() {
        let config = config_from(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_NAME", "users"),
            ("DB_USER", "app"),
            ("DB_PASS", "secret"),
            ("DB_DIALECT", "postgres"),
        ])
        .unwrap();

        let options = config.database.connect_options().unwrap();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("users"));
        assert_eq!(options.get_username(), "app");
    }

    #[test]
    fn database_name_is_required_without_url() {
        let config = config_from(&[]).unwrap();
        let err = config.database.connect_options().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DB_NAME")));
    }

    #[test]
    fn database_url_wins_over_parts() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://u:p@example.com:5433/other"),
            ("DB_NAME", "ignored"),
        ])
        .unwrap();
        let options = config.database.connect_options().unwrap();
        assert_eq!(options.get_host(), "example.com");
        assert_eq!(options.get_database(), Some("other"));
    }

    #[test]
    fn rejects_unknown_dialect_and_bad_port() {
        assert!(matches!(
            config_from(&[("DB_DIALECT", "mysql")]),
            Err(ConfigError::UnsupportedDialect(d)) if d == "mysql"
        ));
        assert!(matches!(
            config_from(&[("PORT", "http")]),
            Err(ConfigError::InvalidValue { key: "PORT", .. })
        ));
        assert_eq!(
            config_from(&[("DB_DIALECT", "Memory")]).unwrap().database.dialect,
            Dialect::Memory
        );
    }
}
