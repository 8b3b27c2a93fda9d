//! Environment-derived configuration.
//!
//! Loaded once, before the [`crate::context::Context`] is built, and never mutated
//! afterwards.
//!
//! | Variable | Default |
//! |---|---|
//! | `APP_NAME` | `ignitor` |
//! | `APP_ENV` | `development` (`production`, `test`) |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `3000` |
//! | `DATABASE_URL` | unset |
//! | `RUST_LOG` | `info` |
//! | `LOG_FORMAT` | `text` (`json`) |

use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;
use strum_macros::{Display, EnumString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to read .env file: {0}")]
    DotEnv(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    Development,
    Production,
    Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `ignitor=debug,tower=warn`.
    pub level: String,
    pub format: LogFormat,
}

/// Immutable application settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub log: LogConfig,
    settings: BTreeMap<String, String>,
}

impl AppConfig {
    /// Load `.env` (when present) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(ConfigError::DotEnv(e.to_string())),
        }
        Self::from_vars(env::vars())
    }

    /// Build from explicit key/value pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let settings: BTreeMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let defaults = Self::default();
        let lookup = |key: &str| settings.get(key).map(String::as_str);

        let app_name = lookup("APP_NAME").map_or(defaults.app_name, str::to_string);
        let environment = parse_or("APP_ENV", lookup("APP_ENV"), defaults.environment)?;
        let host = lookup("HOST").map_or(defaults.host, str::to_string);
        let port = parse_or("PORT", lookup("PORT"), defaults.port)?;
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .map(str::to_string);
        let log = LogConfig {
            level: lookup("RUST_LOG").map_or(defaults.log.level, str::to_string),
            format: parse_or("LOG_FORMAT", lookup("LOG_FORMAT"), defaults.log.format)?,
        };

        Ok(Self {
            app_name,
            environment,
            host,
            port,
            database_url,
            log,
            settings,
        })
    }

    /// Raw setting as it was read.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "ignitor".to_string(),
            environment: Environment::Development,
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            log: LogConfig {
                level: "info".to_string(),
                format: LogFormat::Text,
            },
            settings: BTreeMap::new(),
        }
    }
}

fn parse_or<T>(key: &'static str, raw: Option<&str>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None | Some("") => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}
