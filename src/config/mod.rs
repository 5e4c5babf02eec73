pub mod database_config;
pub mod defaults;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use thiserror::Error;

pub use database_config::{DatabaseBackend, DatabaseConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("database configuration is invalid: {0}")]
    Database(String),

    #[error("ranking configuration is invalid: {0}")]
    Ranking(String),
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "defaults::default_host")]
    pub host: String,
    #[serde(default = "defaults::default_port")]
    pub port: u16,
    #[serde(default = "defaults::default_environment")]
    pub environment: String,
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default = "defaults::default_metrics_allow_private_only")]
    pub metrics_allow_private_only: bool,
    #[serde(default = "defaults::default_shutdown_timeout_seconds")]
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::default_host(),
            port: defaults::default_port(),
            environment: defaults::default_environment(),
            workers: None,
            metrics_allow_private_only: defaults::default_metrics_allow_private_only(),
            shutdown_timeout_seconds: defaults::default_shutdown_timeout_seconds(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "defaults::default_logging_level")]
    pub level: String,
    #[serde(default = "defaults::default_logging_json_format")]
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::default_logging_level(),
            json_format: defaults::default_logging_json_format(),
        }
    }
}

/// Ranking defaults applied when a query does not carry its own radius.
///
/// The radius is unset by default so that every stored school is returned.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RankingConfig {
    #[serde(default)]
    pub default_max_distance_km: Option<f64>,
}

impl RankingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.default_max_distance_km {
            Some(radius) if !radius.is_finite() || radius < 0.0 => Err(ConfigError::Ranking(
                format!("default_max_distance_km must be a non-negative number, got {radius}"),
            )),
            _ => Ok(()),
        }
    }
}

/// Environment variables under `prefix` land in `section`, with `__` for nesting.
fn section_env(prefix: &str, section: &'static str) -> Env {
    Env::prefixed(prefix)
        .split("__")
        .map(move |key| format!("{section}.{}", key.as_str()).into())
}

impl AppConfig {
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Toml::file("config/local.toml"))
            .merge(Env::prefixed("APP_").split("__"))
            .merge(section_env("SERVER_", "server"))
            .merge(section_env("DATABASE_", "database"))
            .merge(section_env("LOGGING_", "logging"))
            .merge(section_env("RANKING_", "ranking"))
            .merge(
                Env::raw()
                    .only(&[
                        "PORT",
                        "RUST_LOG",
                        "DB_HOST",
                        "DB_PORT",
                        "DB_USER",
                        "DB_PASSWORD",
                        "DB_NAME",
                    ])
                    .map(|key| match key.as_str() {
                        "PORT" => "server.port".into(),
                        "RUST_LOG" => "logging.level".into(),
                        "DB_HOST" => "database.host".into(),
                        "DB_PORT" => "database.port".into(),
                        "DB_USER" => "database.user".into(),
                        "DB_PASSWORD" => "database.password".into(),
                        "DB_NAME" => "database.name".into(),
                        _ => key.into(),
                    }),
            )
    }

    pub fn from_env() -> Result<Self, Box<figment::Error>> {
        let mut config: Self = Self::figment().extract().map_err(Box::new)?;

        config.database.url = defaults::normalize_optional_string(config.database.url);
        config.database.host = defaults::normalize_optional_string(config.database.host);
        config.database.user = defaults::normalize_optional_string(config.database.user);
        config.database.name = defaults::normalize_optional_string(config.database.name);

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.ranking.validate()
    }
}
