use std::fmt;

use serde::Deserialize;

use super::defaults;
use super::ConfigError;

/// Storage engines a `schools` table can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Postgres,
    MySql,
}

impl DatabaseBackend {
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        let scheme = url
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .ok_or_else(|| ConfigError::Database("database url must include a scheme".into()))?;

        match scheme.as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::MySql),
            other => Err(ConfigError::Database(format!(
                "unsupported database scheme `{other}`; expected postgres or mysql"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::MySql => "mysql",
        }
    }
}

/// Connection settings. Either `url` is set, or the discrete `host`/`user`/
/// `password`/`name` fields describe a MySQL server.
#[derive(Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "defaults::default_db_max_connections")]
    pub max_connections: u32,
    #[serde(default = "defaults::default_db_min_connections")]
    pub min_connections: u32,
    #[serde(default = "defaults::default_db_acquire_timeout_seconds")]
    pub acquire_timeout_seconds: u64,
    #[serde(default = "defaults::default_db_idle_timeout_seconds")]
    pub idle_timeout_seconds: u64,
    #[serde(default = "defaults::default_db_max_lifetime_seconds")]
    pub max_lifetime_seconds: u64,
    #[serde(default = "defaults::default_db_test_before_acquire")]
    pub test_before_acquire: bool,
    #[serde(default = "defaults::default_db_run_migrations")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: None,
            port: None,
            user: None,
            password: None,
            name: None,
            max_connections: defaults::default_db_max_connections(),
            min_connections: defaults::default_db_min_connections(),
            acquire_timeout_seconds: defaults::default_db_acquire_timeout_seconds(),
            idle_timeout_seconds: defaults::default_db_idle_timeout_seconds(),
            max_lifetime_seconds: defaults::default_db_max_lifetime_seconds(),
            test_before_acquire: defaults::default_db_test_before_acquire(),
            run_migrations: defaults::default_db_run_migrations(),
        }
    }
}

impl DatabaseConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Backend chosen from the url scheme; discrete host settings imply MySQL.
    pub fn backend(&self) -> Result<DatabaseBackend, ConfigError> {
        match (&self.url, &self.host) {
            (Some(url), _) => DatabaseBackend::from_url(url),
            (None, Some(_)) => Ok(DatabaseBackend::MySql),
            (None, None) => Err(ConfigError::Database(
                "DATABASE_URL or DB_HOST must be set".to_string(),
            )),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend()?;

        if self.url.is_none() && self.name.is_none() {
            return Err(ConfigError::Database(
                "DB_NAME is required when DATABASE_URL is not set".to_string(),
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::Database(
                "max_connections must be greater than zero".to_string(),
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::Database(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "[REDACTED]"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout_seconds", &self.acquire_timeout_seconds)
            .field("idle_timeout_seconds", &self.idle_timeout_seconds)
            .field("max_lifetime_seconds", &self.max_lifetime_seconds)
            .field("test_before_acquire", &self.test_before_acquire)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}
