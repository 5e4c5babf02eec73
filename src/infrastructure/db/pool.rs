use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool};
use sqlx::pool::PoolOptions;
use sqlx::postgres::{PgConnectOptions, PgPool};

use crate::config::DatabaseConfig;

fn pool_options<DB: sqlx::Database>(config: &DatabaseConfig) -> PoolOptions<DB> {
    PoolOptions::<DB>::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .idle_timeout(Some(Duration::from_secs(config.idle_timeout_seconds)))
        .max_lifetime(Some(Duration::from_secs(config.max_lifetime_seconds)))
        .test_before_acquire(config.test_before_acquire)
}

fn missing_url() -> sqlx::Error {
    sqlx::Error::Configuration("database url is not set".into())
}

pub async fn create_pg_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let url = config.url.as_deref().ok_or_else(missing_url)?;
    let options: PgConnectOptions = url.parse()?;
    pool_options(config).connect_with(options).await
}

/// MySQL pool from either a url or the discrete `DB_HOST`-style settings.
pub async fn create_mysql_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    let options = match config.url.as_deref() {
        Some(url) => url.parse::<MySqlConnectOptions>()?,
        None => mysql_options_from_parts(config)?,
    };
    pool_options(config).connect_with(options).await
}

fn mysql_options_from_parts(config: &DatabaseConfig) -> Result<MySqlConnectOptions, sqlx::Error> {
    let host = config
        .host
        .as_deref()
        .ok_or_else(|| sqlx::Error::Configuration("DB_HOST is not set".into()))?;

    let mut options = MySqlConnectOptions::new().host(host);
    if let Some(port) = config.port {
        options = options.port(port);
    }
    if let Some(user) = config.user.as_deref() {
        options = options.username(user);
    }
    if let Some(password) = config.password.as_deref() {
        options = options.password(password);
    }
    if let Some(name) = config.name.as_deref() {
        options = options.database(name);
    }
    Ok(options)
}
