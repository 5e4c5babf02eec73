pub mod migrations;
pub mod pool;

use std::sync::Arc;

use sqlx::mysql::MySqlPool;
use sqlx::postgres::PgPool;

use crate::config::{DatabaseBackend, DatabaseConfig};
use crate::infrastructure::repositories::{
    MySqlSchoolRepository, PgSchoolRepository, SchoolRepository,
};

/// Owns the connection pool for whichever backend the configuration selects.
#[derive(Clone, Debug)]
pub enum Database {
    Postgres(PgPool),
    MySql(MySqlPool),
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let backend = config
            .backend()
            .map_err(|err| sqlx::Error::Configuration(Box::new(err)))?;

        match backend {
            DatabaseBackend::Postgres => pool::create_pg_pool(config).await.map(Self::Postgres),
            DatabaseBackend::MySql => pool::create_mysql_pool(config).await.map(Self::MySql),
        }
    }

    pub fn backend(&self) -> DatabaseBackend {
        match self {
            Database::Postgres(_) => DatabaseBackend::Postgres,
            Database::MySql(_) => DatabaseBackend::MySql,
        }
    }

    /// The repository implementation matching this pool.
    pub fn school_repository(&self) -> Arc<dyn SchoolRepository> {
        match self {
            Database::Postgres(pool) => Arc::new(PgSchoolRepository::new(pool.clone())),
            Database::MySql(pool) => Arc::new(MySqlSchoolRepository::new(pool.clone())),
        }
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        match self {
            Database::Postgres(pool) => sqlx::query("SELECT 1").execute(pool).await.map(drop),
            Database::MySql(pool) => sqlx::query("SELECT 1").execute(pool).await.map(drop),
        }
    }

    /// `(size, idle)` connection counts.
    pub fn pool_stats(&self) -> (u32, usize) {
        match self {
            Database::Postgres(pool) => (pool.size(), pool.num_idle()),
            Database::MySql(pool) => (pool.size(), pool.num_idle()),
        }
    }

    pub async fn close(&self) {
        match self {
            Database::Postgres(pool) => pool.close().await,
            Database::MySql(pool) => pool.close().await,
        }
    }
}
