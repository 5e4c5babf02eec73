#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use once_cell::sync::Lazy;
use school_locator::api::routes::AppState;
use school_locator::application::SchoolService;
use school_locator::config::{DatabaseConfig, RankingConfig};
use school_locator::domain::{GeoPoint, SchoolRecord};
use school_locator::infrastructure::db::{migrations::run_migrations, Database};
use school_locator::infrastructure::repositories::SchoolRepository;
use tokio::sync::{Mutex, MutexGuard};

pub mod mocks;

use mocks::MockSchoolRepo;

static TEST_DB_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub fn school(id: i64, latitude: f64, longitude: f64) -> SchoolRecord {
    SchoolRecord {
        id,
        name: format!("School {id}"),
        address: format!("{id} Station Road"),
        location: GeoPoint::new(latitude, longitude),
    }
}

pub fn service_with(repo: Arc<MockSchoolRepo>) -> SchoolService {
    SchoolService::new(repo)
}

pub fn service_with_radius(repo: Arc<MockSchoolRepo>, radius_km: f64) -> SchoolService {
    SchoolService::new(repo).with_ranking_config(RankingConfig {
        default_max_distance_km: Some(radius_km),
    })
}

/// State for route tests. `/metrics` stays open so requests without a peer address
/// can read it.
pub fn app_state(repo: Arc<MockSchoolRepo>) -> AppState {
    AppState::new(Arc::new(service_with(repo))).with_metrics_allow_private_only(false)
}

/// A migrated, emptied database shared by one test at a time.
pub struct TestDb {
    database: Database,
    _lock: MutexGuard<'static, ()>,
}

impl TestDb {
    /// Returns `None` when neither TEST_DATABASE_URL nor DATABASE_URL is set, so
    /// local runs skip database tests. Panics in CI where a database is expected.
    pub async fn new() -> Option<Self> {
        dotenvy::dotenv().ok();
        let url = env::var("TEST_DATABASE_URL")
            .ok()
            .or_else(|| env::var("DATABASE_URL").ok());

        let Some(url) = url else {
            if env::var("CI").is_ok() {
                panic!(
                    "DATABASE_URL or TEST_DATABASE_URL not set in CI. \
                    Integration tests require a database connection."
                );
            }
            eprintln!("Skipping test: DATABASE_URL or TEST_DATABASE_URL not set (run locally)");
            return None;
        };

        let lock = Lazy::force(&TEST_DB_MUTEX).lock().await;

        let database = Database::connect(&DatabaseConfig::with_url(url)).await.ok()?;
        run_migrations(&database).await.ok()?;
        reset_database(&database).await.ok()?;

        Some(Self {
            database,
            _lock: lock,
        })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn repository(&self) -> Arc<dyn SchoolRepository> {
        self.database.school_repository()
    }
}

async fn reset_database(database: &Database) -> Result<(), sqlx::Error> {
    match database {
        Database::Postgres(pool) => {
            sqlx::query("TRUNCATE TABLE schools RESTART IDENTITY")
                .execute(pool)
                .await?;
        }
        Database::MySql(pool) => {
            sqlx::query("TRUNCATE TABLE schools").execute(pool).await?;
        }
    }
    Ok(())
}
