use sqlx::migrate::MigrateError;

use super::Database;

/// Each backend embeds its own migration set; the `schools` DDL differs in id generation.
pub async fn run_migrations(database: &Database) -> Result<(), MigrateError> {
    match database {
        Database::Postgres(pool) => sqlx::migrate!("./migrations/postgres").run(pool).await,
        Database::MySql(pool) => sqlx::migrate!("./migrations/mysql").run(pool).await,
    }
}
