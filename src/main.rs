use std::sync::Arc;

use actix_web::{middleware::from_fn, web, App, HttpServer};
use anyhow::Context;
use school_locator::api::routes::{self, AppState};
use school_locator::application::SchoolService;
use school_locator::config::AppConfig;
use school_locator::infrastructure::db::{migrations::run_migrations, Database};
use school_locator::middleware::track_request;
use school_locator::observability::init_tracing;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("failed to load application configuration")?;
    config
        .validate()
        .context("invalid application configuration")?;

    init_tracing(&config.logging).context("failed to install tracing subscriber")?;

    let database = Database::connect(&config.database)
        .await
        .context("failed to create database pool")?;
    info!(backend = database.backend().as_str(), "database pool ready");

    if config.database.run_migrations {
        run_migrations(&database)
            .await
            .context("database migrations failed")?;
    }

    let school_service = SchoolService::new(database.school_repository())
        .with_ranking_config(config.ranking.clone());
    let state = AppState::new(Arc::new(school_service))
        .with_database(database.clone())
        .with_metrics_allow_private_only(config.server.metrics_allow_private_only);

    let bind_host = config.server.host.clone();
    let bind_port = config.server.port;
    info!(
        host = %bind_host,
        port = bind_port,
        environment = %config.server.environment,
        "starting school-locator"
    );

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(from_fn(track_request))
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .shutdown_timeout(config.server.shutdown_timeout_seconds);

    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    server.bind((bind_host, bind_port))?.run().await?;

    database.close().await;
    info!("school-locator stopped");
    Ok(())
}
