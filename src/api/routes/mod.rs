use std::sync::Arc;

use actix_web::{error, web, HttpRequest, HttpResponse};

use crate::application::SchoolService;
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::Database;
use crate::observability::AppMetrics;

pub mod schools;

#[derive(Clone)]
pub struct AppState {
    pub school_service: Arc<SchoolService>,
    pub metrics: Arc<AppMetrics>,
    /// `None` when the service runs without a database handle (tests).
    pub database: Option<Database>,
    pub metrics_allow_private_only: bool,
}

impl AppState {
    pub fn new(school_service: Arc<SchoolService>) -> Self {
        Self {
            school_service,
            metrics: Arc::new(AppMetrics::default()),
            database: None,
            metrics_allow_private_only: true,
        }
    }

    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    pub fn with_metrics_allow_private_only(mut self, private_only: bool) -> Self {
        self.metrics_allow_private_only = private_only;
        self
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .configure(schools::configure)
        .route("/health", web::get().to(health))
        .route("/ready", web::get().to(ready))
        .route("/metrics", web::get().to(metrics));
}

/// Malformed bodies share the JSON error format of every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            error::JsonPayloadError::ContentType => {
                "Content-Type must be application/json".to_string()
            }
            other => format!("Invalid JSON body: {other}"),
        };
        AppError::BadRequest(message).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid query string: {err}")).into()
    })
}

/// Fallback for unmatched routes; register with `App::default_service`.
pub async fn not_found(request: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!(
        "No route for {} {}",
        request.method(),
        request.path()
    )))
}

async fn health() -> &'static str {
    "ok"
}

async fn ready(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let database = state
        .database
        .as_ref()
        .ok_or_else(|| AppError::database_unavailable("Service not ready: no database"))?;

    database
        .ping()
        .await
        .map_err(|e| AppError::database_unavailable(format!("Service not ready: {e}")))?;
    Ok(HttpResponse::Ok().body("ready"))
}

async fn metrics(state: web::Data<AppState>, request: HttpRequest) -> AppResult<HttpResponse> {
    if state.metrics_allow_private_only {
        let ip = request
            .peer_addr()
            .map(|addr| addr.ip())
            .ok_or(AppError::Unauthorized)?;

        if !is_private_or_loopback(ip) {
            return Err(AppError::Unauthorized);
        }
    }

    let (db_size, db_idle) = pool_stats(&state);
    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(state.metrics.render_prometheus(db_size, db_idle)))
}

fn is_private_or_loopback(ip: std::net::IpAddr) -> bool {
    match ip {
        std::net::IpAddr::V4(v4) => v4.is_private() || v4.is_loopback(),
        std::net::IpAddr::V6(v6) => v6.is_loopback() || v6.is_unique_local(),
    }
}

fn pool_stats(state: &web::Data<AppState>) -> (u32, usize) {
    state
        .database
        .as_ref()
        .map_or((0, 0), Database::pool_stats)
}
