pub mod error_tracking;

use std::sync::atomic::{AtomicU64, Ordering};

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Installs the global subscriber: JSON lines when `logging.json_format` is set, pretty
/// output otherwise.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .try_init()
    }
}

#[derive(Default)]
pub struct AppMetrics {
    request_count: AtomicU64,
    error_count: AtomicU64,
    client_error_count: AtomicU64,
    latency_total_ms: AtomicU64,
    latency_count: AtomicU64,
    schools_created: AtomicU64,
    ranking_queries: AtomicU64,
    ranked_results: AtomicU64,
}

impl AppMetrics {
    pub fn record_request(&self, status: u16, latency_ms: u64) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        if status >= 500 {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        } else if status >= 400 {
            self.client_error_count.fetch_add(1, Ordering::Relaxed);
        }
        self.latency_total_ms
            .fetch_add(latency_ms, Ordering::Relaxed);
        self.latency_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_school_created(&self) {
        self.schools_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ranking(&self, returned: usize) {
        self.ranking_queries.fetch_add(1, Ordering::Relaxed);
        self.ranked_results
            .fetch_add(returned as u64, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self, db_size: u32, db_idle: usize) -> String {
        let count = self.latency_count.load(Ordering::Relaxed).max(1);
        let avg_latency = self.latency_total_ms.load(Ordering::Relaxed) as f64 / count as f64;

        format!(
            concat!(
                "# TYPE http_requests_total counter\n",
                "http_requests_total {}\n",
                "# TYPE http_error_total counter\n",
                "http_error_total {}\n",
                "# TYPE http_client_error_total counter\n",
                "http_client_error_total {}\n",
                "# TYPE http_latency_avg_ms gauge\n",
                "http_latency_avg_ms {:.2}\n",
                "# TYPE schools_created_total counter\n",
                "schools_created_total {}\n",
                "# TYPE ranking_queries_total counter\n",
                "ranking_queries_total {}\n",
                "# TYPE ranked_results_total counter\n",
                "ranked_results_total {}\n",
                "# TYPE db_pool_size gauge\n",
                "db_pool_size {}\n",
                "# TYPE db_pool_idle gauge\n",
                "db_pool_idle {}\n",
            ),
            self.request_count.load(Ordering::Relaxed),
            self.error_count.load(Ordering::Relaxed),
            self.client_error_count.load(Ordering::Relaxed),
            avg_latency,
            self.schools_created.load(Ordering::Relaxed),
            self.ranking_queries.load(Ordering::Relaxed),
            self.ranked_results.load(Ordering::Relaxed),
            db_size,
            db_idle,
        )
    }
}
