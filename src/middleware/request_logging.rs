//! Per-request logging, metrics and error tracking.

use std::time::Instant;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{web, Error};
use tracing::{info, warn, Instrument, Span};
use uuid::Uuid;

use crate::api::routes::AppState;
use crate::observability::error_tracking::capture_unexpected_5xx;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// What we know about a request before it reaches a handler.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub client_ip: String,
    pub user_agent: String,
}

impl RequestContext {
    pub fn from_request(req: &ServiceRequest) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            method: req.method().to_string(),
            path: req.path().to_string(),
            client_ip: client_ip(req),
            user_agent: user_agent(req),
        }
    }

    pub fn span(&self) -> Span {
        tracing::info_span!(
            "request",
            request_id = %self.request_id,
            method = %self.method,
            path = %self.path,
            client_ip = %self.client_ip,
            user_agent = %self.user_agent
        )
    }

    pub fn log_completion(&self, status: u16, latency_ms: u64) {
        let status_class = status_class(status);
        if status >= 500 {
            warn!(status, status_class, latency_ms, "request failed");
        } else {
            info!(status, status_class, latency_ms, "request completed");
        }
    }
}

/// Uses actix's `realip_remote_addr`, which only trusts forwarding headers
/// when a proxy is configured; X-Forwarded-For is never parsed directly.
fn client_ip(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn user_agent(req: &ServiceRequest) -> String {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

pub fn status_class(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "unknown",
    }
}

/// Wraps every request in a tracing span, tags the response with a request id,
/// records request metrics and reports 5xx responses to error tracking.
pub async fn track_request(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let context = RequestContext::from_request(&req);
    let metrics = req
        .app_data::<web::Data<AppState>>()
        .map(|state| state.metrics.clone());
    let span = context.span();
    let started = Instant::now();

    let mut response = next.call(req).instrument(span.clone()).await?;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;

    if let Ok(value) = HeaderValue::from_str(&context.request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    if let Some(metrics) = metrics {
        metrics.record_request(status, latency_ms);
    }

    span.in_scope(|| context.log_completion(status, latency_ms));
    capture_unexpected_5xx(&context, status);

    Ok(response)
}
