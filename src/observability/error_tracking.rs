use tracing::error;
use uuid::Uuid;

use crate::middleware::RequestContext;

/// Records an error-tracking event for a server-side failure and returns its id.
/// Statuses below 500 are not tracked.
pub fn capture_unexpected_5xx(context: &RequestContext, status: u16) -> Option<Uuid> {
    if status < 500 {
        return None;
    }

    let event_id = Uuid::new_v4();
    error!(
        tracking_backend = "log",
        event_id = %event_id,
        request_id = %context.request_id,
        method = %context.method,
        path = %context.path,
        client_ip = %context.client_ip,
        status = status,
        "error-tracking capture for unexpected 5xx"
    );
    Some(event_id)
}
