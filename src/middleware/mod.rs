pub mod request_logging;

pub use request_logging::{track_request, RequestContext, REQUEST_ID_HEADER};
