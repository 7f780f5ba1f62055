// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID generation, per-request spans, and CORS configuration

/// CORS configuration
pub mod cors;
/// Request ID and span creation
pub mod tracing;

pub use cors::setup_cors;
pub use self::tracing::{create_request_span, RequestIdGenerator, REQUEST_ID_HEADER};
