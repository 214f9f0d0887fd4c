//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (unique ID per request)
//! 4. Rate limiting on `/api/search` (governor, added by the binary)

pub mod rate_limit;
pub mod request_id;

pub use rate_limit::{ClientIpKeyExtractor, RateLimiterLayer, search_rate_limiter};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
