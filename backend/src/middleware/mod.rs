//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such
//! as tracing, rate limiting, security headers, and access logging.

pub mod access_log;
pub mod rate_limit;
pub mod security_headers;
pub mod trace;

pub use access_log::access_log;
pub use rate_limit::RateLimit;
pub use security_headers::security_headers;
pub use trace::Trace;
