//! User stub API library modules.
//!
//! An actix-web service returning synthetic users. Data generation lives in
//! the `user-stub-data` crate; this crate adds validation, the HTTP surface,
//! middleware, OpenAPI documentation, and configuration.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
