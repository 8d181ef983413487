//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Compress;
use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::domain::{RngSource, SyntheticUsers};
use crate::inbound::http::docs::{docs_without_slash, root, swagger_ui};
use crate::inbound::http::fallback::{empty_not_found_as_json, not_found};
use crate::inbound::http::health::{HealthState, health, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::list_users;
use crate::middleware::rate_limit::RateLimiter;
use crate::middleware::{RateLimit, Trace, access_log, security_headers};

/// Shared state handed to every worker's application instance.
#[derive(Clone)]
pub struct AppDependencies {
    /// Health flags and uptime source.
    pub health_state: web::Data<HealthState>,
    /// Ports and limits for the users handler.
    pub http_state: web::Data<HttpState>,
    /// Limiter shared across workers so allowances are process-wide.
    pub rate_limiter: Arc<RateLimiter>,
    /// Whether to emit access log lines.
    pub access_log: bool,
}

/// Assemble routes and middleware for one worker.
///
/// Middleware runs outermost first: access log, compression, security
/// headers, trace identifier, rate limiting, then the rewrite of body-less
/// 404s into JSON.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        rate_limiter,
        access_log: access_log_enabled,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(empty_not_found_as_json())
        .wrap(RateLimit::new(rate_limiter))
        .wrap(Trace)
        .wrap(security_headers())
        .wrap(Compress::default())
        .wrap(access_log(access_log_enabled))
        .service(list_users)
        .service(health)
        .service(ready)
        .service(live)
        .service(root)
        .service(docs_without_slash)
        .service(swagger_ui())
        .default_service(web::to(not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: pre-built [`ServerConfig`] containing binding, limits, and RNG settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        access_log,
        max_count,
        rate_limit,
        seed,
        clock,
    } = config;

    let users = SyntheticUsers::standard(RngSource::from_seed(seed));
    let http_state = web::Data::new(HttpState::new(Arc::new(users), max_count));
    let rate_limiter = Arc::new(RateLimiter::new(rate_limit, clock));
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        rate_limiter,
        access_log,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    info!(
        %bind_addr,
        seeded = seed.is_some(),
        max_count = max_count.get(),
        rate_limit_max = rate_limit.max(),
        "server listening"
    );
    health_state.mark_ready();
    Ok(server)
}
