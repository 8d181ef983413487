//! Service entry-point: loads configuration, initialises logging, and runs
//! the HTTP server.

use std::{env, io};

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use user_stub_api::config::{FALLBACK_PORT_VAR, ServiceSettings};
use user_stub_api::inbound::http::health::HealthState;
use user_stub_api::server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?
        .with_fallback_port(env::var(FALLBACK_PORT_VAR).ok())
        .map_err(|e| io::Error::other(format!("invalid configuration: {e}")))?;
    let config = ServerConfig::from_settings(&settings)
        .map_err(|e| io::Error::other(format!("invalid configuration: {e}")))?;
    info!(
        environment = settings.environment(),
        access_log = config.access_log(),
        "configuration loaded"
    );

    let health_state = web::Data::new(HealthState::default());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    info!("server stopped");
    result
}
