//! Health endpoints: a status summary plus liveness and readiness checks.
//! Document endpoints in OpenAPI via Utoipa.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::{DateTime, SecondsFormat, Utc};
use mockable::Clock;
use serde::Serialize;
use utoipa::ToSchema;

/// Shared health state for the status, readiness, and liveness checks.
/// Track readiness, whether the process should report itself as alive, and
/// when it started.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    clock: Arc<dyn Clock>,
    started_at: DateTime<Utc>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new(Arc::new(mockable::DefaultClock))
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    ///
    /// Uptime is measured from the clock's current instant.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let started_at = clock.utc();
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            clock,
            started_at,
        }
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state. When false, liveness checks emit 503 to trigger restarts.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Build the status summary for the current instant.
    pub fn report(&self) -> HealthReport {
        let now = self.clock.utc();
        let uptime = (now - self.started_at).num_seconds().max(0);
        HealthReport {
            status: "ok".to_owned(),
            uptime: format_uptime(uptime.unsigned_abs()),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    fn check_response(check_ok: bool) -> HttpResponse {
        let mut response = if check_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Render whole seconds as `<H>h <M>m <S>s`.
///
/// # Examples
/// ```
/// use user_stub_api::inbound::http::health::format_uptime;
///
/// assert_eq!(format_uptime(3725), "1h 2m 5s");
/// ```
pub fn format_uptime(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours}h {minutes}m {seconds}s")
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HealthReport {
    /// Always `ok` while the process can answer.
    #[schema(example = "ok")]
    pub status: String,
    /// Time since start-up.
    #[schema(example = "0h 5m 12s")]
    pub uptime: String,
    /// Current UTC time in RFC 3339 form.
    #[schema(example = "2024-01-01T12:00:00.000Z")]
    pub timestamp: String,
}

/// Status summary with process uptime and the current timestamp.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Service is up", body = HealthReport)
    )
)]
#[get("/health")]
pub async fn health(state: web::Data<HealthState>) -> web::Json<HealthReport> {
    web::Json(state.report())
}

/// Readiness check. Return 200 once the server is bound; return 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::check_response(state.is_ready())
}

/// Liveness check. Return 200 while the process is marked alive and 503 once draining.
/// Call `HealthState::mark_unhealthy` before graceful shutdown to surface the drain early.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::check_response(state.is_alive())
}
