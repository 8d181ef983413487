//! Per-client sliding-window rate limiting.
//!
//! Each client (keyed by peer IP) may make `max` requests within any
//! `window`. The limiter keeps a log of admitted request instants per client
//! and drops entries once they fall out of the window. Rejected requests are
//! not logged, so a client that keeps hammering is admitted again as soon as
//! its oldest admitted request expires.
//!
//! Every response carries `X-RateLimit-Limit` and `X-RateLimit-Remaining`.
//! Rejections are answered with 429 and a `Retry-After` header without
//! reaching the wrapped service.

use std::collections::{HashMap, VecDeque};
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use std::time::Duration;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use actix_web::{Error, ResponseError};
use chrono::{DateTime, TimeDelta, Utc};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain;

/// Message returned when a client exceeds its allowance.
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// Header advertising the allowance per window.
pub const LIMIT_HEADER: &str = "x-ratelimit-limit";

/// Header advertising how many requests remain in the current window.
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Key used when the peer address is unavailable.
const UNKNOWN_CLIENT: &str = "unknown";

/// Client count above which idle entries are swept on each check.
const SWEEP_THRESHOLD: usize = 10_000;

/// Errors raised when building a [`RateLimitPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateLimitConfigError {
    /// The allowance was zero.
    #[error("rate limit maximum must be at least 1")]
    ZeroMax,
    /// The window was zero.
    #[error("rate limit window must be longer than zero")]
    ZeroWindow,
    /// The window cannot be represented as a timestamp offset.
    #[error("rate limit window of {seconds}s is out of range")]
    WindowOutOfRange {
        /// Requested window length in seconds.
        seconds: u64,
    },
}

/// Allowance of `max` requests per sliding `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    max: NonZeroU32,
    window: TimeDelta,
}

impl RateLimitPolicy {
    /// Validate and build a policy.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use user_stub_api::middleware::rate_limit::RateLimitPolicy;
    ///
    /// let policy = RateLimitPolicy::new(100, Duration::from_secs(900)).expect("valid policy");
    /// assert_eq!(policy.max(), 100);
    /// assert!(RateLimitPolicy::new(0, Duration::from_secs(900)).is_err());
    /// ```
    pub fn new(max: u32, window: Duration) -> Result<Self, RateLimitConfigError> {
        let max = NonZeroU32::new(max).ok_or(RateLimitConfigError::ZeroMax)?;
        if window.is_zero() {
            return Err(RateLimitConfigError::ZeroWindow);
        }
        let window = TimeDelta::from_std(window).map_err(|_| {
            RateLimitConfigError::WindowOutOfRange {
                seconds: window.as_secs(),
            }
        })?;
        Ok(Self { max, window })
    }

    /// Requests allowed per window.
    pub fn max(&self) -> u32 {
        self.max.get()
    }

    /// Window length.
    pub fn window(&self) -> TimeDelta {
        self.window
    }
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The request was admitted and recorded.
    Allowed {
        /// Requests left in the current window.
        remaining: u32,
    },
    /// The request was rejected.
    Limited {
        /// Whole seconds until the oldest admitted request expires.
        retry_after: u64,
    },
}

type HitLog = HashMap<String, VecDeque<DateTime<Utc>>>;

/// Shared sliding-window log keyed by client.
pub struct RateLimiter {
    policy: RateLimitPolicy,
    clock: Arc<dyn Clock>,
    hits: Mutex<HitLog>,
}

impl RateLimiter {
    /// Create a limiter reading time from `clock`.
    pub fn new(policy: RateLimitPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            clock,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Active policy.
    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Record a request from `client` if it fits within the allowance.
    pub fn check(&self, client: &str) -> Decision {
        let now = self.clock.utc();
        let cutoff = now - self.policy.window;
        let mut hits = self.lock_hits();

        if hits.len() > SWEEP_THRESHOLD {
            hits.retain(|_, log| {
                expire(log, cutoff);
                !log.is_empty()
            });
        }

        let log = hits.entry(client.to_owned()).or_default();
        expire(log, cutoff);

        let max = self.policy.max();
        let used = u32::try_from(log.len()).unwrap_or(u32::MAX);
        if used >= max {
            let retry_after = log
                .front()
                .map_or(1, |oldest| seconds_until(*oldest + self.policy.window, now));
            return Decision::Limited { retry_after };
        }

        log.push_back(now);
        Decision::Allowed {
            remaining: max - used - 1,
        }
    }

    fn lock_hits(&self) -> MutexGuard<'_, HitLog> {
        self.hits.lock().unwrap_or_else(|poisoned| {
            warn!("rate limiter lock poisoned; continuing with recovered state");
            poisoned.into_inner()
        })
    }
}

fn expire(log: &mut VecDeque<DateTime<Utc>>, cutoff: DateTime<Utc>) {
    while log.front().is_some_and(|hit| *hit <= cutoff) {
        log.pop_front();
    }
}

/// Whole seconds from `now` until `until`, rounded up and at least one.
fn seconds_until(until: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (until - now).num_milliseconds().max(0).unsigned_abs();
    millis.div_ceil(1000).max(1)
}

fn client_key(req: &ServiceRequest) -> String {
    req.peer_addr()
        .map_or_else(|| UNKNOWN_CLIENT.to_owned(), |addr| addr.ip().to_string())
}

fn insert_numeric(headers: &mut HeaderMap, name: &'static str, value: u64) {
    headers.insert(HeaderName::from_static(name), HeaderValue::from(value));
}

/// Rate limiting middleware backed by a shared [`RateLimiter`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use actix_web::App;
/// use user_stub_api::middleware::{RateLimit, rate_limit::{RateLimitPolicy, RateLimiter}};
///
/// let policy = RateLimitPolicy::new(100, Duration::from_secs(900)).expect("valid policy");
/// let limiter = Arc::new(RateLimiter::new(policy, Arc::new(mockable::DefaultClock)));
/// let _app = App::new().wrap(RateLimit::new(limiter));
/// ```
#[derive(Clone)]
pub struct RateLimit {
    limiter: Arc<RateLimiter>,
}

impl RateLimit {
    /// Wrap services with the provided limiter.
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service,
            limiter: Arc::clone(&self.limiter),
        }))
    }
}

/// Service wrapper produced by [`RateLimit`].
pub struct RateLimitMiddleware<S> {
    service: S,
    limiter: Arc<RateLimiter>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client = client_key(&req);
        let limit = u64::from(self.limiter.policy().max());

        match self.limiter.check(&client) {
            Decision::Allowed { remaining } => {
                let fut = self.service.call(req);
                Box::pin(async move {
                    let mut res = fut.await?;
                    let headers = res.headers_mut();
                    insert_numeric(headers, LIMIT_HEADER, limit);
                    insert_numeric(headers, REMAINING_HEADER, u64::from(remaining));
                    Ok(res.map_into_left_body())
                })
            }
            Decision::Limited { retry_after } => {
                debug!(client = %client, retry_after, "request rate limited");
                let (request, _) = req.into_parts();
                Box::pin(async move {
                    let mut response =
                        domain::Error::too_many_requests(RATE_LIMITED_MESSAGE).error_response();
                    let headers = response.headers_mut();
                    insert_numeric(headers, LIMIT_HEADER, limit);
                    insert_numeric(headers, REMAINING_HEADER, 0);
                    headers.insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
                    Ok(ServiceResponse::new(request, response).map_into_right_body())
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, http::StatusCode, test as actix_test, web};
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::test_support::MutableClock;

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(MutableClock::new(start))
    }

    fn limiter(max: u32, window_secs: u64, clock: &Arc<MutableClock>) -> RateLimiter {
        let policy =
            RateLimitPolicy::new(max, Duration::from_secs(window_secs)).expect("valid policy");
        RateLimiter::new(policy, clock.clone())
    }

    #[rstest]
    #[case(0, 900, RateLimitConfigError::ZeroMax)]
    #[case(100, 0, RateLimitConfigError::ZeroWindow)]
    #[case(100, u64::MAX, RateLimitConfigError::WindowOutOfRange { seconds: u64::MAX })]
    fn policy_rejects_invalid_values(
        #[case] max: u32,
        #[case] window: u64,
        #[case] expected: RateLimitConfigError,
    ) {
        let err = RateLimitPolicy::new(max, Duration::from_secs(window)).expect_err("invalid");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn admits_up_to_max_then_limits(clock: Arc<MutableClock>) {
        let limiter = limiter(100, 900, &clock);

        for expected_remaining in (0..100).rev() {
            assert_eq!(
                limiter.check("10.0.0.1"),
                Decision::Allowed {
                    remaining: expected_remaining
                }
            );
        }
        assert_eq!(
            limiter.check("10.0.0.1"),
            Decision::Limited { retry_after: 900 }
        );
    }

    #[rstest]
    fn clients_are_tracked_independently(clock: Arc<MutableClock>) {
        let limiter = limiter(1, 60, &clock);

        assert_eq!(limiter.check("a"), Decision::Allowed { remaining: 0 });
        assert!(matches!(limiter.check("a"), Decision::Limited { .. }));
        assert_eq!(limiter.check("b"), Decision::Allowed { remaining: 0 });
    }

    #[rstest]
    fn window_slides_past_oldest_hit(clock: Arc<MutableClock>) {
        let limiter = limiter(2, 60, &clock);

        assert!(matches!(limiter.check("a"), Decision::Allowed { .. }));
        clock.advance_seconds(30);
        assert!(matches!(limiter.check("a"), Decision::Allowed { .. }));
        assert_eq!(limiter.check("a"), Decision::Limited { retry_after: 30 });

        clock.advance_seconds(30);
        assert_eq!(limiter.check("a"), Decision::Allowed { remaining: 0 });
        assert_eq!(limiter.check("a"), Decision::Limited { retry_after: 30 });
    }

    #[rstest]
    fn rejected_requests_do_not_extend_the_window(clock: Arc<MutableClock>) {
        let limiter = limiter(1, 10, &clock);

        assert!(matches!(limiter.check("a"), Decision::Allowed { .. }));
        for _ in 0..5 {
            clock.advance_seconds(1);
            assert!(matches!(limiter.check("a"), Decision::Limited { .. }));
        }
        clock.advance_seconds(5);
        assert!(matches!(limiter.check("a"), Decision::Allowed { .. }));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(1500, 2)]
    #[case(30_000, 30)]
    fn seconds_until_rounds_up(#[case] millis: i64, #[case] expected: u64) {
        let now = Utc::now();
        let until = now + TimeDelta::milliseconds(millis);
        assert_eq!(seconds_until(until, now), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn middleware_sets_headers_and_rejects_excess(clock: Arc<MutableClock>) {
        let limiter = Arc::new(limiter(2, 900, &clock));
        let app = actix_test::init_service(
            App::new()
                .wrap(RateLimit::new(limiter))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let peer = "192.0.2.10:40000".parse().expect("socket address");

        let first =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").peer_addr(peer).to_request())
                .await;
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(first.headers().get(LIMIT_HEADER).map(|v| v.as_bytes()), Some(&b"2"[..]));
        assert_eq!(
            first.headers().get(REMAINING_HEADER).map(|v| v.as_bytes()),
            Some(&b"1"[..])
        );

        let _second =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").peer_addr(peer).to_request())
                .await;
        let third =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").peer_addr(peer).to_request())
                .await;

        assert_eq!(third.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            third.headers().get(header::RETRY_AFTER).map(|v| v.as_bytes()),
            Some(&b"900"[..])
        );
        assert_eq!(
            third.headers().get(REMAINING_HEADER).map(|v| v.as_bytes()),
            Some(&b"0"[..])
        );
        let body: serde_json::Value = actix_test::read_body_json(third).await;
        assert_eq!(
            body,
            json!({ "error": "Too many requests from this IP, please try again later." })
        );
    }
}
