//! Development-only access logging.
//!
//! Actix's `Logger` writes through the `log` facade; `main` installs the
//! tracing bridge so these lines join the structured log stream.

use actix_web::middleware::{Condition, Logger};

/// Access log line: peer, request line, status, bytes, and seconds taken.
pub const ACCESS_LOG_FORMAT: &str = r#"%a "%r" %s %b %T"#;

/// Build an access logger that is only active when `enabled`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_stub_api::middleware::access_log;
///
/// let _app = App::new().wrap(access_log(true));
/// ```
pub fn access_log(enabled: bool) -> Condition<Logger> {
    Condition::new(enabled, Logger::new(ACCESS_LOG_FORMAT))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(true)]
    #[case(false)]
    #[actix_web::test]
    async fn passes_responses_through(#[case] enabled: bool) {
        let app = test::init_service(
            App::new()
                .wrap(access_log(enabled))
                .route("/", web::get().to(|| async { HttpResponse::Ok().body("ok") })),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
    }
}
