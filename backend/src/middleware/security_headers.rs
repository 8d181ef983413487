//! Security headers applied to every response.
//!
//! Headers already set by a handler are left untouched.

use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;

/// Header name and value pairs sent on every response.
pub const SECURITY_HEADERS: [(&str, &str); 9] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("referrer-policy", "no-referrer"),
    ("x-dns-prefetch-control", "off"),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("x-download-options", "noopen"),
    ("x-permitted-cross-domain-policies", "none"),
];

/// Build the middleware that stamps [`SECURITY_HEADERS`] onto responses.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_stub_api::middleware::security_headers;
///
/// let _app = App::new().wrap(security_headers());
/// ```
pub fn security_headers() -> DefaultHeaders {
    SECURITY_HEADERS
        .into_iter()
        .fold(DefaultHeaders::new(), |headers, (name, value)| {
            headers.add((header::HeaderName::from_static(name), value))
        })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[actix_web::test]
    async fn stamps_every_header() {
        let app = test::init_service(
            App::new()
                .wrap(security_headers())
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        for (name, value) in SECURITY_HEADERS {
            assert_eq!(
                res.headers().get(name).map(|v| v.as_bytes()),
                Some(value.as_bytes()),
                "header {name}"
            );
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn keeps_handler_supplied_values() {
        let app = test::init_service(App::new().wrap(security_headers()).route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok()
                    .insert_header(("x-frame-options", "DENY"))
                    .finish()
            }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(
            res.headers().get("x-frame-options").map(|v| v.as_bytes()),
            Some(&b"DENY"[..])
        );
    }
}
