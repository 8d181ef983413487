//! Fallback handlers for requests that match no route.
//!
//! Unmatched routes hit [`not_found`]. Mounted services such as the docs UI
//! answer unknown paths themselves with an empty 404, which
//! [`empty_not_found_as_json`] rewrites into the same JSON body.

use actix_web::body::{BodySize, MessageBody};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::{HttpResponse, ResponseError};

use crate::domain::Error;
use crate::inbound::http::ApiResult;

/// Message returned for unmatched routes.
pub const NOT_FOUND_MESSAGE: &str = "Not Found";

/// Default service answering every unmatched request with a JSON 404.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found(NOT_FOUND_MESSAGE))
}

/// Middleware replacing body-less 404 responses with the JSON not-found error.
///
/// 404s that already carry a body pass through untouched.
pub fn empty_not_found_as_json<B: MessageBody + 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().handler(StatusCode::NOT_FOUND, render_empty_not_found)
}

fn render_empty_not_found<B: MessageBody>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    if !matches!(
        res.response().body().size(),
        BodySize::None | BodySize::Sized(0)
    ) {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }
    let (req, _) = res.into_parts();
    let response = Error::not_found(NOT_FOUND_MESSAGE).error_response();
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}
