//! Users API handler.
//!
//! ```text
//! GET /api/users/3
//! ```

use actix_web::{get, web};
use user_stub_data::UserRecord;

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserRecordSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_count;

/// Generate `count` synthetic users.
///
/// The count is validated before generation; invalid counts never reach the
/// users port.
#[utoipa::path(
    get,
    path = "/api/users/{count}",
    params(
        ("count" = String, Path, description = "Number of users to generate; a positive integer")
    ),
    responses(
        (status = 200, description = "Generated users in generation order", body = [UserRecordSchema]),
        (status = 400, description = "Count is not a positive integer or exceeds the maximum", body = ErrorSchema),
        (status = 429, description = "Rate limit exceeded", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/api/users/{count}")]
pub async fn list_users(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<UserRecord>>> {
    let count = parse_count(&path.into_inner(), state.max_count)?;
    let users = state.users.generate(count)?;
    Ok(web::Json(users))
}
