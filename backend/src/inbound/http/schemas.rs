//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their corresponding
//! types but live in the inbound adapter layer where framework concerns
//! belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`user_stub_data::UserRecord`].
///
/// Synthetic user with display name, avatar, departments, and identifier.
#[derive(ToSchema)]
#[schema(as = UserRecord, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserRecordSchema {
    /// Display name made of a first and last name.
    #[schema(example = "Ada Lovelace")]
    name: String,
    /// Avatar image URL.
    #[schema(example = "https://avatars.githubusercontent.com/u/583231")]
    avatar: String,
    /// One to three distinct department labels.
    #[schema(min_items = 1, max_items = 3, example = json!(["Hardware", "Paint"]))]
    departments: Vec<String>,
    /// Random UUID v4 identifier.
    #[schema(value_type = String, format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    user_id: String,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Error payload returned for every non-success response.
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message.
    #[schema(example = "Invalid count. Please provide a positive integer.")]
    error: String,
}
