//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the users endpoint and the three health endpoints
//! - **Schemas**: wrappers ([`UserRecordSchema`], [`ErrorSchema`]) that
//!   describe wire shapes without coupling data types to utoipa, plus the
//!   health report
//!
//! The generated specification is served to Swagger UI at `/docs/` and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::health::HealthReport;
use crate::inbound::http::schemas::{ErrorSchema, UserRecordSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User stub API",
        description = "Returns synthetic users with randomly assigned departments.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserRecordSchema, ErrorSchema, HealthReport)),
    tags(
        (name = "users", description = "Synthetic user generation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered paths and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/users/{count}")]
    #[case("/health")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn openapi_registers_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn openapi_user_record_schema_uses_wire_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get("UserRecord").expect("UserRecord schema");

        for field in ["name", "avatar", "departments", "userId"] {
            assert_object_schema_has_field(user, field);
        }
    }

    #[rstest]
    fn openapi_error_schema_has_error_field() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error, "error");
    }

    #[rstest]
    fn openapi_health_report_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let report = schemas.get("HealthReport").expect("HealthReport schema");

        for field in ["status", "uptime", "timestamp"] {
            assert_object_schema_has_field(report, field);
        }
    }
}
