//! Interactive API documentation.
//!
//! Swagger UI is mounted at `/docs/` and reads the generated document from
//! `/api-docs/openapi.json`. Bare `/` and `/docs` redirect to the UI.

use actix_web::{HttpResponse, get, http::header};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::doc::ApiDoc;

/// Location of the Swagger UI index.
pub const DOCS_PATH: &str = "/docs/";

/// Location of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

fn redirect_to_docs() -> HttpResponse {
    HttpResponse::PermanentRedirect()
        .insert_header((header::LOCATION, DOCS_PATH))
        .finish()
}

/// Redirect the service root to the documentation UI.
#[get("/")]
pub async fn root() -> HttpResponse {
    redirect_to_docs()
}

/// Redirect `/docs` to its canonical trailing-slash form.
#[get("/docs")]
pub async fn docs_without_slash() -> HttpResponse {
    redirect_to_docs()
}

/// Swagger UI service serving the generated document.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs/{_:.*}").url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}
