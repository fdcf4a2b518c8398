//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API. It
//! registers the handle and profile endpoints, the health probes, the shared
//! error envelope, and the session-cookie security scheme. The generated
//! document backs Swagger UI in debug builds and `cargo run --bin
//! openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{ErrorCode, Profile};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::handles::{
    CheckHandleRequest, HandleCheckResponse, SuggestionsResponse,
};
use crate::inbound::http::profiles::RegisterProfileRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/profiles.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Duelground handle service API",
        description = "Handle validation, suggestion, and reservation for wizard profiles.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::handles::check_handle,
        crate::inbound::http::handles::suggest_handles,
        crate::inbound::http::profiles::register_profile,
        crate::inbound::http::profiles::current_profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        Profile,
        CheckHandleRequest,
        HandleCheckResponse,
        SuggestionsResponse,
        RegisterProfileRequest,
    )),
    tags(
        (name = "handles", description = "Handle validation and suggestions"),
        (name = "profiles", description = "Profile registration and lookup"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for expected in [
            "/api/v1/handles/check",
            "/api/v1/handles/suggestions",
            "/api/v1/profiles",
            "/api/v1/profiles/me",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(expected), "missing path {expected}");
        }
    }

    #[test]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert!(schemas.contains_key("ApiError"));
        assert!(schemas.contains_key("Profile"));
    }
}
