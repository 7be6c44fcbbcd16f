//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the error schema wrappers that keep domain types free of utoipa.
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Patient registry API",
        description = "Create, edit, remove, sort, and summarise patient records with derived BMI.\n\nFailed requests return `{ code, message, traceId?, details? }`. The human-readable reason is in `message`; there is no `detail` key.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::info::hello,
        crate::inbound::http::info::about,
        crate::inbound::http::patients::view_patients,
        crate::inbound::http::patients::get_patient,
        crate::inbound::http::patients::sort_patients,
        crate::inbound::http::patients::create_patient,
        crate::inbound::http::patients::update_patient,
        crate::inbound::http::patients::delete_patient,
        crate::inbound::http::patients::patient_stats,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "info", description = "Service information"),
        (name = "patients", description = "Patient record operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

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

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn api_description_names_the_error_message_key() {
        let doc = ApiDoc::openapi();
        let description = doc.info.description.expect("info description");
        assert!(description.contains("`message`"));
        assert!(description.contains("no `detail` key"));
    }

    #[rstest]
    #[case("/view")]
    #[case("/patient/{patient_id}")]
    #[case("/sort")]
    #[case("/create")]
    #[case("/edit/{patient_id}")]
    #[case("/delete/{patient_id}")]
    #[case("/stats")]
    #[case("/health/ready")]
    fn openapi_lists_endpoint(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn request_schemas_are_collected_from_paths() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        for name in ["CreatePatientRequest", "UpdatePatientRequest", "PatientResponse"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
