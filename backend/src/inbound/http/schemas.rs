//! OpenAPI schema definitions for the action result envelope.
//!
//! The error taxonomy and the envelope stay framework-agnostic in the
//! domain. This module provides the schema definitions required for OpenAPI
//! documentation using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use std::collections::BTreeMap;

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Closed set of machine-readable failure codes.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Input failed validation; see `fieldErrors`.
    #[schema(rename = "VALIDATION_ERROR")]
    ValidationError,
    /// No valid session.
    #[schema(rename = "UNAUTHORIZED")]
    Unauthorized,
    /// The requested record does not exist.
    #[schema(rename = "NOT_FOUND")]
    NotFound,
    /// The change clashes with existing data.
    #[schema(rename = "CONFLICT")]
    Conflict,
    /// Too many requests.
    #[schema(rename = "RATE_LIMITED")]
    RateLimited,
    /// Unclassified failure.
    #[schema(rename = "UNKNOWN")]
    Unknown,
}

/// OpenAPI schema for [`crate::domain::ActionError`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ActionError)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ActionErrorSchema {
    /// Failure category.
    #[schema(example = "VALIDATION_ERROR")]
    code: ErrorCodeSchema,
    /// Human-readable message; never blank.
    #[schema(example = "Please correct the highlighted fields.")]
    message: String,
    /// Messages keyed by input field.
    field_errors: Option<BTreeMap<String, Vec<String>>>,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
}

/// Successful outcome: `{"status":"success","data":…}`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SuccessEnvelope<T> {
    #[schema(example = "success")]
    status: String,
    data: T,
}

/// Failed outcome: `{"status":"failure","error":{…}}`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FailureEnvelope {
    #[schema(example = "failure")]
    status: String,
    error: ActionErrorSchema,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in crate::domain::ErrorCode::ALL {
            assert!(
                schema_json.contains(code.as_str()),
                "schema should list {code}"
            );
        }
    }

    #[test]
    fn action_error_schema_uses_wire_names() {
        let schema_json = schema_to_json::<ActionErrorSchema>();
        assert_eq!(ActionErrorSchema::name(), "crate.domain.ActionError");
        assert!(schema_json.contains("fieldErrors"));
        assert!(schema_json.contains("traceId"));
    }
}
