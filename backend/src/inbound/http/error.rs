//! HTTP adapter mapping for action results.
//!
//! Purpose: keep the domain types HTTP-agnostic while letting Actix handlers
//! return [`ActionResult`] values directly. Successes are `200 OK`; failures
//! carry the status mapped from their [`ErrorCode`] and the same JSON
//! envelope, so clients branch on `status` rather than on HTTP codes.

use actix_web::body::BoxBody;
use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, Responder, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::domain::{ActionError, ActionResult, ErrorCode, TRACE_ID_HEADER};

/// HTTP status for each error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_unknown(error: &ActionError) -> ActionError {
    if error.code() == ErrorCode::Unknown {
        let mut redacted = ActionError::from_code(ErrorCode::Unknown);
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for ActionError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(ActionResult::<()>::Failure {
            error: redact_if_unknown(self),
        })
    }
}

impl<T: Serialize> Responder for ActionResult<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        match self {
            Self::Success { data } => HttpResponse::Ok().json(ActionResult::success(data)),
            Self::Failure { error } => error.error_response(),
        }
    }
}

fn rejection(message: &str, field: Option<&str>) -> ActionError {
    let error = ActionError::new(ErrorCode::ValidationError, message);
    match field {
        Some(field) => error.with_field_error(field, message),
        None => error,
    }
}

/// Turn JSON body extraction failures into `VALIDATION_ERROR` envelopes.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    let error = match &err {
        JsonPayloadError::ContentType => rejection("Expected a JSON request body.", None),
        JsonPayloadError::Deserialize(inner) if inner.is_data() => {
            rejection("The request body has the wrong shape.", None)
        }
        _ => rejection("The request body is not valid JSON.", None),
    };
    InternalError::from_response(err, error.error_response()).into()
}

/// Turn malformed path segments (for example a non-UUID id) into
/// `VALIDATION_ERROR` envelopes.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected path parameters");
    let error = rejection("Invalid identifier.", Some("id"));
    InternalError::from_response(err, error.error_response()).into()
}

/// Turn malformed query strings into `VALIDATION_ERROR` envelopes.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected query string");
    let error = rejection("Invalid filter parameters.", None);
    InternalError::from_response(err, error.error_response()).into()
}
