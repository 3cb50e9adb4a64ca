//! Error shape reported by the hosted Postgres/auth service.
//!
//! Outbound adapters translate HTTP failures into [`BackendError`] and stop
//! there. Classification into the closed [`ErrorCode`] taxonomy happens in
//! [`classify_backend_error`], a total function: anything unrecognised falls
//! through to [`ErrorCode::Unknown`].

use tracing::{debug, error};

use super::error::{ActionError, ErrorCode};

/// Coarse origin of a backend failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendErrorKind {
    /// The service answered with an error payload.
    Api,
    /// The request never produced a response.
    Transport,
    /// The request exceeded the client timeout.
    Timeout,
    /// The response body could not be decoded.
    Decode,
}

/// Failure reported by the hosted service or the client talking to it.
///
/// `code` holds whatever identifier the service sent: a Postgres SQLSTATE
/// (`23505`), a data API code (`PGRST116`) or an auth error code
/// (`invalid_credentials`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    kind: BackendErrorKind,
    code: Option<String>,
    status: Option<u16>,
    message: String,
    details: Option<String>,
    hint: Option<String>,
}

impl BackendError {
    fn with_kind(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            status: None,
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    /// Error payload returned by the service.
    pub fn api(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            code: code.filter(|value| !value.trim().is_empty()),
            ..Self::with_kind(BackendErrorKind::Api, message)
        }
    }

    /// Connection-level failure.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::with_kind(BackendErrorKind::Transport, message)
    }

    /// Client timeout.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::with_kind(BackendErrorKind::Timeout, message)
    }

    /// Undecodable response body.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::with_kind(BackendErrorKind::Decode, message)
    }

    /// Attach the service's `details` text.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Attach the service's `hint` text.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> BackendErrorKind {
        self.kind
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Classify a data API failure into the closed taxonomy.
///
/// Service codes win over HTTP status; transport, timeout and decode
/// failures are always [`ErrorCode::Unknown`].
///
/// # Examples
/// ```
/// use staffing_backend::domain::{BackendError, ErrorCode, classify_backend_error};
///
/// let err = BackendError::api(409, Some("23505".to_owned()), "duplicate key");
/// assert_eq!(classify_backend_error(&err), ErrorCode::Conflict);
/// ```
#[must_use]
pub fn classify_backend_error(error: &BackendError) -> ErrorCode {
    if error.kind != BackendErrorKind::Api {
        return ErrorCode::Unknown;
    }
    error
        .code()
        .and_then(code_for_service_code)
        .or_else(|| error.status.and_then(code_for_status))
        .unwrap_or(ErrorCode::Unknown)
}

fn code_for_service_code(code: &str) -> Option<ErrorCode> {
    match code {
        UNIQUE_VIOLATION | FOREIGN_KEY_VIOLATION => Some(ErrorCode::Conflict),
        // not_null_violation, check_violation, invalid_text_representation,
        // string_data_right_truncation, invalid_datetime_format
        "23502" | "23514" | "22P02" | "22001" | "22007" | "22008" => {
            Some(ErrorCode::ValidationError)
        }
        // Single-row request matched zero rows.
        "PGRST116" => Some(ErrorCode::NotFound),
        // insufficient_privilege and JWT failures.
        "42501" | "PGRST301" | "PGRST302" => Some(ErrorCode::Unauthorized),
        _ => None,
    }
}

pub(crate) fn code_for_status(status: u16) -> Option<ErrorCode> {
    match status {
        400 | 422 => Some(ErrorCode::ValidationError),
        401 | 403 => Some(ErrorCode::Unauthorized),
        404 | 406 => Some(ErrorCode::NotFound),
        409 => Some(ErrorCode::Conflict),
        429 => Some(ErrorCode::RateLimited),
        _ => None,
    }
}

fn user_message(error: &BackendError, code: ErrorCode) -> &'static str {
    match (error.code(), code) {
        (Some(UNIQUE_VIOLATION), _) => "A record with these details already exists.",
        (Some(FOREIGN_KEY_VIOLATION), _) => {
            "This record is linked to other records and cannot be changed that way."
        }
        (_, other) => other.default_message(),
    }
}

/// Extract the column name from Postgres details such as
/// `Key (email)=(a@b.test) already exists.`
fn conflicting_column(details: &str) -> Option<&str> {
    let rest = details.strip_prefix("Key (")?;
    let (columns, _) = rest.split_once(')')?;
    (!columns.contains(',') && !columns.trim().is_empty()).then(|| columns.trim())
}

impl From<BackendError> for ActionError {
    fn from(value: BackendError) -> Self {
        let code = classify_backend_error(&value);
        if code == ErrorCode::Unknown {
            error!(
                kind = ?value.kind,
                code = value.code(),
                status = value.status,
                message = value.message(),
                "unclassified backend failure"
            );
        } else {
            debug!(%code, backend_code = value.code(), "backend failure classified");
        }

        let action_error = Self::new(code, user_message(&value, code));
        match (value.code(), value.details().and_then(conflicting_column)) {
            (Some(UNIQUE_VIOLATION), Some(column)) => {
                action_error.with_field_error(column, "This value is already in use.")
            }
            _ => action_error,
        }
    }
}
