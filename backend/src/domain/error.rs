//! Closed error taxonomy carried by every failed action.
//!
//! These errors are transport agnostic. Inbound adapters decide on status
//! codes and envelopes; outbound adapters never build them directly and
//! instead report a [`BackendError`](super::BackendError) that gets
//! classified at the service boundary.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::trace_id::TraceId;

/// Validation messages keyed by input field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Stable machine-readable failure category.
///
/// The set is closed: every failure the backend can report maps to exactly
/// one of these codes, with [`ErrorCode::Unknown`] as the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input failed validation; field messages are usually attached.
    ValidationError,
    /// No session, or the session is invalid or expired.
    Unauthorized,
    /// The requested record does not exist.
    NotFound,
    /// The change clashes with existing data, e.g. a uniqueness violation.
    Conflict,
    /// The hosted service throttled the caller.
    RateLimited,
    /// Anything that could not be classified.
    Unknown,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::ValidationError,
        Self::Unauthorized,
        Self::NotFound,
        Self::Conflict,
        Self::RateLimited,
        Self::Unknown,
    ];

    /// Wire representation of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::RateLimited => "RATE_LIMITED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// User-facing message used when no more specific text is available.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::ValidationError => "Please correct the highlighted fields.",
            Self::Unauthorized => "You need to sign in to continue.",
            Self::NotFound => "The requested record could not be found.",
            Self::Conflict => "This change conflicts with existing records.",
            Self::RateLimited => "Too many requests. Please wait a moment and try again.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error half of an [`ActionResult`](super::ActionResult).
///
/// ## Invariants
/// - `message` is never blank; blank input is replaced with
///   [`ErrorCode::default_message`].
/// - `field_errors` is either absent or holds at least one field.
///
/// # Examples
/// ```
/// use staffing_backend::domain::{ActionError, ErrorCode};
///
/// let err = ActionError::new(ErrorCode::NotFound, "  ");
/// assert_eq!(err.message(), ErrorCode::NotFound.default_message());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ActionErrorDto")]
pub struct ActionError {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl ActionError {
    /// Build an error, capturing the trace identifier of the current request.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: normalise_message(code, message.into()),
            field_errors: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Build an error with the code's default message.
    #[must_use]
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Validation failure carrying per-field messages.
    pub fn validation(field_errors: FieldErrors) -> Self {
        Self::from_code(ErrorCode::ValidationError).with_field_errors(field_errors)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Unknown`].
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unknown, message)
    }

    /// Attach field messages, dropping an empty map.
    #[must_use]
    pub fn with_field_errors(mut self, field_errors: FieldErrors) -> Self {
        self.field_errors = (!field_errors.is_empty()).then_some(field_errors);
        self
    }

    /// Append a single message for `field`.
    #[must_use]
    pub fn with_field_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.field_errors
            .get_or_insert_with(FieldErrors::new)
            .entry(field.into())
            .or_default()
            .push(message.into());
        self
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Failure category.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message safe to show to users.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Per-field validation messages, if any.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.field_errors.as_ref()
    }

    /// Correlation identifier of the request that produced the error.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }
}

fn normalise_message(code: ErrorCode, message: String) -> String {
    if message.trim().is_empty() {
        code.default_message().to_owned()
    } else {
        message
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ActionError {}

impl From<std::convert::Infallible> for ActionError {
    fn from(value: std::convert::Infallible) -> Self {
        match value {}
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionErrorDto {
    code: ErrorCode,
    #[serde(default)]
    message: String,
    #[serde(default)]
    field_errors: Option<FieldErrors>,
    #[serde(default)]
    trace_id: Option<String>,
}

impl From<ActionErrorDto> for ActionError {
    fn from(value: ActionErrorDto) -> Self {
        let ActionErrorDto {
            code,
            message,
            field_errors,
            trace_id,
        } = value;
        Self {
            code,
            message: normalise_message(code, message),
            field_errors: field_errors.filter(|errors| !errors.is_empty()),
            trace_id,
        }
    }
}
