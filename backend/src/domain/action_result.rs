//! Tagged success/failure value returned by every action.
//!
//! An [`ActionResult`] is built once per invocation and handed straight back
//! to the caller. Callers branch on [`ActionResult::is_success`] or match on
//! the variants; they never see transport-specific error shapes.

use serde::{Deserialize, Serialize};

use super::error::{ActionError, ErrorCode, FieldErrors};

/// Outcome of a fallible action.
///
/// Serialises as `{"status":"success","data":…}` or
/// `{"status":"failure","error":{…}}`.
///
/// # Examples
/// ```
/// use staffing_backend::domain::{ActionResult, ErrorCode};
///
/// let ok = ActionResult::success(5);
/// assert!(ok.is_success());
///
/// let err: ActionResult<i32> = ActionResult::failure(ErrorCode::NotFound, "missing");
/// assert_eq!(err.error().map(|e| e.code()), Some(ErrorCode::NotFound));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
#[must_use]
pub enum ActionResult<T> {
    /// The action completed and produced `data`.
    Success { data: T },
    /// The action failed with a classified error.
    Failure { error: ActionError },
}

impl<T> ActionResult<T> {
    /// Wrap a value as a successful outcome.
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    /// Build a failed outcome from a code and message.
    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Failure {
            error: ActionError::new(code, message),
        }
    }

    /// Build a failed outcome carrying per-field messages.
    pub fn failure_with_fields(
        code: ErrorCode,
        message: impl Into<String>,
        field_errors: FieldErrors,
    ) -> Self {
        Self::Failure {
            error: ActionError::new(code, message).with_field_errors(field_errors),
        }
    }

    /// `true` for [`ActionResult::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// `true` for [`ActionResult::Failure`].
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Borrow the success payload.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// Borrow the failure payload.
    #[must_use]
    pub fn error(&self) -> Option<&ActionError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Transform the success payload, leaving failures untouched.
    pub fn map<U, F>(self, f: F) -> ActionResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success { data } => ActionResult::Success { data: f(data) },
            Self::Failure { error } => ActionResult::Failure { error },
        }
    }

    /// Convert into a plain `Result` so `?` can be used between actions.
    ///
    /// # Errors
    ///
    /// Returns the carried [`ActionError`] for failed outcomes.
    pub fn into_result(self) -> Result<T, ActionError> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Failure { error } => Err(error),
        }
    }
}

impl<T> From<Result<T, ActionError>> for ActionResult<T> {
    fn from(value: Result<T, ActionError>) -> Self {
        match value {
            Ok(data) => Self::Success { data },
            Err(error) => Self::Failure { error },
        }
    }
}

impl<T> From<ActionResult<T>> for Result<T, ActionError> {
    fn from(value: ActionResult<T>) -> Self {
        value.into_result()
    }
}

/// Wrap `data` as a successful outcome.
pub fn success<T>(data: T) -> ActionResult<T> {
    ActionResult::success(data)
}

/// Build a failed outcome, optionally with field messages.
pub fn failure<T>(
    code: ErrorCode,
    message: impl Into<String>,
    field_errors: Option<FieldErrors>,
) -> ActionResult<T> {
    match field_errors {
        Some(fields) => ActionResult::failure_with_fields(code, message, fields),
        None => ActionResult::failure(code, message),
    }
}

/// Tag predicate: the outcome is a success.
#[must_use]
pub fn is_success<T>(result: &ActionResult<T>) -> bool {
    result.is_success()
}

/// Tag predicate: the outcome is a failure.
#[must_use]
pub fn is_failure<T>(result: &ActionResult<T>) -> bool {
    result.is_failure()
}
