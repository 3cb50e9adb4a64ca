//! Classification of auth-service failures.
//!
//! The auth API reports failures with its own identifiers
//! (`invalid_credentials`, `session_expired`, `over_request_rate_limit`, …)
//! and, on older deployments, only an OAuth-style `error` field. This module
//! folds all of them into the closed [`ErrorCode`] taxonomy together with a
//! fixed, user-facing message.

use tracing::{error, warn};

use super::backend_error::{BackendError, BackendErrorKind};
use super::error::{ActionError, ErrorCode};

const INVALID_CREDENTIALS: &str = "Invalid email or password.";
const EMAIL_NOT_CONFIRMED: &str = "Please confirm your email address before signing in.";
const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";
const ACCOUNT_DISABLED: &str = "This account has been disabled.";
const RATE_LIMITED: &str = "Too many sign-in attempts. Please wait a moment and try again.";
const ACCOUNT_EXISTS: &str = "An account with this email already exists.";
const WEAK_PASSWORD: &str = "The password does not meet the strength requirements.";
const INVALID_EMAIL: &str = "Please enter a valid email address.";
const USER_NOT_FOUND: &str = "No account was found for this user.";
const SERVICE_UNAVAILABLE: &str =
    "The authentication service is unavailable. Please try again shortly.";
const AUTH_FAILED: &str = "Authentication failed. Please try again.";

/// Classified auth failure: a taxonomy code plus the message shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthErrorMapping {
    pub code: ErrorCode,
    pub message: &'static str,
}

impl AuthErrorMapping {
    const fn new(code: ErrorCode, message: &'static str) -> Self {
        Self { code, message }
    }
}

/// Translate an auth-service failure into a code and user-facing message.
///
/// Total over its input: unrecognised identifiers and statuses yield
/// [`ErrorCode::Unknown`].
///
/// # Examples
/// ```
/// use staffing_backend::domain::{BackendError, ErrorCode, map_auth_error};
///
/// let err = BackendError::api(400, Some("invalid_credentials".to_owned()), "Invalid login credentials");
/// assert_eq!(map_auth_error(&err).code, ErrorCode::Unauthorized);
/// ```
#[must_use]
pub fn map_auth_error(error: &BackendError) -> AuthErrorMapping {
    match error.kind() {
        BackendErrorKind::Transport | BackendErrorKind::Timeout => {
            return AuthErrorMapping::new(ErrorCode::Unknown, SERVICE_UNAVAILABLE);
        }
        BackendErrorKind::Decode => return AuthErrorMapping::new(ErrorCode::Unknown, AUTH_FAILED),
        BackendErrorKind::Api => {}
    }

    error
        .code()
        .and_then(mapping_for_code)
        .or_else(|| mapping_for_message(error.message()))
        .or_else(|| error.status().and_then(mapping_for_status))
        .unwrap_or(AuthErrorMapping::new(ErrorCode::Unknown, AUTH_FAILED))
}

fn mapping_for_code(code: &str) -> Option<AuthErrorMapping> {
    let mapping = match code {
        "invalid_credentials" | "invalid_grant" => {
            AuthErrorMapping::new(ErrorCode::Unauthorized, INVALID_CREDENTIALS)
        }
        "email_not_confirmed" | "phone_not_confirmed" => {
            AuthErrorMapping::new(ErrorCode::Unauthorized, EMAIL_NOT_CONFIRMED)
        }
        "session_expired"
        | "session_not_found"
        | "refresh_token_not_found"
        | "refresh_token_already_used"
        | "bad_jwt"
        | "no_authorization" => AuthErrorMapping::new(ErrorCode::Unauthorized, SESSION_EXPIRED),
        "user_banned" => AuthErrorMapping::new(ErrorCode::Unauthorized, ACCOUNT_DISABLED),
        "over_request_rate_limit" | "over_email_send_rate_limit" | "over_sms_send_rate_limit" => {
            AuthErrorMapping::new(ErrorCode::RateLimited, RATE_LIMITED)
        }
        "user_already_exists" | "email_exists" | "phone_exists" => {
            AuthErrorMapping::new(ErrorCode::Conflict, ACCOUNT_EXISTS)
        }
        "weak_password" => AuthErrorMapping::new(ErrorCode::ValidationError, WEAK_PASSWORD),
        "email_address_invalid" => AuthErrorMapping::new(ErrorCode::ValidationError, INVALID_EMAIL),
        "validation_failed" => AuthErrorMapping::new(
            ErrorCode::ValidationError,
            ErrorCode::ValidationError.default_message(),
        ),
        "user_not_found" => AuthErrorMapping::new(ErrorCode::NotFound, USER_NOT_FOUND),
        _ => return None,
    };
    Some(mapping)
}

/// Older auth deployments only send a message for credential failures.
fn mapping_for_message(message: &str) -> Option<AuthErrorMapping> {
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("invalid login credentials") {
        Some(AuthErrorMapping::new(ErrorCode::Unauthorized, INVALID_CREDENTIALS))
    } else if lowered.contains("email not confirmed") {
        Some(AuthErrorMapping::new(ErrorCode::Unauthorized, EMAIL_NOT_CONFIRMED))
    } else {
        None
    }
}

fn mapping_for_status(status: u16) -> Option<AuthErrorMapping> {
    match status {
        401 | 403 => Some(AuthErrorMapping::new(ErrorCode::Unauthorized, SESSION_EXPIRED)),
        429 => Some(AuthErrorMapping::new(ErrorCode::RateLimited, RATE_LIMITED)),
        422 => Some(AuthErrorMapping::new(
            ErrorCode::ValidationError,
            ErrorCode::ValidationError.default_message(),
        )),
        _ => None,
    }
}

impl From<AuthErrorMapping> for ActionError {
    fn from(value: AuthErrorMapping) -> Self {
        Self::new(value.code, value.message)
    }
}

/// Convert an auth-service failure straight into an [`ActionError`], logging
/// the raw failure.
pub fn auth_action_error(error: BackendError) -> ActionError {
    let mapping = map_auth_error(&error);
    match mapping.code {
        ErrorCode::Unknown => error!(
            kind = ?error.kind(),
            code = error.code(),
            status = error.status(),
            message = error.message(),
            "unclassified auth failure"
        ),
        code => warn!(%code, auth_code = error.code(), "auth request rejected"),
    }
    mapping.into()
}
