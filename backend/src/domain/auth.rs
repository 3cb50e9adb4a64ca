//! Authentication primitives: sign-in credentials, tokens and sessions.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate raw strings before a handler talks to a port or service.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::error::ActionError;
use super::validation::FieldValidator;

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and shaped like an address.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use staffing_backend::domain::SignInCredentials;
///
/// let creds = SignInCredentials::try_from_parts(" Admin@Agency.test ", "secret").unwrap();
/// assert_eq!(creds.email(), "admin@agency.test");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl SignInCredentials {
    /// Validate raw form input.
    ///
    /// # Errors
    ///
    /// Returns a `VALIDATION_ERROR` with messages for `email` and/or
    /// `password`.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, ActionError> {
        let mut validator = FieldValidator::new();
        let email = validator.required_email("email", email);
        validator.ensure(!password.is_empty(), "password", "Password is required.");
        validator.finish()?;

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for SignInCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Bearer token issued by the auth service. Zeroised on drop and never
/// printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Signed-in staff member as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    #[schema(example = "admin@agency.test")]
    pub email: String,
}

/// Tokens and identity returned by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user: AuthUser,
    pub access_token: AccessToken,
    pub refresh_token: AccessToken,
    pub expires_at: DateTime<Utc>,
}
