//! DTOs for decoding Supabase auth and error payloads.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{AccessToken, AuthSession, AuthUser, BackendError};

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: Uuid,
    #[serde(default)]
    pub(super) email: Option<String>,
}

impl From<UserDto> for AuthUser {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            email: value.email.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponseDto {
    pub(super) access_token: String,
    pub(super) refresh_token: String,
    #[serde(default)]
    pub(super) expires_in: Option<i64>,
    #[serde(default)]
    pub(super) expires_at: Option<i64>,
    pub(super) user: UserDto,
}

impl TokenResponseDto {
    pub(super) fn into_session(self, now: DateTime<Utc>) -> Result<AuthSession, BackendError> {
        let expires_at = match (self.expires_at, self.expires_in) {
            (Some(timestamp), _) => DateTime::from_timestamp(timestamp, 0).ok_or_else(|| {
                BackendError::decode(format!("token expiry {timestamp} is out of range"))
            })?,
            (None, Some(seconds)) => now + Duration::seconds(seconds),
            (None, None) => return Err(BackendError::decode("token response has no expiry")),
        };
        Ok(AuthSession {
            user: self.user.into(),
            access_token: AccessToken::new(self.access_token),
            refresh_token: AccessToken::new(self.refresh_token),
            expires_at,
        })
    }
}

/// Union of the PostgREST and GoTrue error payload shapes.
///
/// PostgREST sends `{code, message, details, hint}`; GoTrue sends
/// `{code: <status>, error_code, msg}` or the OAuth-style
/// `{error, error_description}`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

impl ErrorBodyDto {
    pub(super) fn into_backend_error(self, status: u16, fallback: String) -> BackendError {
        let string_code = match self.code {
            Some(Value::String(code)) => Some(code),
            _ => None,
        };
        let code = self.error_code.or(string_code).or_else(|| self.error.clone());
        let message = self
            .message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)
            .unwrap_or(fallback);

        let mut backend_error = BackendError::api(status, code, message);
        if let Some(details) = self.details {
            backend_error = backend_error.with_details(details);
        }
        if let Some(hint) = self.hint {
            backend_error = backend_error.with_hint(hint);
        }
        backend_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BackendErrorKind;
    use rstest::rstest;

    fn decode_error(status: u16, body: &str) -> BackendError {
        serde_json::from_str::<ErrorBodyDto>(body)
            .expect("error body")
            .into_backend_error(status, format!("status {status}"))
    }

    #[rstest]
    fn postgrest_errors_keep_code_details_and_hint() {
        let err = decode_error(
            409,
            r#"{"code":"23505","message":"duplicate key value violates unique constraint","details":"Key (email)=(a@b.test) already exists.","hint":null}"#,
        );
        assert_eq!(err.kind(), BackendErrorKind::Api);
        assert_eq!(err.code(), Some("23505"));
        assert_eq!(err.details(), Some("Key (email)=(a@b.test) already exists."));
        assert_eq!(err.hint(), None);
    }

    #[rstest]
    #[case(r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#, Some("invalid_credentials"), "Invalid login credentials")]
    #[case(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#, Some("invalid_grant"), "Invalid login credentials")]
    #[case(r"{}", None, "status 400")]
    fn gotrue_error_shapes_are_understood(
        #[case] body: &str,
        #[case] code: Option<&str>,
        #[case] message: &str,
    ) {
        let err = decode_error(400, body);
        assert_eq!(err.code(), code);
        assert_eq!(err.message(), message);
        assert_eq!(err.status(), Some(400));
    }

    #[rstest]
    fn token_expiry_prefers_absolute_timestamp() {
        let body = r#"{
            "access_token": "a", "refresh_token": "r",
            "expires_in": 3600, "expires_at": 1700000000,
            "user": {"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "email": "ada@agency.test"}
        }"#;
        let dto: TokenResponseDto = serde_json::from_str(body).expect("token body");
        let session = dto.into_session(Utc::now()).expect("session");
        assert_eq!(session.expires_at.timestamp(), 1_700_000_000);
        assert_eq!(session.user.email, "ada@agency.test");
    }

    #[rstest]
    fn token_expiry_falls_back_to_relative_lifetime() {
        let body = r#"{
            "access_token": "a", "refresh_token": "r", "expires_in": 60,
            "user": {"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6"}
        }"#;
        let now = Utc::now();
        let dto: TokenResponseDto = serde_json::from_str(body).expect("token body");
        let session = dto.into_session(now).expect("session");
        assert_eq!(session.expires_at, now + Duration::seconds(60));
        assert_eq!(session.user.email, "");
    }
}
