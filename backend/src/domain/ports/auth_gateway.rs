//! Driven port for the hosted authentication service.
//!
//! Adapters report failures as raw [`BackendError`] values; classification
//! into user-facing codes happens in the domain service that calls them.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::{AccessToken, AuthSession, AuthUser, BackendError, SignInCredentials};

/// Port for password sign-in and session lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a session.
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<AuthSession, BackendError>;

    /// Revoke the session identified by `token`.
    async fn sign_out(&self, token: &AccessToken) -> Result<(), BackendError>;

    /// Resolve the user owning `token`.
    async fn user(&self, token: &AccessToken) -> Result<AuthUser, BackendError>;
}

/// Fixed sign-in used when no hosted service is configured.
///
/// `admin@agency.test` / `password` signs in as a fixed user and receives
/// [`FixtureAuthGateway::ACCESS_TOKEN`]; any other token is rejected the
/// way the hosted service rejects a bad JWT.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthGateway;

impl FixtureAuthGateway {
    pub const EMAIL: &'static str = "admin@agency.test";
    pub const PASSWORD: &'static str = "password";
    pub const ACCESS_TOKEN: &'static str = "fixture-access-token";
    pub const USER_ID: Uuid = Uuid::from_u128(0x123e_4567_e89b_12d3_a456_4266_1417_4000);

    fn user_record() -> AuthUser {
        AuthUser {
            id: Self::USER_ID,
            email: Self::EMAIL.to_owned(),
        }
    }
}

#[async_trait]
impl AuthGateway for FixtureAuthGateway {
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<AuthSession, BackendError> {
        if credentials.email() != Self::EMAIL || credentials.password() != Self::PASSWORD {
            return Err(BackendError::api(
                400,
                Some("invalid_credentials".to_owned()),
                "Invalid login credentials",
            ));
        }
        Ok(AuthSession {
            user: Self::user_record(),
            access_token: AccessToken::new(Self::ACCESS_TOKEN),
            refresh_token: AccessToken::new("fixture-refresh-token"),
            expires_at: Utc::now() + Duration::hours(1),
        })
    }

    async fn sign_out(&self, _token: &AccessToken) -> Result<(), BackendError> {
        Ok(())
    }

    async fn user(&self, token: &AccessToken) -> Result<AuthUser, BackendError> {
        if token.expose() == Self::ACCESS_TOKEN {
            Ok(Self::user_record())
        } else {
            Err(BackendError::api(
                401,
                Some("bad_jwt".to_owned()),
                "invalid JWT: unable to parse or verify signature",
            ))
        }
    }
}
