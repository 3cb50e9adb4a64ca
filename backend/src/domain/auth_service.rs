//! Sign-in, sign-out and session checks for dashboard staff.
//!
//! Every method returns an [`ActionResult`]; auth-service failures are
//! classified through [`map_auth_error`] so handlers never inspect raw
//! gateway errors.

use std::sync::Arc;

use tracing::{debug, info};

use super::action::{try_catch, try_catch_with};
use super::action_result::ActionResult;
use super::auth::{AccessToken, AuthSession, AuthUser, SignInCredentials};
use super::auth_error::{auth_action_error, map_auth_error};
use super::error::ErrorCode;
use super::ports::AuthGateway;

/// Driving service for authentication use-cases.
#[derive(Clone)]
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
}

impl AuthService {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self { gateway }
    }

    /// Validate the raw form input and sign in.
    pub async fn sign_in(&self, email: &str, password: &str) -> ActionResult<AuthSession> {
        let credentials = match SignInCredentials::try_from_parts(email, password) {
            Ok(credentials) => credentials,
            Err(error) => return ActionResult::Failure { error },
        };

        let result = try_catch_with(|| self.gateway.sign_in(&credentials), auth_action_error).await;
        if let Some(session) = result.data() {
            info!(user_id = %session.user.id, "staff member signed in");
        }
        result
    }

    /// Revoke the session upstream.
    ///
    /// A session the auth service no longer recognises is already gone, so
    /// that case still counts as a successful sign-out.
    pub async fn sign_out(&self, token: &AccessToken) -> ActionResult<()> {
        try_catch(|| async {
            match self.gateway.sign_out(token).await {
                Ok(()) => Ok(()),
                Err(err) if map_auth_error(&err).code == ErrorCode::Unauthorized => {
                    debug!(auth_code = err.code(), "sign-out for an expired session");
                    Ok(())
                }
                Err(err) => Err(auth_action_error(err)),
            }
        })
        .await
    }

    /// Resolve the user behind `token`. This is the authoritative session
    /// check; a cookie alone proves nothing.
    pub async fn current_user(&self, token: &AccessToken) -> ActionResult<AuthUser> {
        try_catch_with(|| self.gateway.user(token), auth_action_error).await
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
