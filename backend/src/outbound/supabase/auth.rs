//! `AuthGateway` over the Supabase auth API.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::debug;

use super::client::SupabaseClient;
use super::dto::{TokenResponseDto, UserDto};
use crate::domain::ports::AuthGateway;
use crate::domain::{AccessToken, AuthSession, AuthUser, BackendError, SignInCredentials};

const TOKEN_PATH: &str = "auth/v1/token";
const LOGOUT_PATH: &str = "auth/v1/logout";
const USER_PATH: &str = "auth/v1/user";

#[async_trait]
impl AuthGateway for SupabaseClient {
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<AuthSession, BackendError> {
        let mut url = self.endpoint(TOKEN_PATH)?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        let request = self.authorize(self.http.post(url), None).json(&json!({
            "email": credentials.email(),
            "password": credentials.password(),
        }));
        let response = self.send(request).await?;
        let session = response
            .json::<TokenResponseDto>("token")?
            .into_session(Utc::now())?;
        debug!(user_id = %session.user.id, "password grant accepted");
        Ok(session)
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), BackendError> {
        let url = self.endpoint(LOGOUT_PATH)?;
        self.send(self.authorize(self.http.post(url), Some(token)))
            .await?;
        Ok(())
    }

    async fn user(&self, token: &AccessToken) -> Result<AuthUser, BackendError> {
        let url = self.endpoint(USER_PATH)?;
        let response = self
            .send(self.authorize(self.http.get(url), Some(token)))
            .await?;
        Ok(response.json::<UserDto>("user")?.into())
    }
}
