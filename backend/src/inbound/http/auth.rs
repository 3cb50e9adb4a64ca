//! Authentication API handlers.
//!
//! ```text
//! POST /api/v1/auth/sign-in {"email":"admin@agency.test","password":"password"}
//! POST /api/v1/auth/sign-out
//! GET /api/v1/auth/session
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{ActionError, ActionResult, AuthUser, ErrorCode};
use crate::inbound::http::schemas::{FailureEnvelope, SuccessEnvelope};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Sign-in request body for `POST /api/v1/auth/sign-in`.
///
/// Example JSON:
/// `{"email":"admin@agency.test","password":"password"}`
#[derive(Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Sign in with email and password and establish a session.
///
/// Tokens stay in the encrypted session cookie; only the user identity is
/// returned.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = SuccessEnvelope<AuthUser>, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Invalid credentials", body = FailureEnvelope),
        (status = 422, description = "Invalid input", body = FailureEnvelope),
        (status = 429, description = "Too many attempts", body = FailureEnvelope),
        (status = 500, description = "Internal server error", body = FailureEnvelope)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/auth/sign-in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignInRequest>,
) -> Result<ActionResult<AuthUser>, ActionError> {
    let SignInRequest { email, password } = payload.into_inner();
    let auth_session = state.auth.sign_in(&email, &password).await.into_result()?;
    session.persist(&auth_session)?;
    Ok(ActionResult::success(auth_session.user))
}

/// Sign out: revoke the session upstream and clear the cookie.
///
/// Succeeds even without a session so the client can always reset its state.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-out",
    responses(
        (status = 200, description = "Signed out", body = SuccessEnvelope<Option<String>>),
        (status = 500, description = "Internal server error", body = FailureEnvelope)
    ),
    tags = ["auth"],
    operation_id = "signOut"
)]
#[post("/auth/sign-out")]
pub async fn sign_out(state: web::Data<HttpState>, session: SessionContext) -> ActionResult<()> {
    let token = match session.access_token() {
        Ok(token) => token,
        Err(error) => {
            session.clear();
            return ActionResult::Failure { error };
        }
    };
    let result = match token {
        Some(token) => state.auth.sign_out(&token).await,
        None => ActionResult::success(()),
    };
    session.clear();
    result
}

/// Return the signed-in user, checked against the auth service.
#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    responses(
        (status = 200, description = "Current user", body = SuccessEnvelope<AuthUser>),
        (status = 401, description = "No valid session", body = FailureEnvelope),
        (status = 500, description = "Internal server error", body = FailureEnvelope)
    ),
    tags = ["auth"],
    operation_id = "currentSession"
)]
#[get("/auth/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> Result<ActionResult<AuthUser>, ActionError> {
    let token = session.require_access_token()?;
    let result = state.auth.current_user(&token).await;
    if result
        .error()
        .is_some_and(|error| error.code() == ErrorCode::Unauthorized)
    {
        warn!("auth service rejected the session cookie; clearing it");
        session.clear();
    }
    Ok(result)
}
