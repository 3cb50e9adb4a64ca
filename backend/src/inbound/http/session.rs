//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: persisting the tokens of a signed-in user and
//! reading the access token back for calls to the hosted service.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use chrono::{DateTime, Utc};
use futures_util::future::LocalBoxFuture;
use tracing::{error, warn};

use crate::domain::{AccessToken, ActionError, AuthSession, ErrorCode};

pub(crate) const ACCESS_TOKEN_KEY: &str = "access_token";
pub(crate) const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub(crate) const EXPIRES_AT_KEY: &str = "expires_at";

fn session_failure(operation: &'static str, err: impl std::fmt::Display) -> ActionError {
    error!(error = %err, operation, "session cookie access failed");
    ActionError::from_code(ErrorCode::Unknown)
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the tokens of a freshly signed-in user in the session cookie.
    pub fn persist(&self, session: &AuthSession) -> Result<(), ActionError> {
        self.0.renew();
        self.0
            .insert(ACCESS_TOKEN_KEY, session.access_token.expose())
            .and_then(|()| {
                self.0
                    .insert(REFRESH_TOKEN_KEY, session.refresh_token.expose())
            })
            .and_then(|()| {
                self.0
                    .insert(EXPIRES_AT_KEY, session.expires_at.timestamp())
            })
            .map_err(|err| session_failure("persist", err))
    }

    /// Fetch the access token, if the cookie holds an unexpired one.
    pub fn access_token(&self) -> Result<Option<AccessToken>, ActionError> {
        let token = self
            .0
            .get::<String>(ACCESS_TOKEN_KEY)
            .map_err(|err| session_failure("read", err))?;
        let Some(token) = token else {
            return Ok(None);
        };

        let expires_at = self
            .0
            .get::<i64>(EXPIRES_AT_KEY)
            .map_err(|err| session_failure("read", err))?
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
        match expires_at {
            Some(expiry) if expiry > Utc::now() => Ok(Some(AccessToken::new(token))),
            Some(_) => Ok(None),
            None => {
                warn!("session cookie holds a token without a valid expiry");
                Ok(None)
            }
        }
    }

    /// Require a signed-in user or fail with `UNAUTHORIZED`.
    pub fn require_access_token(&self) -> Result<AccessToken, ActionError> {
        self.access_token()?
            .ok_or_else(|| ActionError::from_code(ErrorCode::Unauthorized))
    }

    /// Drop every session value and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthUser;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use chrono::Duration;
    use uuid::Uuid;

    fn auth_session(expires_in: Duration) -> AuthSession {
        AuthSession {
            user: AuthUser {
                id: Uuid::nil(),
                email: "ada@agency.test".to_owned(),
            },
            access_token: AccessToken::new("access-jwt"),
            refresh_token: AccessToken::new("refresh-jwt"),
            expires_at: Utc::now() + expires_in,
        }
    }

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/set/{minutes}",
                web::get().to(|session: SessionContext, minutes: web::Path<i64>| async move {
                    session.persist(&auth_session(Duration::minutes(minutes.into_inner())))?;
                    Ok::<_, ActionError>(HttpResponse::Ok())
                }),
            )
            .route(
                "/get",
                web::get().to(|session: SessionContext| async move {
                    let token = session.require_access_token()?;
                    Ok::<_, ActionError>(HttpResponse::Ok().body(token.expose().to_owned()))
                }),
            )
    }

    fn session_cookie(
        res: &actix_web::dev::ServiceResponse,
    ) -> actix_web::cookie::Cookie<'static> {
        assert_eq!(res.status(), StatusCode::OK);
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.into_owned())
            .expect("session cookie set")
    }

    #[actix_web::test]
    async fn round_trips_access_token() {
        let app = test::init_service(session_test_app()).await;
        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set/30").to_request()).await;
        let cookie = session_cookie(&set_res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "access-jwt");
    }

    #[actix_web::test]
    async fn missing_session_is_unauthorised() {
        let app = test::init_service(session_test_app()).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn expired_session_is_unauthorised() {
        let app = test::init_service(session_test_app()).await;
        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set/-5").to_request()).await;
        let cookie = session_cookie(&set_res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
