//! Shared world for HTTP behaviour tests.
//!
//! Builds the `/api/v1` scope over fixture adapters and keeps the session
//! cookie between steps. Each request runs on a fresh actix system; the
//! fixture store and session key outlive them so state carries across steps.

use std::cell::RefCell;

use actix_web::cookie::{Cookie, Key, SameSite, time::Duration};
use actix_web::http::Method;
use actix_web::{App, test, web};
use serde_json::Value;
use staffing_backend::Trace;
use staffing_backend::domain::TRACE_ID_HEADER;
use staffing_backend::domain::ports::FixtureAuthGateway;
use staffing_backend::inbound::http::routes::configure_api;
use staffing_backend::inbound::http::session_config::{SESSION_COOKIE_NAME, SessionSettings};
use staffing_backend::inbound::http::state::{HttpState, HttpStatePorts};

/// Outcome of the most recent request.
pub struct LastResponse {
    pub status: u16,
    pub trace_id: Option<String>,
    pub body: Value,
}

pub struct ApiWorld {
    state: web::Data<HttpState>,
    session: SessionSettings,
    cookie: RefCell<Option<Cookie<'static>>>,
    last: RefCell<Option<LastResponse>>,
    remembered_id: RefCell<Option<String>>,
}

impl ApiWorld {
    pub fn new() -> Self {
        Self {
            state: web::Data::new(HttpState::new(HttpStatePorts::fixtures())),
            session: SessionSettings {
                key: Key::generate(),
                cookie_secure: false,
                same_site: SameSite::Lax,
                ttl: Duration::minutes(30),
            },
            cookie: RefCell::new(None),
            last: RefCell::new(None),
            remembered_id: RefCell::new(None),
        }
    }

    /// Send a request to the API and record the response.
    pub fn request(&self, method: Method, path: &str, payload: Option<Value>) {
        let state = self.state.clone();
        let session = self.session.clone();
        let cookie = self.cookie.borrow().clone();
        let uri = format!("/api/v1{path}");

        let (response, new_cookie) = actix_web::rt::System::new().block_on(async move {
            let app = test::init_service(
                App::new().app_data(state).wrap(Trace).service(
                    web::scope("/api/v1")
                        .wrap(session.middleware())
                        .configure(configure_api),
                ),
            )
            .await;

            let mut request = test::TestRequest::default().method(method).uri(&uri);
            if let Some(cookie) = cookie {
                request = request.cookie(cookie);
            }
            if let Some(payload) = payload {
                request = request.set_json(payload);
            }
            let res = test::call_service(&app, request.to_request()).await;

            let status = res.status().as_u16();
            let trace_id = res
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let new_cookie = res
                .response()
                .cookies()
                .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
                .map(Cookie::into_owned);
            let bytes = test::read_body(res).await;
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (
                LastResponse {
                    status,
                    trace_id,
                    body,
                },
                new_cookie,
            )
        });

        if let Some(cookie) = new_cookie {
            let cleared = cookie.value().is_empty();
            *self.cookie.borrow_mut() = (!cleared).then_some(cookie);
        }
        *self.last.borrow_mut() = Some(response);
    }

    pub fn sign_in(&self, email: &str, password: &str) {
        self.request(
            Method::POST,
            "/auth/sign-in",
            Some(serde_json::json!({ "email": email, "password": password })),
        );
    }

    pub fn sign_in_as_admin(&self) {
        self.sign_in(FixtureAuthGateway::EMAIL, FixtureAuthGateway::PASSWORD);
        assert_eq!(self.status(), 200, "fixture sign-in should succeed");
    }

    pub fn forget_session(&self) {
        *self.cookie.borrow_mut() = None;
    }

    pub fn with_last<T>(&self, f: impl FnOnce(&LastResponse) -> T) -> T {
        let last = self.last.borrow();
        f(last.as_ref().expect("a request has been made"))
    }

    pub fn status(&self) -> u16 {
        self.with_last(|last| last.status)
    }

    pub fn body(&self) -> Value {
        self.with_last(|last| last.body.clone())
    }

    /// Keep `data.id` of the last response for later steps.
    pub fn remember_created_id(&self) {
        let id = self
            .body()
            .pointer("/data/id")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .expect("created record id");
        *self.remembered_id.borrow_mut() = Some(id);
    }

    pub fn remembered_id(&self) -> String {
        self.remembered_id
            .borrow()
            .clone()
            .expect("a record id was remembered")
    }

    /// Assert the last response is a failure envelope with `code`, carrying
    /// the same trace id as the response header.
    pub fn assert_failure(&self, status: u16, code: &str) {
        self.with_last(|last| {
            assert_eq!(last.status, status, "unexpected status: {}", last.body);
            assert_eq!(last.body["status"], "failure");
            assert_eq!(last.body["error"]["code"], code);
            let header = last.trace_id.as_deref().expect("trace id header");
            assert_eq!(last.body["error"]["traceId"].as_str(), Some(header));
        });
    }

    pub fn assert_success(&self) {
        self.with_last(|last| {
            assert_eq!(last.status, 200, "unexpected status: {}", last.body);
            assert_eq!(last.body["status"], "success");
        });
    }
}
