//! Domain primitives, the action result layer and driving services.
//!
//! Purpose: keep every fallible dashboard operation behind one contract.
//! Services return [`ActionResult`] values built through [`try_catch`];
//! adapters only ever see the ports in [`ports`].
//!
//! Public surface:
//! - ActionResult, success, failure, is_success, is_failure: the tagged
//!   outcome and its constructors/predicates.
//! - ActionError, ErrorCode, FieldErrors: the closed error taxonomy.
//! - try_catch, try_catch_with: the boundary turning `Result`s and panics
//!   into outcomes.
//! - BackendError, classify_backend_error, map_auth_error: classification
//!   of hosted-service failures.
//! - AuthService, ResourceService, DashboardService: driving services.

pub mod action;
pub mod action_result;
pub mod auth;
pub mod auth_error;
pub mod auth_service;
pub mod backend_error;
pub mod dashboard_service;
pub mod error;
pub mod ports;
pub mod resource_service;
pub mod resources;
pub mod trace_id;
pub mod validation;

pub use self::action::{try_catch, try_catch_with};
pub use self::action_result::{ActionResult, failure, is_failure, is_success, success};
pub use self::auth::{AccessToken, AuthSession, AuthUser, SignInCredentials};
pub use self::auth_error::{AuthErrorMapping, auth_action_error, map_auth_error};
pub use self::auth_service::AuthService;
pub use self::backend_error::{BackendError, BackendErrorKind, classify_backend_error};
pub use self::dashboard_service::{DashboardService, DashboardSummary};
pub use self::error::{ActionError, ErrorCode, FieldErrors};
pub use self::resource_service::ResourceService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::FieldValidator;
