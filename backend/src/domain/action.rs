//! The boundary where fallible async work becomes an [`ActionResult`].
//!
//! [`try_catch`] is the only place where error propagation turns into a
//! value. Errors are classified through their `Into<ActionError>`
//! conversion (or an explicit mapping with [`try_catch_with`]); panics raised
//! while the operation runs are caught and reported as
//! [`ErrorCode::Unknown`]. No retries, no timeouts: callers own both.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use tracing::error;

use super::action_result::ActionResult;
use super::backend_error::BackendError;
use super::error::{ActionError, ErrorCode};

/// Run `operation` and normalise its outcome.
///
/// # Examples
/// ```
/// use staffing_backend::domain::{ActionError, try_catch};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let result = try_catch(|| async { Ok::<_, ActionError>(5) }).await;
/// assert_eq!(result.data(), Some(&5));
/// # });
/// ```
pub async fn try_catch<T, E, F, Fut>(operation: F) -> ActionResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<ActionError>,
{
    try_catch_with(operation, Into::into).await
}

/// Run `operation`, classifying failures with `map_error`.
pub async fn try_catch_with<T, E, F, Fut, M>(operation: F, map_error: M) -> ActionResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    M: FnOnce(E) -> ActionError,
{
    let outcome = AssertUnwindSafe(async move { operation().await })
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(data)) => ActionResult::success(data),
        Ok(Err(err)) => ActionResult::Failure {
            error: map_error(err),
        },
        Err(payload) => {
            error!(panic = panic_detail(payload.as_ref()), "action panicked");
            ActionResult::Failure {
                error: ActionError::from_code(ErrorCode::Unknown),
            }
        }
    }
}

fn panic_detail(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Ad hoc failures (`eyre!("…")`) are classified by their root cause when it
/// is an [`ActionError`] or [`BackendError`]; anything else is unknown.
impl From<color_eyre::Report> for ActionError {
    fn from(report: color_eyre::Report) -> Self {
        if let Some(action_error) = report.downcast_ref::<Self>() {
            return action_error.clone();
        }
        if let Some(backend_error) = report.downcast_ref::<BackendError>() {
            return backend_error.clone().into();
        }
        error!(error = %report, "unclassified action failure");
        Self::from_code(ErrorCode::Unknown)
    }
}
