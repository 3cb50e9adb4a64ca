//! Dashboard overview handler.
//!
//! ```text
//! GET /api/v1/dashboard
//! ```

use actix_web::{get, web};

use crate::domain::{ActionError, ActionResult, DashboardSummary};
use crate::inbound::http::schemas::{FailureEnvelope, SuccessEnvelope};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Row counts for the overview screen.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Counts per resource", body = SuccessEnvelope<DashboardSummary>),
        (status = 401, description = "No valid session", body = FailureEnvelope),
        (status = 500, description = "Internal server error", body = FailureEnvelope)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardSummary"
)]
#[get("/dashboard")]
pub async fn summary(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> Result<ActionResult<DashboardSummary>, ActionError> {
    let token = session.require_access_token()?;
    Ok(state.dashboard.summary(&token).await)
}
