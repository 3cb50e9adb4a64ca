//! Builders for HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use staffing_backend::inbound::http::state::{HttpState, HttpStatePorts};
use staffing_backend::outbound::supabase::{SupabaseClient, SupabaseConfig};

/// Build HTTP state over the hosted backend when configured, otherwise over
/// the in-memory fixtures.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
pub(super) fn build_http_state(
    supabase: Option<SupabaseConfig>,
) -> std::io::Result<web::Data<HttpState>> {
    let ports = match supabase {
        Some(config) => {
            info!(url = %config.url, "using hosted Supabase backend");
            let client = Arc::new(SupabaseClient::new(config).map_err(|error| {
                std::io::Error::other(format!("failed to build Supabase client: {error}"))
            })?);
            HttpStatePorts {
                auth: client.clone(),
                records: client,
            }
        }
        None => {
            warn!("STAFFING_SUPABASE_URL not set; serving in-memory fixture data");
            HttpStatePorts::fixtures()
        }
    };
    Ok(web::Data::new(HttpState::new(ports)))
}
