//! Route table for the `/api/v1` scope.
//!
//! Extractor failures (bad JSON, non-UUID ids, malformed query strings) are
//! answered with the same failure envelope as handler errors.

use actix_web::web;

use crate::inbound::http::error::{json_error_handler, path_error_handler, query_error_handler};
use crate::inbound::http::{auth, dashboard, resources};

/// Register every API handler together with the extractor configuration.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use staffing_backend::inbound::http::routes::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(auth::sign_in)
        .service(auth::sign_out)
        .service(auth::current_session)
        .service(dashboard::summary)
        .configure(resources::configure_resources);
}
