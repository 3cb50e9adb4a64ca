//! Administrative backend for a staffing agency.
//!
//! Every operation returns an [`ActionResult`](domain::ActionResult): either
//! data or a classified [`ActionError`](domain::ActionError). The HTTP layer
//! serialises that envelope as-is.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
