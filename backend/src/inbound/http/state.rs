//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services built over ports and remain testable without
//! I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthGateway, FixtureAuthGateway, FixtureRecordStore, RecordStore};
use crate::domain::resources::Resource;
use crate::domain::{AuthService, DashboardService, ResourceService};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub auth: Arc<dyn AuthGateway>,
    pub records: Arc<dyn RecordStore>,
}

impl HttpStatePorts {
    /// In-memory adapters for local development and tests.
    pub fn fixtures() -> Self {
        Self {
            auth: Arc::new(FixtureAuthGateway),
            records: Arc::new(FixtureRecordStore::new()),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: AuthService,
    pub dashboard: DashboardService,
    records: Arc<dyn RecordStore>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use staffing_backend::domain::resources::Client;
    /// use staffing_backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts::fixtures());
    /// let _clients = state.resource::<Client>();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts { auth, records } = ports;
        Self {
            auth: AuthService::new(auth),
            dashboard: DashboardService::new(Arc::clone(&records)),
            records,
        }
    }

    /// CRUD service for resource `R`.
    pub fn resource<R: Resource>(&self) -> ResourceService<R> {
        ResourceService::new(Arc::clone(&self.records))
    }
}
