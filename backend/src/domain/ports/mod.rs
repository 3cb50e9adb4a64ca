//! Driven ports for the hosted authentication and database services.
//!
//! Each port ships a `Fixture*` adapter for local development and HTTP
//! tests; unit tests use the generated `Mock*` doubles.

mod auth_gateway;
mod record_store;

#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use auth_gateway::{AuthGateway, FixtureAuthGateway};
#[cfg(test)]
pub use record_store::MockRecordStore;
pub use record_store::{FixtureRecordStore, RecordStore, Row};
