//! CRUD handlers shared by every dashboard resource.
//!
//! ```text
//! GET    /api/v1/clients
//! GET    /api/v1/work-locations?client_id=<uuid>
//! POST   /api/v1/positions {"client_id":"…","title":"Forklift driver","hourly_rate_cents":1450}
//! GET    /api/v1/workers/{id}
//! PUT    /api/v1/assignments/{id}
//! DELETE /api/v1/assignments/{id}
//! ```
//!
//! Handlers are generic over [`Resource`] and registered per resource by
//! [`configure_resources`]. Every route requires a session.

use std::collections::BTreeMap;

use actix_web::web;
use uuid::Uuid;

use crate::domain::resources::{
    Assignment, Client, Position, RecordFilter, Resource, Table, TemporaryWorker, WorkLocation,
};
use crate::domain::{ActionError, ActionResult, FieldErrors};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// URL segment under `/api/v1` for each table.
pub const fn collection_path(table: Table) -> &'static str {
    match table {
        Table::Clients => "/clients",
        Table::WorkLocations => "/work-locations",
        Table::Positions => "/positions",
        Table::TemporaryWorkers => "/workers",
        Table::Assignments => "/assignments",
    }
}

fn parse_filters(query: BTreeMap<String, String>) -> Result<Vec<RecordFilter>, ActionError> {
    let mut filters = Vec::with_capacity(query.len());
    let mut invalid = FieldErrors::new();
    for (column, raw) in query {
        match raw.trim().parse::<Uuid>() {
            Ok(value) => filters.push(RecordFilter::new(column, value)),
            Err(_) => {
                invalid.insert(column, vec!["Invalid identifier.".to_owned()]);
            }
        }
    }
    if invalid.is_empty() {
        Ok(filters)
    } else {
        Err(ActionError::validation(invalid))
    }
}

async fn list<R: Resource>(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<BTreeMap<String, String>>,
) -> Result<ActionResult<Vec<R>>, ActionError> {
    let token = session.require_access_token()?;
    let filters = parse_filters(query.into_inner())?;
    Ok(state.resource::<R>().list(&token, filters).await)
}

async fn get<R: Resource>(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> Result<ActionResult<R>, ActionError> {
    let token = session.require_access_token()?;
    Ok(state.resource::<R>().get(&token, id.into_inner()).await)
}

async fn create<R: Resource>(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<R::Draft>,
) -> Result<ActionResult<R>, ActionError> {
    let token = session.require_access_token()?;
    Ok(state
        .resource::<R>()
        .create(&token, payload.into_inner())
        .await)
}

async fn update<R: Resource>(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
    payload: web::Json<R::Draft>,
) -> Result<ActionResult<R>, ActionError> {
    let token = session.require_access_token()?;
    Ok(state
        .resource::<R>()
        .update(&token, id.into_inner(), payload.into_inner())
        .await)
}

async fn delete<R: Resource>(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> Result<ActionResult<()>, ActionError> {
    let token = session.require_access_token()?;
    Ok(state.resource::<R>().delete(&token, id.into_inner()).await)
}

fn configure_resource<R: Resource>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(collection_path(R::TABLE))
            .route("", web::get().to(list::<R>))
            .route("", web::post().to(create::<R>))
            .route("/{id}", web::get().to(get::<R>))
            .route("/{id}", web::put().to(update::<R>))
            .route("/{id}", web::delete().to(delete::<R>)),
    );
}

/// Register the CRUD routes of every resource.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use staffing_backend::inbound::http::resources::configure_resources;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_resources));
/// ```
pub fn configure_resources(cfg: &mut web::ServiceConfig) {
    configure_resource::<Client>(cfg);
    configure_resource::<WorkLocation>(cfg);
    configure_resource::<Position>(cfg);
    configure_resource::<TemporaryWorker>(cfg);
    configure_resource::<Assignment>(cfg);
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn every_table_has_a_distinct_path() {
        let mut paths: Vec<_> = Table::ALL.iter().map(|table| collection_path(*table)).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), Table::ALL.len());
    }

    #[rstest]
    fn filters_must_be_identifiers() {
        let query = BTreeMap::from([
            ("client_id".to_owned(), Uuid::nil().to_string()),
            ("worker_id".to_owned(), "seven".to_owned()),
        ]);
        let err = parse_filters(query).expect_err("bad filter value");
        assert_eq!(err.code(), ErrorCode::ValidationError);
        let fields = err.field_errors().expect("field errors");
        assert!(fields.contains_key("worker_id"));
        assert!(!fields.contains_key("client_id"));
    }
}
