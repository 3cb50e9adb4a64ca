//! Driven port for row-level access to the hosted database.
//!
//! Rows travel as JSON objects so one port serves every table; typed
//! decoding happens in [`ResourceService`](crate::domain::ResourceService).
//! Every call carries the signed-in user's token because row-level security
//! in the hosted database is evaluated per request.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::resources::{RecordFilter, Table};
use crate::domain::{AccessToken, BackendError};

/// A row as stored by the hosted database.
pub type Row = Map<String, Value>;

/// Port for reading and writing resource rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Rows matching every filter, newest first.
    async fn select(
        &self,
        token: &AccessToken,
        table: Table,
        filters: &[RecordFilter],
    ) -> Result<Vec<Row>, BackendError>;

    /// Row with the given id, if any.
    async fn select_one(
        &self,
        token: &AccessToken,
        table: Table,
        id: Uuid,
    ) -> Result<Option<Row>, BackendError>;

    /// Insert `row` and return the stored representation.
    async fn insert(&self, token: &AccessToken, table: Table, row: Row)
    -> Result<Row, BackendError>;

    /// Apply `changes` to the row with the given id; `None` when it does not
    /// exist.
    async fn update(
        &self,
        token: &AccessToken,
        table: Table,
        id: Uuid,
        changes: Row,
    ) -> Result<Option<Row>, BackendError>;

    /// Delete the row with the given id; `false` when nothing was deleted.
    async fn delete(&self, token: &AccessToken, table: Table, id: Uuid)
    -> Result<bool, BackendError>;

    /// Number of rows in `table`.
    async fn count(&self, token: &AccessToken, table: Table) -> Result<u64, BackendError>;
}

/// In-memory store used for local development and HTTP tests.
///
/// Mirrors the hosted database closely enough for the dashboard to work:
/// ids and `created_at` are assigned on insert, listings are newest first,
/// and worker emails are unique.
#[derive(Debug, Default)]
pub struct FixtureRecordStore {
    tables: Mutex<HashMap<Table, Vec<Row>>>,
}

impl FixtureRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_table<T>(
        &self,
        table: Table,
        f: impl FnOnce(&mut Vec<Row>) -> Result<T, BackendError>,
    ) -> Result<T, BackendError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| BackendError::transport("fixture record store lock poisoned"))?;
        f(tables.entry(table).or_default())
    }
}

fn row_id(row: &Row) -> Option<Uuid> {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse().ok())
}

fn matches_filters(row: &Row, filters: &[RecordFilter]) -> bool {
    filters.iter().all(|filter| {
        row.get(&filter.column).and_then(Value::as_str) == Some(filter.value.to_string().as_str())
    })
}

fn check_unique_email(
    table: Table,
    rows: &[Row],
    candidate: &Row,
    id: Option<Uuid>,
) -> Result<(), BackendError> {
    if table != Table::TemporaryWorkers {
        return Ok(());
    }
    let Some(email) = candidate.get("email").and_then(Value::as_str) else {
        return Ok(());
    };
    let taken = rows
        .iter()
        .filter(|row| id.is_none() || row_id(row) != id)
        .any(|row| row.get("email").and_then(Value::as_str) == Some(email));
    if taken {
        return Err(BackendError::api(
            409,
            Some("23505".to_owned()),
            "duplicate key value violates unique constraint \"temporary_workers_email_key\"",
        )
        .with_details(format!("Key (email)=({email}) already exists.")));
    }
    Ok(())
}

#[async_trait]
impl RecordStore for FixtureRecordStore {
    async fn select(
        &self,
        _token: &AccessToken,
        table: Table,
        filters: &[RecordFilter],
    ) -> Result<Vec<Row>, BackendError> {
        self.with_table(table, |rows| {
            Ok(rows
                .iter()
                .filter(|row| matches_filters(row, filters))
                .cloned()
                .collect())
        })
    }

    async fn select_one(
        &self,
        _token: &AccessToken,
        table: Table,
        id: Uuid,
    ) -> Result<Option<Row>, BackendError> {
        self.with_table(table, |rows| {
            Ok(rows.iter().find(|row| row_id(row) == Some(id)).cloned())
        })
    }

    async fn insert(
        &self,
        _token: &AccessToken,
        table: Table,
        mut row: Row,
    ) -> Result<Row, BackendError> {
        self.with_table(table, |rows| {
            check_unique_email(table, rows, &row, None)?;
            row.insert("id".to_owned(), Value::String(Uuid::new_v4().to_string()));
            row.insert("created_at".to_owned(), Value::String(Utc::now().to_rfc3339()));
            rows.insert(0, row.clone());
            Ok(row)
        })
    }

    async fn update(
        &self,
        _token: &AccessToken,
        table: Table,
        id: Uuid,
        changes: Row,
    ) -> Result<Option<Row>, BackendError> {
        self.with_table(table, |rows| {
            let Some(index) = rows.iter().position(|row| row_id(row) == Some(id)) else {
                return Ok(None);
            };
            check_unique_email(table, rows, &changes, Some(id))?;
            let Some(existing) = rows.get_mut(index) else {
                return Ok(None);
            };
            for (column, value) in changes {
                if column != "id" && column != "created_at" {
                    existing.insert(column, value);
                }
            }
            Ok(Some(existing.clone()))
        })
    }

    async fn delete(
        &self,
        _token: &AccessToken,
        table: Table,
        id: Uuid,
    ) -> Result<bool, BackendError> {
        self.with_table(table, |rows| {
            let before = rows.len();
            rows.retain(|row| row_id(row) != Some(id));
            Ok(rows.len() != before)
        })
    }

    async fn count(&self, _token: &AccessToken, table: Table) -> Result<u64, BackendError> {
        self.with_table(table, |rows| Ok(rows.len() as u64))
    }
}
