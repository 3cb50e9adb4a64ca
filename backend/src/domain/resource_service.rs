//! Generic CRUD service behind every dashboard resource screen.
//!
//! Drafts are validated in full before the store is touched. Rows cross the
//! port as JSON objects and are decoded into the typed record here; a row
//! the record type cannot decode is reported as an unknown failure.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use super::action::try_catch;
use super::action_result::ActionResult;
use super::auth::AccessToken;
use super::backend_error::BackendError;
use super::error::ActionError;
use super::ports::{RecordStore, Row};
use super::resources::{Draft, RecordFilter, Resource};

/// Driving service for one resource type.
pub struct ResourceService<R> {
    store: Arc<dyn RecordStore>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.store))
    }
}

impl<R> ResourceService<R> {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceService<R> {
    fn not_found() -> ActionError {
        ActionError::not_found(format!("{} not found.", R::TABLE.label()))
    }

    fn check_filters(filters: &[RecordFilter]) -> Result<(), ActionError> {
        let allowed = R::TABLE.filter_columns();
        let rejected: BTreeMap<String, Vec<String>> = filters
            .iter()
            .filter(|filter| !allowed.contains(&filter.column.as_str()))
            .map(|filter| {
                (
                    filter.column.clone(),
                    vec![format!("{} cannot be filtered by this field.", R::TABLE.label())],
                )
            })
            .collect();
        if rejected.is_empty() {
            Ok(())
        } else {
            Err(ActionError::validation(rejected))
        }
    }

    /// Records newest first, restricted by parent-id filters.
    pub async fn list(
        &self,
        token: &AccessToken,
        filters: Vec<RecordFilter>,
    ) -> ActionResult<Vec<R>> {
        try_catch(|| async {
            Self::check_filters(&filters)?;
            let rows = self.store.select(token, R::TABLE, &filters).await?;
            rows.into_iter()
                .map(decode_row)
                .collect::<Result<Vec<R>, ActionError>>()
        })
        .await
    }

    pub async fn get(&self, token: &AccessToken, id: Uuid) -> ActionResult<R> {
        try_catch(|| async {
            let row = self
                .store
                .select_one(token, R::TABLE, id)
                .await?
                .ok_or_else(Self::not_found)?;
            decode_row(row)
        })
        .await
    }

    pub async fn create(&self, token: &AccessToken, draft: R::Draft) -> ActionResult<R> {
        try_catch(|| async {
            let row = encode_draft(&draft.validate()?)?;
            let record: R = decode_row(self.store.insert(token, R::TABLE, row).await?)?;
            info!(table = %R::TABLE, id = %record.id(), "record created");
            Ok::<_, ActionError>(record)
        })
        .await
    }

    /// Replace every editable column of the record with the draft's values.
    pub async fn update(&self, token: &AccessToken, id: Uuid, draft: R::Draft) -> ActionResult<R> {
        try_catch(|| async {
            let changes = encode_draft(&draft.validate()?)?;
            let row = self
                .store
                .update(token, R::TABLE, id, changes)
                .await?
                .ok_or_else(Self::not_found)?;
            info!(table = %R::TABLE, %id, "record updated");
            decode_row(row)
        })
        .await
    }

    pub async fn delete(&self, token: &AccessToken, id: Uuid) -> ActionResult<()> {
        try_catch(|| async {
            if !self.store.delete(token, R::TABLE, id).await? {
                return Err(Self::not_found());
            }
            info!(table = %R::TABLE, %id, "record deleted");
            Ok(())
        })
        .await
    }
}

fn decode_row<R: DeserializeOwned>(row: Row) -> Result<R, ActionError> {
    serde_json::from_value(Value::Object(row))
        .map_err(|err| BackendError::decode(format!("unexpected row shape: {err}")).into())
}

fn encode_draft<D: Serialize>(draft: &D) -> Result<Row, ActionError> {
    match serde_json::to_value(draft) {
        Ok(Value::Object(row)) => Ok(row),
        Ok(other) => Err(BackendError::decode(format!("draft is not an object: {other}")).into()),
        Err(err) => Err(BackendError::decode(format!("failed to encode draft: {err}")).into()),
    }
}

#[cfg(test)]
#[path = "resource_service_tests.rs"]
mod tests;
