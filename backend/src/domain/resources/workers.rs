//! Temporary workers on the agency's books.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Draft, Resource, Table};
use crate::domain::error::ActionError;
use crate::domain::validation::FieldValidator;

const NAME_MAX: usize = 80;

/// Availability of a worker for new assignments.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    #[default]
    Available,
    Assigned,
    Inactive,
}

/// Stored worker record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TemporaryWorker {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: WorkerStatus,
    pub created_at: DateTime<Utc>,
}

/// Create/update input for [`TemporaryWorker`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct TemporaryWorkerDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: WorkerStatus,
}

impl Draft for TemporaryWorkerDraft {
    fn validate(self) -> Result<Self, ActionError> {
        let mut validator = FieldValidator::new();
        let draft = Self {
            first_name: validator.required_text("first_name", &self.first_name, NAME_MAX),
            last_name: validator.required_text("last_name", &self.last_name, NAME_MAX),
            email: validator.required_email("email", &self.email),
            phone: validator.optional_phone("phone", self.phone.as_deref()),
            status: self.status,
        };
        validator.finish()?;
        Ok(draft)
    }
}

impl Resource for TemporaryWorker {
    const TABLE: Table = Table::TemporaryWorkers;
    type Draft = TemporaryWorkerDraft;

    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn status_defaults_to_available_when_omitted() {
        let draft: TemporaryWorkerDraft = serde_json::from_value(json!({
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": "grace@example.test",
        }))
        .expect("decode draft");
        assert_eq!(draft.status, WorkerStatus::Available);
        assert!(draft.validate().is_ok());
    }

    #[rstest]
    fn email_is_required() {
        let err = TemporaryWorkerDraft {
            first_name: "Grace".to_owned(),
            last_name: "Hopper".to_owned(),
            ..TemporaryWorkerDraft::default()
        }
        .validate()
        .expect_err("invalid draft");
        assert_eq!(
            err.field_errors().and_then(|fields| fields.get("email")),
            Some(&vec!["Email is required.".to_owned()])
        );
    }
}
