//! Sites belonging to a client where workers report for duty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Draft, Resource, Table};
use crate::domain::error::ActionError;
use crate::domain::validation::FieldValidator;

/// Stored work location record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WorkLocation {
    pub id: Uuid,
    pub client_id: Uuid,
    #[schema(example = "North warehouse")]
    pub name: String,
    pub address: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create/update input for [`WorkLocation`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct WorkLocationDraft {
    pub client_id: Option<Uuid>,
    pub name: String,
    pub address: String,
    pub city: String,
    pub postal_code: Option<String>,
}

impl Draft for WorkLocationDraft {
    fn validate(self) -> Result<Self, ActionError> {
        let mut validator = FieldValidator::new();
        validator.ensure(self.client_id.is_some(), "client_id", "Client is required.");
        let draft = Self {
            client_id: self.client_id,
            name: validator.required_text("name", &self.name, 120),
            address: validator.required_text("address", &self.address, 200),
            city: validator.required_text("city", &self.city, 100),
            postal_code: validator.optional_text("postal_code", self.postal_code.as_deref(), 16),
        };
        validator.finish()?;
        Ok(draft)
    }
}

impl Resource for WorkLocation {
    const TABLE: Table = Table::WorkLocations;
    type Draft = WorkLocationDraft;

    fn id(&self) -> Uuid {
        self.id
    }
}
