//! Open roles a client wants filled, optionally tied to one location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Draft, Resource, Table};
use crate::domain::error::ActionError;
use crate::domain::validation::FieldValidator;

/// Upper bound on the hourly rate, in cents.
pub const HOURLY_RATE_MAX_CENTS: i64 = 1_000_000;

/// Stored position record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Position {
    pub id: Uuid,
    pub client_id: Uuid,
    pub work_location_id: Option<Uuid>,
    #[schema(example = "Forklift operator")]
    pub title: String,
    /// Pay rate in minor currency units.
    #[schema(example = 1850)]
    pub hourly_rate_cents: i64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create/update input for [`Position`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct PositionDraft {
    pub client_id: Option<Uuid>,
    pub work_location_id: Option<Uuid>,
    pub title: String,
    pub hourly_rate_cents: Option<i64>,
    pub description: Option<String>,
}

impl Draft for PositionDraft {
    fn validate(self) -> Result<Self, ActionError> {
        let mut validator = FieldValidator::new();
        validator.ensure(self.client_id.is_some(), "client_id", "Client is required.");
        match self.hourly_rate_cents {
            None => validator.add("hourly_rate_cents", "Hourly rate is required."),
            Some(rate) => validator.ensure(
                rate > 0 && rate <= HOURLY_RATE_MAX_CENTS,
                "hourly_rate_cents",
                "Hourly rate must be positive and at most 10000.00.",
            ),
        }
        let draft = Self {
            client_id: self.client_id,
            work_location_id: self.work_location_id,
            title: validator.required_text("title", &self.title, 120),
            hourly_rate_cents: self.hourly_rate_cents,
            description: validator.optional_text("description", self.description.as_deref(), 2000),
        };
        validator.finish()?;
        Ok(draft)
    }
}

impl Resource for Position {
    const TABLE: Table = Table::Positions;
    type Draft = PositionDraft;

    fn id(&self) -> Uuid {
        self.id
    }
}
