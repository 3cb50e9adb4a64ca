//! Placement of a worker into a position for a date range.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Draft, Resource, Table};
use crate::domain::error::ActionError;
use crate::domain::validation::FieldValidator;

/// Lifecycle of an assignment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    #[default]
    Scheduled,
    Active,
    Completed,
    Cancelled,
}

/// Stored assignment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Assignment {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub position_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create/update input for [`Assignment`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct AssignmentDraft {
    pub worker_id: Option<Uuid>,
    pub position_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
}

impl Draft for AssignmentDraft {
    fn validate(self) -> Result<Self, ActionError> {
        let mut validator = FieldValidator::new();
        validator.ensure(self.worker_id.is_some(), "worker_id", "Worker is required.");
        validator.ensure(self.position_id.is_some(), "position_id", "Position is required.");
        validator.ensure(self.start_date.is_some(), "start_date", "Start date is required.");
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            validator.ensure(
                end >= start,
                "end_date",
                "End date must not be before the start date.",
            );
        }
        let notes = validator.optional_text("notes", self.notes.as_deref(), 2000);
        validator.finish()?;
        Ok(Self { notes, ..self })
    }
}

impl Resource for Assignment {
    const TABLE: Table = Table::Assignments;
    type Draft = AssignmentDraft;

    fn id(&self) -> Uuid {
        self.id
    }
}
