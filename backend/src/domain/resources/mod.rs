//! Records managed from the dashboard screens.
//!
//! Each resource pairs a stored record type with a *draft*: the
//! create/update input, validated in full before anything reaches the hosted
//! database. Column names match the serde field names, so drafts serialise
//! straight into row payloads.

mod assignments;
mod clients;
mod positions;
mod work_locations;
mod workers;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error::ActionError;

pub use assignments::{Assignment, AssignmentDraft, AssignmentStatus};
pub use clients::{Client, ClientDraft};
pub use positions::{Position, PositionDraft};
pub use work_locations::{WorkLocation, WorkLocationDraft};
pub use workers::{TemporaryWorker, TemporaryWorkerDraft, WorkerStatus};

/// Tables in the hosted database backing each resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Clients,
    WorkLocations,
    Positions,
    TemporaryWorkers,
    Assignments,
}

impl Table {
    pub const ALL: [Self; 5] = [
        Self::Clients,
        Self::WorkLocations,
        Self::Positions,
        Self::TemporaryWorkers,
        Self::Assignments,
    ];

    /// Table name in the hosted database.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::WorkLocations => "work_locations",
            Self::Positions => "positions",
            Self::TemporaryWorkers => "temporary_workers",
            Self::Assignments => "assignments",
        }
    }

    /// Singular label used in user-facing messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clients => "Client",
            Self::WorkLocations => "Work location",
            Self::Positions => "Position",
            Self::TemporaryWorkers => "Worker",
            Self::Assignments => "Assignment",
        }
    }

    /// Foreign-key columns a listing may be filtered by.
    #[must_use]
    pub const fn filter_columns(self) -> &'static [&'static str] {
        match self {
            Self::Clients | Self::TemporaryWorkers => &[],
            Self::WorkLocations => &["client_id"],
            Self::Positions => &["client_id", "work_location_id"],
            Self::Assignments => &["worker_id", "position_id"],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Equality filter on a foreign-key column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    pub column: String,
    pub value: Uuid,
}

impl RecordFilter {
    pub fn new(column: impl Into<String>, value: Uuid) -> Self {
        Self {
            column: column.into(),
            value,
        }
    }
}

/// Unvalidated create/update input for a resource.
pub trait Draft: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Check every field and return the normalised draft.
    ///
    /// # Errors
    ///
    /// Returns a `VALIDATION_ERROR` listing every failing field.
    fn validate(self) -> Result<Self, ActionError>;
}

/// A stored record managed through [`ResourceService`](super::ResourceService).
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    const TABLE: Table;
    type Draft: Draft;

    fn id(&self) -> Uuid;
}
