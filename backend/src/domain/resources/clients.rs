//! Client companies that order temporary staff.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Draft, Resource, Table};
use crate::domain::error::ActionError;
use crate::domain::validation::FieldValidator;

const NAME_MAX: usize = 120;

/// Stored client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Client {
    pub id: Uuid,
    #[schema(example = "Acme Logistics")]
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create/update input for [`Client`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct ClientDraft {
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Draft for ClientDraft {
    fn validate(self) -> Result<Self, ActionError> {
        let mut validator = FieldValidator::new();
        let draft = Self {
            name: validator.required_text("name", &self.name, NAME_MAX),
            contact_name: validator.optional_text(
                "contact_name",
                self.contact_name.as_deref(),
                NAME_MAX,
            ),
            email: validator.optional_email("email", self.email.as_deref()),
            phone: validator.optional_phone("phone", self.phone.as_deref()),
        };
        validator.finish()?;
        Ok(draft)
    }
}

impl Resource for Client {
    const TABLE: Table = Table::Clients;
    type Draft = ClientDraft;

    fn id(&self) -> Uuid {
        self.id
    }
}
