//! Organization records

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::GridRow;
use super::Location;
use super::Value;

/// An organization users belong to.
///
/// Field names accepted by [`GridRow::value`]: `id`, `name`,
/// `contact_email`, `location`, `city`, `state`, `country`,
/// `member_count`, `created_at`, `system`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(flatten)]
    pub location: Location,
    #[serde(default)]
    pub member_count: u32,
    pub created_at: DateTime<Utc>,
    /// Built-in organizations cannot take part in bulk actions.
    #[serde(default)]
    pub system: bool,
}

impl Organization {
    /// Creates an organization with only the required fields set.
    pub fn new(id: u64, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            contact_email: None,
            location: Location::default(),
            member_count: 0,
            created_at,
            system: false,
        }
    }
}

impl GridRow for Organization {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }

    fn value(&self, field: &str) -> Value {
        match field {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "contact_email" => self.contact_email.as_deref().into(),
            "location" => self.location.label().into(),
            "city" => self.location.city.as_deref().into(),
            "state" => self.location.state.as_deref().into(),
            "country" => self.location.country.as_deref().into(),
            "member_count" => self.member_count.into(),
            "created_at" => self.created_at.into(),
            "system" => self.system.into(),
            _ => Value::Null,
        }
    }
}
