//! User records

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::GridRow;
use super::Location;
use super::Value;

/// Access level of a console user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Member,
}

impl Role {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Member => "Member",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A console user.
///
/// Field names accepted by [`GridRow::value`]: `id`, `first_name`,
/// `last_name`, `name`, `email`, `organization`, `role`, `location`,
/// `city`, `state`, `country`, `last_login`, `survey_completed`,
/// `protected`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Name of the organization the user belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(flatten)]
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    /// Whether the user finished their assigned survey.
    #[serde(default)]
    pub survey_completed: bool,
    /// Protected accounts cannot take part in bulk actions.
    #[serde(default)]
    pub protected: bool,
}

impl User {
    /// Creates a member with only the required fields set.
    pub fn new(
        id: u64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            organization: None,
            role: Role::default(),
            location: Location::default(),
            last_login: None,
            survey_completed: false,
            protected: false,
        }
    }

    /// First and last name joined by a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Returns `true` if the assigned survey is still open.
    pub fn has_pending_survey(&self) -> bool {
        !self.survey_completed
    }
}

impl GridRow for User {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }

    fn value(&self, field: &str) -> Value {
        match field {
            "id" => self.id.into(),
            "first_name" => self.first_name.as_str().into(),
            "last_name" => self.last_name.as_str().into(),
            "name" => self.full_name().into(),
            "email" => self.email.as_str().into(),
            "organization" => self.organization.as_deref().into(),
            "role" => self.role.label().into(),
            "location" => self.location.label().into(),
            "city" => self.location.city.as_deref().into(),
            "state" => self.location.state.as_deref().into(),
            "country" => self.location.country.as_deref().into(),
            "last_login" => self.last_login.into(),
            "survey_completed" => self.survey_completed.into(),
            "protected" => self.protected.into(),
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_missing_optionals() {
        let user: User = serde_json::from_str(
            r#"{"id": 7, "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com", "city": "London"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Member);
        assert_eq!(user.organization, None);
        assert_eq!(user.value("location"), Value::from("London"));
        assert_eq!(user.value("organization"), Value::Null);
        assert!(user.has_pending_survey());
    }

    #[test]
    fn test_unknown_field_is_null() {
        let user = User::new(1, "Ada", "Lovelace", "ada@example.com");
        assert_eq!(user.value("nope"), Value::Null);
        assert_eq!(user.value("name"), Value::from("Ada Lovelace"));
    }
}
