//! Postal location shared by users and organizations

use serde::Deserialize;
use serde::Serialize;

/// City / state / country triple, every part optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Location {
    /// Creates a location from its parts.
    pub fn new(
        city: Option<impl Into<String>>,
        state: Option<impl Into<String>>,
        country: Option<impl Into<String>>,
    ) -> Self {
        Self {
            city: city.map(Into::into),
            state: state.map(Into::into),
            country: country.map(Into::into),
        }
    }

    /// Joins the non-empty parts with `", "`.
    ///
    /// This is the derived value location columns sort and filter on.
    pub fn label(&self) -> String {
        [&self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Returns `true` if no part is set.
    pub fn is_empty(&self) -> bool {
        self.label().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_skips_missing_parts() {
        let loc = Location::new(Some("Ghent"), None::<String>, Some("Belgium"));
        assert_eq!(loc.label(), "Ghent, Belgium");
        assert!(Location::default().is_empty());
    }
}
