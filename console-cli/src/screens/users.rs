//! Users screen.

use console_lib::grid::{Alignment, Column, GridConfig, RowAnnotation, Tone};
use console_lib::model::User;
use futures::FutureExt;
use futures::future::BoxFuture;

use super::{BulkAction, ScreenEntity};
use crate::api::{ApiError, DirectoryApi};

const NEVER: &str = "Never";

fn last_login(user: &User) -> String {
    user.last_login
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| NEVER.to_string())
}

fn survey(user: &User) -> String {
    let label = if user.survey_completed { "Done" } else { "Pending" };
    label.to_string()
}

impl ScreenEntity for User {
    const TITLE: &'static str = "Users";
    const NOUN: &'static str = "users";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name").sortable().width(22),
            Column::new("email", "Email").sortable(),
            Column::new("organization", "Organization").sortable(),
            // Sorts by country, shows the whole address
            Column::new("location", "Location")
                .sortable()
                .sort_key("country"),
            Column::new("role", "Role").sortable().align(Alignment::Center),
            Column::new("last_login", "Last login")
                .sortable()
                .render(last_login)
                .not_searchable(),
            Column::new("survey", "Survey")
                .sortable()
                .sort_key("survey_completed")
                .render(survey)
                .align(Alignment::Center),
        ]
    }

    fn grid_config() -> GridConfig {
        GridConfig::default().with_page_sizes([5, 10, 25, 50])
    }

    fn is_selectable(&self) -> bool {
        !self.protected
    }

    fn annotation(&self) -> Option<RowAnnotation> {
        if self.protected {
            Some(RowAnnotation::tone(Tone::Muted).with_note("protected"))
        } else if self.last_login.is_none() {
            Some(RowAnnotation::tone(Tone::Warning).with_note("never signed in"))
        } else {
            None
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Id", self.id.to_string()),
            ("Name", self.full_name()),
            ("Email", self.email.clone()),
            ("Organization", self.organization.clone().unwrap_or_default()),
            ("Role", self.role.to_string()),
            ("Location", self.location.label()),
            ("Last login", last_login(self)),
            ("Survey", survey(self)),
            ("Protected", if self.protected { "Yes" } else { "No" }.to_string()),
        ]
    }

    fn load(api: &dyn DirectoryApi) -> BoxFuture<'_, Result<Vec<Self>, ApiError>> {
        async move { api.list_users().await }.boxed()
    }

    fn perform(
        api: &dyn DirectoryApi,
        action: BulkAction,
        id: u64,
    ) -> BoxFuture<'_, Result<(), ApiError>> {
        async move {
            match action {
                BulkAction::Delete => api.delete_user(id).await,
                BulkAction::Remind => api.send_user_reminder(id).await,
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use console_lib::Grid;
    use console_lib::grid::Direction;
    use console_lib::model::Location;

    use super::*;

    fn user(id: u64, country: &str, survey_completed: bool) -> User {
        let mut user = User::new(id, "First", format!("Last{id}"), format!("u{id}@example.com"));
        user.location = Location::new(Some("City"), None::<String>, Some(country));
        user.survey_completed = survey_completed;
        user
    }

    #[test]
    fn test_location_sorts_by_country() {
        let rows = vec![user(1, "Spain", false), user(2, "Austria", true), user(3, "Peru", false)];
        let mut grid = Grid::new(User::columns()).with_rows(rows);
        grid.sort_by("location");
        let order: Vec<u64> = grid.view().rows.iter().map(|r| r.key).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_survey_column_renders_and_sorts() {
        let rows = vec![user(1, "Spain", true), user(2, "Spain", false)];
        let mut grid = Grid::new(User::columns()).with_rows(rows);
        grid.sort_by("survey");
        let view = grid.view();
        assert_eq!(view.header[6].sorted, Some(Direction::Asc));
        assert_eq!(view.rows[0].cells[6], "Pending");
        assert_eq!(view.rows[1].cells[6], "Done");
    }

    #[test]
    fn test_annotations() {
        let mut protected = user(1, "Spain", true);
        protected.protected = true;
        assert_eq!(protected.annotation().unwrap().tone, Tone::Muted);
        assert!(!protected.is_selectable());

        let fresh = user(2, "Spain", true);
        assert_eq!(fresh.annotation().unwrap().note.as_deref(), Some("never signed in"));
    }
}
