//! Organizations screen.

use console_lib::grid::{Alignment, Column, RowAnnotation, Tone};
use console_lib::model::Organization;
use futures::FutureExt;
use futures::future::BoxFuture;

use super::{BulkAction, ScreenEntity};
use crate::api::{ApiError, DirectoryApi};

impl ScreenEntity for Organization {
    const TITLE: &'static str = "Organizations";
    const NOUN: &'static str = "organizations";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name").sortable().width(24),
            Column::new("contact_email", "Contact").sortable(),
            Column::new("location", "Location")
                .sortable()
                .sort_key("country"),
            Column::new("member_count", "Members")
                .sortable()
                .align(Alignment::Right)
                .not_searchable(),
            Column::new("created_at", "Created")
                .sortable()
                .render(|org: &Organization| org.created_at.format("%Y-%m-%d").to_string())
                .not_searchable(),
        ]
    }

    fn is_selectable(&self) -> bool {
        !self.system
    }

    fn annotation(&self) -> Option<RowAnnotation> {
        if self.system {
            Some(RowAnnotation::tone(Tone::Muted).with_note("system"))
        } else if self.member_count == 0 {
            Some(RowAnnotation::tone(Tone::Warning).with_note("no members"))
        } else {
            None
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Id", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Contact", self.contact_email.clone().unwrap_or_default()),
            ("Location", self.location.label()),
            ("Members", self.member_count.to_string()),
            ("Created", self.created_at.format("%Y-%m-%d %H:%M").to_string()),
            ("System", if self.system { "Yes" } else { "No" }.to_string()),
        ]
    }

    fn load(api: &dyn DirectoryApi) -> BoxFuture<'_, Result<Vec<Self>, ApiError>> {
        async move { api.list_organizations().await }.boxed()
    }

    fn perform(
        api: &dyn DirectoryApi,
        action: BulkAction,
        id: u64,
    ) -> BoxFuture<'_, Result<(), ApiError>> {
        async move {
            match action {
                BulkAction::Delete => api.delete_organization(id).await,
                BulkAction::Remind => api.send_organization_reminder(id).await,
            }
        }
        .boxed()
    }
}
