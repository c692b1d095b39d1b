//! Record screens.
//!
//! A [`RecordScreen`] is one grid over one entity type plus the bulk
//! actions that can be run on its selection. Everything entity specific
//! (columns, eligibility, how to load and how to act on a record) comes
//! from the [`ScreenEntity`] impl.

mod organizations;
mod users;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use console_lib::batch::BatchHooks;
use console_lib::grid::{Column, GridConfig, GridView, RowAnnotation};
use console_lib::model::GridRow;
use console_lib::{BatchError, BatchExecutor, BatchJob, BatchOutcome, Grid, Notification};
use futures::future::BoxFuture;

use crate::api::{ApiError, DirectoryApi};
use crate::settings::{GridPreferences, SettingsError, SettingsProvider};

/// A bulk action offered on a screen's selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Delete,
    Remind,
}

impl BulkAction {
    /// Verb used in job labels.
    pub fn label(self) -> &'static str {
        match self {
            BulkAction::Delete => "Delete",
            BulkAction::Remind => "Remind",
        }
    }

    /// Verb shown while the action runs.
    pub fn progress(self) -> &'static str {
        match self {
            BulkAction::Delete => "Deleting",
            BulkAction::Remind => "Reminding",
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Screen errors.
#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error("nothing is selected")]
    NothingSelected,
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A record type that can be administered on a [`RecordScreen`].
pub trait ScreenEntity: GridRow<Key = u64> {
    /// Screen heading.
    const TITLE: &'static str;

    /// Plural noun, used in job labels and settings keys.
    const NOUN: &'static str;

    fn columns() -> Vec<Column<Self>>;

    fn grid_config() -> GridConfig {
        GridConfig::default()
    }

    /// Whether the record may take part in bulk actions.
    fn is_selectable(&self) -> bool {
        true
    }

    fn annotation(&self) -> Option<RowAnnotation> {
        None
    }

    /// Label/value pairs shown when a record is opened.
    fn detail(&self) -> Vec<(&'static str, String)>;

    fn load(api: &dyn DirectoryApi) -> BoxFuture<'_, Result<Vec<Self>, ApiError>>;

    fn perform(
        api: &dyn DirectoryApi,
        action: BulkAction,
        id: u64,
    ) -> BoxFuture<'_, Result<(), ApiError>>;
}

/// One screen: a grid of `R`, the batch executor for its actions and the
/// notifications waiting to be shown.
pub struct RecordScreen<R: ScreenEntity> {
    grid: Grid<R>,
    executor: BatchExecutor,
    api: Arc<dyn DirectoryApi>,
    notifications: Vec<Notification>,
}

impl<R: ScreenEntity> RecordScreen<R> {
    /// Creates an empty screen. Call [`load`](Self::load) to fetch rows.
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        let grid = Grid::new(R::columns())
            .with_config(R::grid_config())
            .eligibility(R::is_selectable)
            .annotate(R::annotation)
            .on_row_click(|row: &R| log::info!("opened {} {}", R::NOUN, row.key()));

        Self {
            grid,
            executor: BatchExecutor::new(),
            api,
            notifications: Vec::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        R::TITLE
    }

    pub fn grid(&self) -> &Grid<R> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid<R> {
        &mut self.grid
    }

    pub fn view(&self) -> GridView<u64> {
        self.grid.view()
    }

    /// The executor running this screen's actions. Clones observe the same
    /// run.
    pub fn executor(&self) -> &BatchExecutor {
        &self.executor
    }

    /// Whether a bulk action is in flight.
    pub fn is_busy(&self) -> bool {
        self.executor().is_running()
    }

    /// Fetch the rows from the directory.
    pub async fn load(&mut self) -> Result<(), ScreenError> {
        let rows = R::load(self.api.as_ref()).await?;
        log::debug!("{}: loaded {} rows", R::NOUN, rows.len());
        self.grid.set_rows(rows);
        Ok(())
    }

    /// Detail of a record, or `None` if no row has this id.
    pub fn open(&self, id: u64) -> Option<Vec<(&'static str, String)>> {
        if !self.grid.click_row(&id) {
            return None;
        }
        self.grid.row(&id).map(R::detail)
    }

    /// Take the notifications queued since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Run `action` on every selected record.
    ///
    /// Fails with [`ScreenError::NothingSelected`] on an empty selection and
    /// with [`BatchError::Busy`] while another action is running.
    pub async fn run_action(&mut self, action: BulkAction) -> Result<BatchOutcome, ScreenError> {
        let ids = self.grid.selected_ids();
        if ids.is_empty() {
            return Err(ScreenError::NothingSelected);
        }

        let job = BatchJob::new(format!("{} {}", action.label(), R::NOUN), ids);
        let api = self.api.as_ref();
        let mut hooks = ScreenHooks {
            grid: &mut self.grid,
            api,
            notifications: &mut self.notifications,
        };

        let outcome = self
            .executor
            .run(job, |id| R::perform(api, action, id), &mut hooks)
            .await?;
        Ok(outcome)
    }

    /// Apply saved preferences. Invalid values are ignored.
    pub async fn restore_preferences(&mut self, settings: &SettingsProvider) -> Result<(), SettingsError> {
        let Some(preferences) = settings.grid_preferences(R::NOUN).await? else {
            return Ok(());
        };
        if let Some(size) = preferences.page_size
            && !self.grid.set_page_size(size)
        {
            log::warn!("{}: ignoring saved page size {}", R::NOUN, size);
        }
        self.grid.set_sort(preferences.sort);
        Ok(())
    }

    /// Save the current page size and sort.
    pub async fn save_preferences(&self, settings: &SettingsProvider) -> Result<(), SettingsError> {
        let state = self.grid.state();
        let preferences = GridPreferences {
            page_size: state.page.page_size,
            sort: state.sort.clone(),
        };
        settings.set_grid_preferences(R::NOUN, &preferences).await
    }

    /// Forget the saved preferences and return to the default layout.
    /// Returns whether any were saved.
    pub async fn reset_preferences(&mut self, settings: &SettingsProvider) -> Result<bool, SettingsError> {
        let cleared = settings.clear_grid_preferences(R::NOUN).await?;
        self.reset_layout();
        Ok(cleared)
    }

    /// Default page size, no sort.
    pub fn reset_layout(&mut self) {
        let size = self.grid.config().default_page_size;
        self.grid.set_page_size(size);
        self.grid.set_sort(None);
    }
}

/// Batch hooks of a screen: clear its grid, reload it from the directory,
/// queue the toast.
struct ScreenHooks<'a, R: ScreenEntity> {
    grid: &'a mut Grid<R>,
    api: &'a dyn DirectoryApi,
    notifications: &'a mut Vec<Notification>,
}

#[async_trait]
impl<'a, R: ScreenEntity> BatchHooks for ScreenHooks<'a, R> {
    fn clear_selection(&mut self) {
        self.grid.clear_selection();
    }

    async fn reload(&mut self) {
        match R::load(self.api).await {
            Ok(rows) => self.grid.set_rows(rows),
            Err(err) => {
                log::error!("{}: reload failed: {}", R::NOUN, err);
                self.notifications
                    .push(Notification::error(format!("Reloading {} failed: {err}", R::NOUN)));
            }
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use console_lib::model::{Organization, User};
    use console_lib::Severity;

    use super::*;
    use crate::api::{Entity, MemoryDirectory};
    use crate::settings::MemoryStore;

    async fn users_screen(directory: Arc<MemoryDirectory>) -> RecordScreen<User> {
        let mut screen = RecordScreen::<User>::new(directory);
        screen.load().await.unwrap();
        screen
    }

    #[tokio::test]
    async fn test_empty_selection_is_refused() {
        let directory = Arc::new(MemoryDirectory::seeded().unwrap());
        let mut screen = users_screen(directory).await;
        let err = screen.run_action(BulkAction::Delete).await.unwrap_err();
        assert!(matches!(err, ScreenError::NothingSelected));
    }

    #[tokio::test]
    async fn test_delete_with_one_failure() {
        let directory = Arc::new(MemoryDirectory::seeded().unwrap());
        directory.fail_on(Entity::User, 11);
        let mut screen = users_screen(Arc::clone(&directory)).await;

        for id in [10, 11, 13] {
            assert!(screen.grid_mut().toggle(&id));
        }
        let outcome = screen.run_action(BulkAction::Delete).await.unwrap();
        assert_eq!((outcome.success_count, outcome.fail_count), (2, 1));

        assert!(screen.grid().selected_ids().is_empty());
        assert_eq!(screen.grid().rows().len(), 12);
        assert!(screen.grid().row(&11).is_some());

        let notifications = screen.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].severity, Severity::Warning);
        assert!(screen.take_notifications().is_empty());
    }

    #[tokio::test]
    async fn test_protected_users_cannot_be_selected() {
        let directory = Arc::new(MemoryDirectory::seeded().unwrap());
        let mut screen = users_screen(directory).await;
        assert!(!screen.grid_mut().toggle(&1));
        screen.grid_mut().select_all();
        let selected = screen.grid().selected_ids();
        assert_eq!(selected.len(), 12);
        assert!(!selected.contains(&1));
        assert!(!selected.contains(&12));
    }

    #[tokio::test]
    async fn test_remind_skips_completed_surveys() {
        let directory = Arc::new(MemoryDirectory::seeded().unwrap());
        let mut screen = users_screen(Arc::clone(&directory)).await;
        screen.grid_mut().toggle(&2);
        screen.grid_mut().toggle(&3);

        let outcome = screen.run_action(BulkAction::Remind).await.unwrap();
        assert_eq!((outcome.success_count, outcome.fail_count), (1, 1));
        assert!(directory.was_reminded(Entity::User, 3));
        assert!(!directory.was_reminded(Entity::User, 2));
    }

    #[tokio::test]
    async fn test_failed_reload_queues_error() {
        let directory = Arc::new(MemoryDirectory::seeded().unwrap());
        let mut screen = RecordScreen::<Organization>::new(directory.clone());
        screen.load().await.unwrap();
        screen.grid_mut().toggle(&6);

        directory.set_offline(true);
        let outcome = screen.run_action(BulkAction::Delete).await.unwrap();
        assert_eq!(outcome.fail_count, 1);

        let severities: Vec<Severity> = screen
            .take_notifications()
            .iter()
            .map(|n| n.severity)
            .collect();
        assert_eq!(severities, vec![Severity::Error, Severity::Warning]);
        assert_eq!(screen.grid().rows().len(), 6);
    }

    #[tokio::test]
    async fn test_preferences_round_trip() {
        let settings = SettingsProvider::new(MemoryStore::new());
        let directory = Arc::new(MemoryDirectory::seeded().unwrap());

        let mut screen = users_screen(directory.clone()).await;
        assert!(screen.grid_mut().set_page_size(5));
        screen.grid_mut().sort_by("email");
        screen.grid_mut().sort_by("email");
        screen.save_preferences(&settings).await.unwrap();

        let mut restored = users_screen(directory).await;
        restored.restore_preferences(&settings).await.unwrap();
        assert_eq!(restored.grid().state().page.page_size, Some(5));
        assert_eq!(
            restored.grid().state().sort,
            Some(console_lib::grid::SortState::desc("email"))
        );
    }

    #[tokio::test]
    async fn test_reset_preferences_restores_defaults() {
        let settings = SettingsProvider::new(MemoryStore::new());
        let directory = Arc::new(MemoryDirectory::seeded().unwrap());
        let mut screen = users_screen(directory).await;
        let default_size = screen.grid().state().page.page_size;

        screen.grid_mut().set_page_size(5);
        screen.grid_mut().sort_by("name");
        screen.save_preferences(&settings).await.unwrap();

        assert!(screen.reset_preferences(&settings).await.unwrap());
        assert_eq!(screen.grid().state().sort, None);
        assert_eq!(screen.grid().state().page.page_size, default_size);
        assert_eq!(settings.grid_preferences("users").await.unwrap(), None);
        assert!(!screen.reset_preferences(&settings).await.unwrap());
    }

    #[tokio::test]
    async fn test_busy_while_action_runs() {
        let directory = Arc::new(
            MemoryDirectory::seeded()
                .unwrap()
                .with_latency(std::time::Duration::from_millis(20)),
        );
        let mut screen = users_screen(directory).await;
        screen.grid_mut().toggle(&3);
        screen.grid_mut().toggle(&4);
        assert!(!screen.is_busy());

        let executor = screen.executor().clone();
        let watch = async {
            let mut seen = false;
            for _ in 0..200 {
                if executor.is_running() {
                    seen = executor.state() == console_lib::batch::BatchState::Running;
                    break;
                }
                tokio::task::yield_now().await;
            }
            seen
        };
        let (outcome, seen) = tokio::join!(screen.run_action(BulkAction::Delete), watch);

        assert_eq!(outcome.unwrap().success_count, 2);
        assert!(seen);
        assert!(!screen.is_busy());
        assert_eq!(screen.executor().state(), console_lib::batch::BatchState::Idle);
    }

    #[tokio::test]
    async fn test_open_returns_detail() {
        let directory = Arc::new(MemoryDirectory::seeded().unwrap());
        let screen = users_screen(directory).await;
        let detail = screen.open(2).unwrap();
        assert!(detail.iter().any(|(label, value)| *label == "Email" && value == "ada@northwind.example"));
        assert!(screen.open(99).is_none());
    }
}
