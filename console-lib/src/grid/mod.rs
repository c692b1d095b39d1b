//! Sortable, filterable, paginated and selectable record grid.
//!
//! The pieces are pure and usable on their own:
//!
//! - [`sort_rows`] orders rows stably by a field.
//! - [`filter_rows`] keeps rows matching a text query.
//! - [`paginate`] cuts the visible window out of an ordered sequence.
//! - [`Selection`] tracks keys marked for action.
//! - [`GridState`] and the `apply_*` reducers describe every interaction as
//!   a state transition.
//!
//! [`Grid`] composes them with the caller's rows, columns and hooks and
//! produces a [`GridView`] ready to draw.
//!
//! # Example
//!
//! ```
//! use console_lib::grid::{Column, Grid};
//! use console_lib::model::User;
//!
//! let rows = vec![
//!     User::new(1, "Grace", "Hopper", "grace@example.com"),
//!     User::new(2, "Ada", "Lovelace", "ada@example.com"),
//! ];
//! let mut grid = Grid::new(vec![Column::new("name", "Name").sortable()])
//!     .with_rows(rows)
//!     .eligibility(|user: &User| !user.protected);
//!
//! grid.sort_by("name");
//! grid.toggle(&1);
//!
//! let view = grid.view();
//! assert_eq!(view.rows[0].key, 2);
//! assert!(view.rows[1].selected);
//! ```

mod column;
mod config;
mod filter;
mod page;
mod selection;
mod sort;
mod state;
mod view;

pub use column::*;
pub use config::*;
pub use filter::*;
pub use page::*;
pub use selection::*;
pub use sort::*;
pub use state::*;
pub use view::*;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::model::GridRow;

/// Overrides [`GridRow::key`] as the row identity.
pub type IdAccessor<R> = Arc<dyn Fn(&R) -> <R as GridRow>::Key + Send + Sync>;

/// Decides whether a row may be selected.
pub type Eligibility<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// Per-row style hook.
pub type Annotator<R> = Arc<dyn Fn(&R) -> Option<RowAnnotation> + Send + Sync>;

/// Called with the full selection whenever it changes.
pub type SelectionListener<K> = Box<dyn Fn(&[K]) + Send + Sync>;

/// Called with the row a user opened.
pub type RowClickListener<R> = Box<dyn Fn(&R) + Send + Sync>;

/// A record grid.
///
/// Holds the rows it was given, the column descriptors, the caller's hooks
/// and a [`GridState`]. Interaction methods run the matching reducer and
/// fire the selection listener when the selection actually changed.
pub struct Grid<R: GridRow> {
    rows: Vec<R>,
    columns: Vec<Column<R>>,
    config: GridConfig,
    state: GridState<R::Key>,
    id_accessor: Option<IdAccessor<R>>,
    value_getter: Option<ValueGetter<R>>,
    eligibility: Option<Eligibility<R>>,
    annotator: Option<Annotator<R>>,
    on_selection_change: Option<SelectionListener<R::Key>>,
    on_row_click: Option<RowClickListener<R>>,
}

impl<R: GridRow> Grid<R> {
    /// Create an empty grid with the default configuration.
    pub fn new(columns: Vec<Column<R>>) -> Self {
        let config = GridConfig::default();
        Self {
            rows: Vec::new(),
            columns,
            state: GridState::new(config.initial_page()),
            config,
            id_accessor: None,
            value_getter: None,
            eligibility: None,
            annotator: None,
            on_selection_change: None,
            on_row_click: None,
        }
    }

    /// Replace the configuration. Resets the page state.
    pub fn with_config(mut self, config: GridConfig) -> Self {
        self.state.page = config.initial_page();
        self.config = config;
        self
    }

    /// Set the initial rows.
    pub fn with_rows(mut self, rows: Vec<R>) -> Self {
        self.rows = rows;
        self
    }

    /// Use a custom row identity instead of [`GridRow::key`].
    pub fn id_accessor(mut self, accessor: impl Fn(&R) -> R::Key + Send + Sync + 'static) -> Self {
        self.id_accessor = Some(Arc::new(accessor));
        self
    }

    /// Use a custom sort value extractor instead of [`GridRow::value`].
    pub fn value_getter(
        mut self,
        getter: impl Fn(&R, &str) -> crate::model::Value + Send + Sync + 'static,
    ) -> Self {
        self.value_getter = Some(Arc::new(getter));
        self
    }

    /// Restrict which rows may be selected.
    pub fn eligibility(mut self, predicate: impl Fn(&R) -> bool + Send + Sync + 'static) -> Self {
        self.eligibility = Some(Arc::new(predicate));
        self
    }

    /// Attach a per-row annotation hook.
    pub fn annotate(
        mut self,
        annotator: impl Fn(&R) -> Option<RowAnnotation> + Send + Sync + 'static,
    ) -> Self {
        self.annotator = Some(Arc::new(annotator));
        self
    }

    /// Listen for selection changes.
    pub fn on_selection_change(mut self, listener: impl Fn(&[R::Key]) + Send + Sync + 'static) -> Self {
        self.on_selection_change = Some(Box::new(listener));
        self
    }

    /// Listen for row clicks.
    pub fn on_row_click(mut self, listener: impl Fn(&R) + Send + Sync + 'static) -> Self {
        self.on_row_click = Some(Box::new(listener));
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current state.
    pub fn state(&self) -> &GridState<R::Key> {
        &self.state
    }

    /// Configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Column definitions.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// All rows, unfiltered and in source order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Find a row by key.
    pub fn row(&self, key: &R::Key) -> Option<&R> {
        self.rows.iter().find(|row| &self.key_of(row) == key)
    }

    /// Identity of a row.
    pub fn key_of(&self, row: &R) -> R::Key {
        match &self.id_accessor {
            Some(accessor) => accessor(row),
            None => row.key(),
        }
    }

    /// Whether a row may be selected.
    pub fn is_eligible(&self, row: &R) -> bool {
        self.eligibility.as_ref().is_none_or(|predicate| predicate(row))
    }

    /// Rows matching the filter, in source order.
    pub fn filtered(&self) -> Vec<&R> {
        filter_rows(&self.rows, &self.state.filter, &self.columns)
    }

    /// Rows matching the filter, in display order.
    pub fn ordered(&self) -> Vec<&R> {
        let filtered = self.filtered();
        match self.active_sort_key() {
            Some((key, direction)) => {
                sort_rows(filtered, key, direction, self.value_getter.as_ref())
            }
            None => filtered,
        }
    }

    fn active_sort_key(&self) -> Option<(&str, Direction)> {
        let sort = self.state.sort.as_ref()?;
        let column = self
            .columns
            .iter()
            .find(|column| column.id == sort.column_key && column.sortable)?;
        Some((column.effective_sort_key(), sort.direction))
    }

    /// Keys of eligible rows matching the filter, on every page.
    pub fn eligible_keys(&self) -> Vec<R::Key> {
        self.filtered()
            .into_iter()
            .filter(|row| self.is_eligible(row))
            .map(|row| self.key_of(row))
            .collect()
    }

    /// Selected keys in ascending order.
    pub fn selected_ids(&self) -> Vec<R::Key> {
        self.state.selection.selected()
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &R::Key) -> bool {
        self.state.selection.is_selected(key)
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Replace the rows, e.g. after a reload.
    ///
    /// Returns to the first page. The selection is kept as is unless
    /// [`GridConfig::prune_on_reload`] is set.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.state = apply_dataset_change(&self.state);
        log::debug!("grid reloaded with {} rows", self.rows.len());

        if self.config.prune_on_reload {
            let live: HashSet<R::Key> = self.rows.iter().map(|row| self.key_of(row)).collect();
            let next = apply_selection(&self.state, SelectionAction::RetainLive(live));
            self.commit(next);
        }
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Header click on a column.
    ///
    /// Returns `false`, leaving the sort as it was, for unknown and
    /// non-sortable columns.
    pub fn sort_by(&mut self, column_id: &str) -> bool {
        let Some(column) = self
            .columns
            .iter()
            .find(|column| column.id == column_id && column.sortable)
        else {
            return false;
        };
        self.state = apply_sort(&self.state, column);
        true
    }

    /// Restore a sort, e.g. from saved preferences.
    ///
    /// Ignored unless it names a sortable column.
    pub fn set_sort(&mut self, sort: Option<SortState>) {
        let valid = sort.as_ref().is_none_or(|sort| {
            self.columns
                .iter()
                .any(|column| column.id == sort.column_key && column.sortable)
        });
        if valid {
            self.state.sort = sort;
        }
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Go to a page, clamped to the available pages.
    pub fn set_page(&mut self, page_index: usize) {
        let total = self.filtered().len();
        self.state = apply_page(&self.state, page_index, total);
    }

    /// Go to the next page, if any.
    pub fn next_page(&mut self) {
        self.set_page(self.state.page.page_index.saturating_add(1));
    }

    /// Go to the previous page, if any.
    pub fn previous_page(&mut self) {
        self.set_page(self.state.page.page_index.saturating_sub(1));
    }

    /// Change the page size. Returns `false` if the size is not one of the
    /// configured options or pagination is disabled.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if !self.config.paginate || !self.config.accepts_page_size(page_size) {
            return false;
        }
        self.state = apply_page_size(&self.state, page_size);
        true
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Set the free-text filter. Returns to the first page.
    pub fn set_filter(&mut self, query: &str) {
        self.state = apply_filter(&self.state, query);
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggle a row's checkbox.
    ///
    /// Rows that exist but are ineligible have a disabled checkbox, so this
    /// returns `false` for them without touching the selection. Keys with no
    /// row (stale selections) can still be toggled off.
    pub fn toggle(&mut self, key: &R::Key) -> bool {
        if let Some(row) = self.row(key)
            && !self.is_eligible(row)
        {
            return false;
        }
        let next = apply_selection(&self.state, SelectionAction::Toggle(key.clone()));
        self.commit(next);
        true
    }

    /// Select every eligible row matching the filter, on every page.
    pub fn select_all(&mut self) {
        let keys = self.eligible_keys();
        let next = apply_selection(&self.state, SelectionAction::SelectAll(keys));
        self.commit(next);
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        let next = apply_selection(&self.state, SelectionAction::Clear);
        self.commit(next);
    }

    /// Header checkbox click: clears when everything is checked, otherwise
    /// selects all.
    pub fn toggle_all(&mut self) {
        if self.check_state() == CheckState::Checked {
            self.clear_selection();
        } else {
            self.select_all();
        }
    }

    /// Tri-state of the header checkbox.
    pub fn check_state(&self) -> CheckState {
        let eligible = self.eligible_keys();
        self.state.selection.check_state(&eligible)
    }

    fn commit(&mut self, next: GridState<R::Key>) {
        let changed = next.selection != self.state.selection;
        self.state = next;
        if changed {
            let selected = self.state.selection.selected();
            log::debug!("selection changed: {} selected", selected.len());
            if let Some(listener) = &self.on_selection_change {
                listener(&selected);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Row click. Returns `false` if no row has this key.
    pub fn click_row(&self, key: &R::Key) -> bool {
        match self.row(key) {
            Some(row) => {
                if let Some(listener) = &self.on_row_click {
                    listener(row);
                }
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Build the render-ready view of the current page.
    pub fn view(&self) -> GridView<R::Key> {
        let ordered = self.ordered();
        let eligible: Vec<R::Key> = ordered
            .iter()
            .filter(|row| self.is_eligible(row))
            .map(|row| self.key_of(row))
            .collect();
        let select_all = self.state.selection.check_state(&eligible);

        let page = if self.config.paginate {
            self.state.page
        } else {
            PageState::unbounded()
        };
        let window = paginate(ordered, &page);
        let total_count = window.total_count;

        let rows = window
            .rows
            .into_iter()
            .map(|row| {
                let key = self.key_of(row);
                ViewRow {
                    cells: self.columns.iter().map(|column| column.cell(row)).collect(),
                    selected: self.state.selection.is_selected(&key),
                    eligible: self.is_eligible(row),
                    annotation: self.annotator.as_ref().and_then(|annotate| annotate(row)),
                    key,
                }
            })
            .collect();

        let range = page.range(total_count);
        let pagination = PageInfo {
            page_index: page.page_index,
            page_size: page.page_size,
            size_options: self.config.page_size_options.clone(),
            page_count: page_count(total_count, page.page_size),
            total_count,
            range: (!range.is_empty()).then(|| (range.start + 1, range.end)),
        };

        let header = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                id: column.id.clone(),
                label: column.label.clone(),
                align: column.align,
                width: column.width,
                sortable: column.sortable,
                sorted: self
                    .state
                    .sort
                    .as_ref()
                    .filter(|sort| column.sortable && sort.column_key == column.id)
                    .map(|sort| sort.direction),
            })
            .collect();

        GridView {
            header,
            rows,
            select_all,
            pagination,
            selected_count: self.state.selection.len(),
            filter: self.state.filter.clone(),
        }
    }
}

impl<R: GridRow> fmt::Debug for Grid<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns)
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::model::User;

    fn users(n: u64) -> Vec<User> {
        (1..=n)
            .map(|id| User::new(id, format!("User{id}"), "Test", format!("u{id}@example.com")))
            .collect()
    }

    fn columns() -> Vec<Column<User>> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("email", "Email"),
        ]
    }

    #[test]
    fn test_toggle_refuses_ineligible_rows() {
        let mut grid = Grid::new(columns())
            .with_rows(users(3))
            .eligibility(|user: &User| user.id != 3);
        assert!(!grid.toggle(&3));
        assert!(grid.toggle(&2));
        assert_eq!(grid.selected_ids(), vec![2]);
    }

    #[test]
    fn test_stale_keys_can_be_toggled_off() {
        let mut grid = Grid::new(columns()).with_rows(users(3));
        grid.toggle(&3);
        grid.set_rows(users(2));
        assert_eq!(grid.selected_ids(), vec![3]);
        assert!(grid.toggle(&3));
        assert!(grid.selected_ids().is_empty());
    }

    #[test]
    fn test_prune_on_reload() {
        let mut grid = Grid::new(columns())
            .with_config(GridConfig::default().prune_on_reload(true))
            .with_rows(users(3));
        grid.select_all();
        grid.set_rows(users(2));
        assert_eq!(grid.selected_ids(), vec![1, 2]);
    }

    #[test]
    fn test_listener_fires_only_on_change() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&calls);
        let mut grid = Grid::new(columns())
            .with_rows(users(2))
            .on_selection_change(move |ids: &[u64]| seen.lock().unwrap().push(ids.to_vec()));

        grid.toggle(&1);
        grid.select_all();
        grid.select_all();
        grid.clear_selection();
        grid.clear_selection();

        let calls = calls.lock().unwrap();
        assert_eq!(*calls, vec![vec![1], vec![1, 2], vec![]]);
    }

    #[test]
    fn test_click_row_reports_row() {
        let clicked = Arc::new(Mutex::new(None));
        let seen = Arc::clone(&clicked);
        let grid = Grid::new(columns())
            .with_rows(users(2))
            .on_row_click(move |user: &User| *seen.lock().unwrap() = Some(user.id));
        assert!(grid.click_row(&2));
        assert!(!grid.click_row(&9));
        assert_eq!(*clicked.lock().unwrap(), Some(2));
    }

    #[test]
    fn test_page_size_must_be_an_option() {
        let mut grid = Grid::new(columns()).with_rows(users(30));
        grid.set_page(2);
        assert!(!grid.set_page_size(7));
        assert_eq!(grid.state().page.page_index, 2);
        assert!(grid.set_page_size(25));
        assert_eq!(grid.state().page.page_index, 0);
    }

    #[test]
    fn test_unpaginated_view_shows_everything() {
        let grid = Grid::new(columns())
            .with_config(GridConfig::default().unpaginated())
            .with_rows(users(30));
        let view = grid.view();
        assert_eq!(view.rows.len(), 30);
        assert_eq!(view.pagination.page_count, 1);
        assert_eq!(view.pagination.range, Some((1, 30)));
    }

    #[test]
    fn test_custom_id_accessor() {
        let mut grid = Grid::new(columns())
            .with_rows(users(3))
            .id_accessor(|user: &User| user.id * 100);
        assert!(grid.toggle(&200));
        assert_eq!(grid.view().rows[1].key, 200);
        assert!(grid.view().rows[1].selected);
    }

    #[test]
    fn test_sort_by_reports_whether_it_applied() {
        let mut grid = Grid::new(columns()).with_rows(users(3));
        assert!(grid.sort_by("name"));
        let active = grid.state().sort.clone();

        assert!(!grid.sort_by("bogus"));
        assert!(!grid.sort_by("email"));
        assert_eq!(grid.state().sort, active);
    }
}
