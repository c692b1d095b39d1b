//! Immutable grid state and the reducers that transform it.
//!
//! Every reducer takes the current state by reference and returns the next
//! one; nothing here touches rows or callbacks.

use std::collections::HashSet;
use std::hash::Hash;

use super::Column;
use super::PageState;
use super::Selection;
use super::SortState;

/// Sort, page, filter and selection state of a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState<K: Eq + Hash> {
    /// Active sort, if any.
    pub sort: Option<SortState>,
    /// Current page position.
    pub page: PageState,
    /// Keys marked for action.
    pub selection: Selection<K>,
    /// Free-text filter query.
    pub filter: String,
}

impl<K: Clone + Eq + Hash + Ord> GridState<K> {
    /// Unsorted, unfiltered state on the first page.
    pub fn new(page: PageState) -> Self {
        Self {
            sort: None,
            page,
            selection: Selection::new(),
            filter: String::new(),
        }
    }
}

/// A change to the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction<K: Eq + Hash> {
    /// Flip one key.
    Toggle(K),
    /// Add every key given.
    SelectAll(Vec<K>),
    /// Deselect everything.
    Clear,
    /// Keep only keys in the set.
    RetainLive(HashSet<K>),
}

/// Header click on `column`.
///
/// Non-sortable columns leave the state unchanged even when their id names
/// a real field.
pub fn apply_sort<K, R>(state: &GridState<K>, column: &Column<R>) -> GridState<K>
where
    K: Clone + Eq + Hash + Ord,
{
    let mut next = state.clone();
    if column.sortable {
        next.sort = Some(SortState::clicked(state.sort.as_ref(), &column.id));
    }
    next
}

/// Moves to `page_index`, clamped to the pages `total` rows fill.
pub fn apply_page<K>(state: &GridState<K>, page_index: usize, total: usize) -> GridState<K>
where
    K: Clone + Eq + Hash + Ord,
{
    let mut next = state.clone();
    next.page.page_index = page_index.min(state.page.last_index(total));
    next
}

/// Switches page size and returns to the first page.
pub fn apply_page_size<K>(state: &GridState<K>, page_size: usize) -> GridState<K>
where
    K: Clone + Eq + Hash + Ord,
{
    let mut next = state.clone();
    next.page = PageState::new(page_size);
    next
}

/// Sets the filter query and returns to the first page.
pub fn apply_filter<K>(state: &GridState<K>, query: &str) -> GridState<K>
where
    K: Clone + Eq + Hash + Ord,
{
    let mut next = apply_dataset_change(state);
    next.filter = query.to_string();
    next
}

/// The underlying dataset changed; return to the first page so the index
/// never points past the end of a shrunk dataset.
pub fn apply_dataset_change<K>(state: &GridState<K>) -> GridState<K>
where
    K: Clone + Eq + Hash + Ord,
{
    let mut next = state.clone();
    next.page.page_index = 0;
    next
}

/// Applies a selection change.
pub fn apply_selection<K>(state: &GridState<K>, action: SelectionAction<K>) -> GridState<K>
where
    K: Clone + Eq + Hash + Ord,
{
    let mut next = state.clone();
    match action {
        SelectionAction::Toggle(key) => {
            next.selection.toggle(key);
        }
        SelectionAction::SelectAll(keys) => {
            next.selection.select_all(keys);
        }
        SelectionAction::Clear => {
            next.selection.clear();
        }
        SelectionAction::RetainLive(live) => {
            next.selection.retain_live(&live);
        }
    }
    next
}
