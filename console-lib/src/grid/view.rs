//! Render-ready view model produced by [`Grid::view`](super::Grid::view).

use super::Alignment;
use super::CheckState;
use super::Direction;

/// Visual tone of a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Normal,
    Muted,
    Highlight,
    Warning,
}

/// Per-row style annotation returned by the annotation hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowAnnotation {
    pub tone: Tone,
    /// Short note shown alongside the row.
    pub note: Option<String>,
}

impl RowAnnotation {
    /// Annotation with a tone and no note.
    pub fn tone(tone: Tone) -> Self {
        Self { tone, note: None }
    }

    /// Attach a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub id: String,
    pub label: String,
    pub align: Alignment,
    pub width: Option<u16>,
    pub sortable: bool,
    /// Direction indicator when this column is the active sort.
    pub sorted: Option<Direction>,
}

/// One visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow<K> {
    pub key: K,
    /// Rendered cell text, one per column.
    pub cells: Vec<String>,
    pub selected: bool,
    /// Ineligible rows render a disabled checkbox.
    pub eligible: bool,
    pub annotation: Option<RowAnnotation>,
}

/// Pagination controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub page_index: usize,
    pub page_size: Option<usize>,
    pub size_options: Vec<usize>,
    pub page_count: usize,
    /// Rows matching the filter, across all pages.
    pub total_count: usize,
    /// 1-based first and last row number on this page.
    pub range: Option<(usize, usize)>,
}

impl PageInfo {
    /// Returns `true` if a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }
}

/// Everything needed to draw a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView<K> {
    pub header: Vec<HeaderCell>,
    pub rows: Vec<ViewRow<K>>,
    /// Header checkbox over every eligible, filtered row.
    pub select_all: CheckState,
    pub pagination: PageInfo,
    /// Total selected keys, including ones not on this page.
    pub selected_count: usize,
    pub filter: String,
}
