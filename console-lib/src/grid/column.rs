//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use crate::model::GridRow;

/// Renders the display text of a cell.
pub type CellRenderer<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Column configuration.
///
/// `id` keys both data access and column identity. `sort_key` overrides
/// `id` for sort comparisons, which lets a column sort on a derived value.
/// Column ids must be unique within a grid.
///
/// # Examples
///
/// ```
/// use console_lib::grid::{Alignment, Column};
/// use console_lib::model::User;
///
/// let columns: Vec<Column<User>> = vec![
///     Column::new("name", "Name").sortable(),
///     Column::new("address", "Location").sortable().sort_key("location"),
///     Column::new("role", "Role").align(Alignment::Center).width(10),
/// ];
/// assert_eq!(columns[1].effective_sort_key(), "location");
/// ```
pub struct Column<R> {
    /// Field the column reads.
    pub id: String,
    /// Header text.
    pub label: String,
    /// Whether header interaction may sort by this column.
    pub sortable: bool,
    /// Field to sort on instead of `id`.
    pub sort_key: Option<String>,
    /// Custom cell renderer; defaults to the field value's display text.
    pub render: Option<CellRenderer<R>>,
    /// Horizontal alignment.
    pub align: Alignment,
    /// Preferred width in characters.
    pub width: Option<u16>,
    /// Whether the text filter looks at this column.
    pub searchable: bool,
}

impl<R> Column<R> {
    /// Create a non-sortable, searchable, left-aligned column.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            sortable: false,
            sort_key: None,
            render: None,
            align: Alignment::Left,
            width: None,
            searchable: true,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sort on a different field than the one displayed.
    pub fn sort_key(mut self, key: impl Into<String>) -> Self {
        self.sort_key = Some(key.into());
        self
    }

    /// Set a custom cell renderer.
    pub fn render(mut self, render: impl Fn(&R) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set the preferred width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Exclude the column from text filtering.
    pub fn not_searchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    /// The field sort comparisons read.
    pub fn effective_sort_key(&self) -> &str {
        self.sort_key.as_deref().unwrap_or(&self.id)
    }
}

impl<R: GridRow> Column<R> {
    /// Display text of this column for a row.
    pub fn cell(&self, row: &R) -> String {
        match &self.render {
            Some(render) => render(row),
            None => row.value(&self.id).to_string(),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            sort_key: self.sort_key.clone(),
            render: self.render.clone(),
            align: self.align,
            width: self.width,
            searchable: self.searchable,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("sort_key", &self.sort_key)
            .field("render", &self.render.is_some())
            .field("align", &self.align)
            .field("width", &self.width)
            .field("searchable", &self.searchable)
            .finish()
    }
}
