//! Stable in-memory sorting.

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::model::GridRow;
use crate::model::Value;

/// Extracts the comparison value of a row for a sort key.
pub type ValueGetter<R> = Arc<dyn Fn(&R, &str) -> Value + Send + Sync>;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Header indicator glyph.
    pub fn indicator(self) -> &'static str {
        match self {
            Direction::Asc => "▲",
            Direction::Desc => "▼",
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    /// Id of the column being sorted.
    pub column_key: String,
    pub direction: Direction,
}

impl SortState {
    /// Ascending sort on a column.
    pub fn asc(column_key: impl Into<String>) -> Self {
        Self {
            column_key: column_key.into(),
            direction: Direction::Asc,
        }
    }

    /// Descending sort on a column.
    pub fn desc(column_key: impl Into<String>) -> Self {
        Self {
            column_key: column_key.into(),
            direction: Direction::Desc,
        }
    }

    /// The state after clicking `column_key` in the header.
    ///
    /// Clicking the active column flips the direction; clicking any other
    /// column starts over in ascending order.
    pub fn clicked(current: Option<&SortState>, column_key: &str) -> SortState {
        match current {
            Some(sort) if sort.column_key == column_key => SortState {
                column_key: sort.column_key.clone(),
                direction: sort.direction.toggled(),
            },
            _ => SortState::asc(column_key),
        }
    }
}

/// Sorts rows by `key` without touching the input.
///
/// Values come from `getter` when given, else from [`GridRow::value`], and
/// are compared with [`Value::sort_cmp`]. Each row is decorated with its
/// original position and ties fall back to that position, so equal values
/// keep their relative order in both directions. An empty `key` returns the
/// rows as given.
pub fn sort_rows<'a, R: GridRow>(
    rows: impl IntoIterator<Item = &'a R>,
    key: &str,
    direction: Direction,
    getter: Option<&ValueGetter<R>>,
) -> Vec<&'a R> {
    if key.is_empty() {
        return rows.into_iter().collect();
    }

    let mut decorated: Vec<(usize, Value, &'a R)> = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let value = match getter {
                Some(get) => get(row, key),
                None => row.value(key),
            };
            (index, value, row)
        })
        .collect();

    decorated.sort_unstable_by(|(ia, va, _), (ib, vb, _)| {
        let ord = va.sort_cmp(vb);
        let ord = match direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        };
        ord.then(ia.cmp(ib))
    });

    decorated.into_iter().map(|(_, _, row)| row).collect()
}
