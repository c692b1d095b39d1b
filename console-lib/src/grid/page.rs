//! Client-side pagination window.

/// Current page position.
///
/// `page_size` of `None` disables pagination: the window is the whole
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page, or `None` when pagination is disabled.
    pub page_size: Option<usize>,
}

impl PageState {
    /// First page with the given size.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: Some(page_size).filter(|size| *size > 0),
        }
    }

    /// No pagination.
    pub fn unbounded() -> Self {
        Self {
            page_index: 0,
            page_size: None,
        }
    }

    /// Returns `true` if pagination is enabled.
    pub fn is_paginated(&self) -> bool {
        self.page_size.is_some()
    }

    /// Row range of this page within `total` rows.
    pub fn range(&self, total: usize) -> std::ops::Range<usize> {
        match self.page_size {
            Some(size) => {
                let start = self.page_index.saturating_mul(size).min(total);
                let end = start.saturating_add(size).min(total);
                start..end
            }
            None => 0..total,
        }
    }

    /// Index of the last page holding any of `total` rows.
    pub fn last_index(&self, total: usize) -> usize {
        page_count(total, self.page_size).saturating_sub(1)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(10)
    }
}

/// The visible slice of an ordered sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Window<'a, R> {
    /// Rows on the current page.
    pub rows: Vec<&'a R>,
    /// Length of the whole sequence before windowing.
    pub total_count: usize,
}

/// Cuts the current page out of `ordered`.
///
/// `total_count` is always the full length of `ordered`. A page index past
/// the end yields an empty window.
pub fn paginate<'a, R>(ordered: Vec<&'a R>, page: &PageState) -> Window<'a, R> {
    let total_count = ordered.len();
    let range = page.range(total_count);
    let rows = ordered
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .collect();
    Window { rows, total_count }
}

/// Number of pages needed for `total` rows. Zero when there are no rows.
pub fn page_count(total: usize, page_size: Option<usize>) -> usize {
    match page_size {
        Some(size) if size > 0 => total.div_ceil(size),
        _ => usize::from(total > 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(index: usize, size: usize) -> PageState {
        PageState {
            page_index: index,
            page_size: Some(size),
        }
    }

    #[test]
    fn test_window_slices() {
        let data = [1, 2, 3, 4, 5];
        let ordered: Vec<&i32> = data.iter().collect();

        let first = paginate(ordered.clone(), &page(0, 2));
        assert_eq!(first.rows, vec![&1, &2]);
        assert_eq!(first.total_count, 5);

        let last = paginate(ordered.clone(), &page(2, 2));
        assert_eq!(last.rows, vec![&5]);

        let past_end = paginate(ordered, &page(9, 2));
        assert!(past_end.rows.is_empty());
        assert_eq!(past_end.total_count, 5);
    }

    #[test]
    fn test_unbounded_returns_everything() {
        let data = [1, 2, 3];
        let window = paginate(data.iter().collect(), &PageState::unbounded());
        assert_eq!(window.rows.len(), 3);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, Some(10)), 0);
        assert_eq!(page_count(10, Some(10)), 1);
        assert_eq!(page_count(11, Some(10)), 2);
        assert_eq!(page_count(4, None), 1);
        assert_eq!(PageState::new(0), PageState::unbounded());
    }
}
