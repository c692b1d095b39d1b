//! Grid configuration

use super::PageState;

/// Configuration for a [`Grid`](super::Grid).
///
/// # Example
///
/// ```
/// use console_lib::grid::GridConfig;
///
/// let config = GridConfig::default()
///     .with_page_sizes([10, 50, 100])
///     .with_default_page_size(50);
/// assert!(config.accepts_page_size(100));
/// assert!(!config.accepts_page_size(25));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Page sizes a user may pick from.
    ///
    /// Default: 5, 10, 25
    pub page_size_options: Vec<usize>,

    /// Page size a fresh grid starts with.
    ///
    /// Default: 10
    pub default_page_size: usize,

    /// Whether the grid windows its rows at all.
    ///
    /// Default: true
    pub paginate: bool,

    /// Drop selected keys that are no longer present after `set_rows`.
    ///
    /// Default: false (stale keys stay selected)
    pub prune_on_reload: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size_options: vec![5, 10, 25],
            default_page_size: 10,
            paginate: true,
            prune_on_reload: false,
        }
    }
}

impl GridConfig {
    /// Creates a new grid config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size options. Zero sizes are ignored.
    pub fn with_page_sizes(mut self, sizes: impl IntoIterator<Item = usize>) -> Self {
        self.page_size_options = sizes.into_iter().filter(|size| *size > 0).collect();
        self
    }

    /// Sets the starting page size.
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Disables pagination.
    pub fn unpaginated(mut self) -> Self {
        self.paginate = false;
        self
    }

    /// Enables or disables selection pruning on reload.
    pub fn prune_on_reload(mut self, prune: bool) -> Self {
        self.prune_on_reload = prune;
        self
    }

    /// Returns `true` if `size` is one of the configured options.
    pub fn accepts_page_size(&self, size: usize) -> bool {
        self.page_size_options.contains(&size)
    }

    /// Page state a fresh grid starts in.
    pub fn initial_page(&self) -> PageState {
        if self.paginate {
            PageState::new(self.default_page_size)
        } else {
            PageState::unbounded()
        }
    }
}
