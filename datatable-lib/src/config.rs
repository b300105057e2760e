//! Table configuration

use crate::selection::SelectionMode;

/// Configuration for a [`TableEngine`](crate::TableEngine).
///
/// Controls the initial page size, the page-number control and which
/// interactive features are enabled.
///
/// # Example
///
/// ```
/// use datatable_lib::TableConfig;
/// use datatable_lib::selection::SelectionMode;
///
/// let config = TableConfig::default()
///     .with_page_size(25)
///     .with_selection_mode(SelectionMode::Single)
///     .with_sorting(false);
/// ```
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Initial rows per page.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Page sizes offered to the user.
    ///
    /// Default: 5, 10, 25, 50
    pub page_size_options: Vec<usize>,

    /// Number of page buttons in the pagination control.
    ///
    /// Default: 7
    pub max_visible_pages: usize,

    /// Whether `set_sort` changes the ordering.
    pub enable_sorting: bool,

    /// Whether column filters apply.
    pub enable_filtering: bool,

    /// Whether the global search applies.
    pub enable_search: bool,

    /// Whether rows are split into pages. When off, one page holds every row.
    pub enable_pagination: bool,

    /// Row selection mode.
    ///
    /// Default: `Multi`
    pub selection_mode: SelectionMode,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_size_options: vec![5, 10, 25, 50],
            max_visible_pages: 7,
            enable_sorting: true,
            enable_filtering: true,
            enable_search: true,
            enable_pagination: true,
            selection_mode: SelectionMode::Multi,
        }
    }
}

impl TableConfig {
    /// Creates a new table config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial page size. Zero is raised to 1.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the page sizes offered to the user.
    pub fn with_page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    /// Sets the number of page buttons in the pagination control.
    pub fn with_max_visible_pages(mut self, max: usize) -> Self {
        self.max_visible_pages = max.max(1);
        self
    }

    /// Enables or disables sorting.
    pub fn with_sorting(mut self, enabled: bool) -> Self {
        self.enable_sorting = enabled;
        self
    }

    /// Enables or disables column filters.
    pub fn with_filtering(mut self, enabled: bool) -> Self {
        self.enable_filtering = enabled;
        self
    }

    /// Enables or disables the global search.
    pub fn with_search(mut self, enabled: bool) -> Self {
        self.enable_search = enabled;
        self
    }

    /// Enables or disables pagination.
    pub fn with_pagination(mut self, enabled: bool) -> Self {
        self.enable_pagination = enabled;
        self
    }

    /// Sets the selection mode.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// A read-only table: no sorting, filtering, search or selection.
    pub fn static_table() -> Self {
        Self {
            enable_sorting: false,
            enable_filtering: false,
            enable_search: false,
            selection_mode: SelectionMode::None,
            ..Self::default()
        }
    }
}
