//! The table engine: filter, sort, paginate and select over a row collection.

use std::collections::{HashMap, HashSet};

use log::{debug, trace, warn};
use serde::Serialize;

use crate::config::TableConfig;
use crate::error::{Result, TableError};
use crate::model::{Column, Row, RowId};
use crate::query::{
    self, ColumnFilter, Page, PageItem, PageState, PageSummary, SortState, filter_indices,
    sort_indices,
};
use crate::selection::{CheckState, Selection};

/// Read-only projection of the engine state for a rendering layer.
///
/// Borrowed from the engine; take a new view after every mutation.
#[derive(Debug, Clone, Serialize)]
pub struct TableView<'a> {
    /// Rows on the current page, in display order.
    pub rows: Vec<&'a Row>,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Number of rows passing search and filters.
    pub total_filtered: usize,
    /// Current 1-based page.
    pub current_page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Active sort, if any.
    pub sort: Option<&'a SortState>,
    /// Selected row ids, in collection order.
    pub selected_ids: Vec<&'a RowId>,
    /// Zero-based index of the first row on the page within the filtered rows.
    pub start_index: usize,
    /// Zero-based index one past the last row on the page.
    pub end_index: usize,
}

impl TableView<'_> {
    /// "Showing X to Y of Z results" summary for this page.
    pub fn summary(&self) -> PageSummary {
        PageSummary::new(self.start_index, self.end_index, self.total_filtered)
    }

    /// Returns `true` if no row passed search and filters.
    pub fn is_empty(&self) -> bool {
        self.total_filtered == 0
    }
}

/// Client-side table engine.
///
/// `TableEngine` owns a row collection and its column descriptors and keeps:
/// - a global search string and per-column filters,
/// - a single-column sort,
/// - the current page and page size,
/// - the set of selected row ids.
///
/// Every state change re-runs the `filter -> sort` stages and caches the
/// resulting row order, so reads and page changes never re-filter. The
/// current page is clamped into range after each recompute.
///
/// # Example
///
/// ```
/// use datatable_lib::TableEngine;
/// use datatable_lib::model::{Column, Row};
///
/// let columns = vec![
///     Column::new("name", "Name").sortable().filterable(),
///     Column::new("role", "Role"),
/// ];
/// let rows = vec![
///     Row::with_id(1).set("name", "Phoenix Baker").set("role", "Engineer"),
///     Row::with_id(2).set("name", "Olivia Rhye").set("role", "Designer"),
/// ];
///
/// let mut table = TableEngine::new(columns, rows)?;
/// table.set_sort("name")?;
/// table.set_global_search("rhye");
///
/// let view = table.view();
/// assert_eq!(view.total_filtered, 1);
/// assert_eq!(view.rows[0].value("name").to_string(), "Olivia Rhye");
/// # Ok::<(), datatable_lib::error::TableError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TableEngine {
    config: TableConfig,
    columns: Vec<Column>,
    rows: Vec<Row>,
    /// Row ids, parallel to `rows`.
    ids: Vec<RowId>,
    /// Row id -> position in `rows`.
    positions: HashMap<RowId, usize>,
    global_search: String,
    column_filters: HashMap<String, ColumnFilter>,
    sort: Option<SortState>,
    page: PageState,
    selection: Selection,
    /// Positions in `rows` that pass filtering, in sorted order.
    ordered: Vec<usize>,
}

impl TableEngine {
    /// Create an engine with the default configuration.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Result<Self> {
        Self::with_config(columns, rows, TableConfig::default())
    }

    /// Create an engine with an explicit configuration.
    ///
    /// Fails if two columns share a key, or if any row lacks an `id` or
    /// repeats another row's `id`.
    pub fn with_config(columns: Vec<Column>, rows: Vec<Row>, config: TableConfig) -> Result<Self> {
        validate_columns(&columns)?;
        let (ids, positions) = index_rows(&rows)?;

        let mut engine = Self {
            page: PageState::new(config.page_size),
            selection: Selection::new(config.selection_mode),
            config,
            columns,
            rows,
            ids,
            positions,
            global_search: String::new(),
            column_filters: HashMap::new(),
            sort: None,
            ordered: Vec::new(),
        };
        engine.recompute();
        Ok(engine)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns the column descriptors.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column with the given key.
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Returns the full row collection, unfiltered.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the row with the given id.
    pub fn row(&self, id: &RowId) -> Option<&Row> {
        self.positions.get(id).map(|&i| &self.rows[i])
    }

    /// Returns the global search text.
    pub fn global_search(&self) -> &str {
        &self.global_search
    }

    /// Returns the filter on a column, if one is active.
    pub fn column_filter(&self, key: &str) -> Option<&ColumnFilter> {
        self.column_filters.get(key)
    }

    /// Returns the active sort.
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Returns the current 1-based page.
    pub fn current_page(&self) -> usize {
        self.page.current_page
    }

    /// Returns the configured rows per page.
    pub fn page_size(&self) -> usize {
        self.page.page_size
    }

    /// Returns the number of rows passing search and filters.
    pub fn total_filtered(&self) -> usize {
        self.ordered.len()
    }

    /// Returns the number of pages (at least 1).
    pub fn total_pages(&self) -> usize {
        query::total_pages(self.ordered.len(), self.effective_page_size())
    }

    /// Returns the filtered rows in display order, across all pages.
    pub fn filtered_rows(&self) -> Vec<&Row> {
        self.ordered.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Returns the rows on the current page, in display order.
    pub fn page_rows(&self) -> Vec<&Row> {
        self.current_slice().iter().map(|&i| &self.rows[i]).collect()
    }

    /// Returns the ids on the current page, in display order.
    pub fn page_ids(&self) -> Vec<&RowId> {
        self.current_slice().iter().map(|&i| &self.ids[i]).collect()
    }

    /// Builds the read-only projection for the current state.
    pub fn view(&self) -> TableView<'_> {
        let page = self.current_page_window();
        TableView {
            rows: page.rows.iter().map(|&i| &self.rows[i]).collect(),
            total_pages: page.total_pages,
            total_filtered: self.ordered.len(),
            current_page: page.page,
            page_size: self.page.page_size,
            sort: self.sort.as_ref(),
            selected_ids: self.selected_ids(),
            start_index: page.start_index,
            end_index: page.end_index,
        }
    }

    /// "Showing X to Y of Z results" summary for the current page.
    pub fn page_summary(&self) -> PageSummary {
        let page = self.current_page_window();
        PageSummary::new(page.start_index, page.end_index, self.ordered.len())
    }

    /// Page numbers for the pagination control around the current page.
    pub fn visible_pages(&self) -> Vec<PageItem> {
        query::visible_pages(
            self.page.current_page,
            self.total_pages(),
            self.config.max_visible_pages,
        )
    }

    /// Choices for a column's filter control.
    pub fn filter_options(&self, key: &str) -> Result<Vec<String>> {
        let column = self.lookup(key)?;
        Ok(query::filter_options(column, &self.rows))
    }

    /// Display string for one cell, using the column's formatter if set.
    pub fn display_value(&self, row: &Row, key: &str) -> Result<String> {
        Ok(self.lookup(key)?.display(row))
    }

    // =========================================================================
    // Search and filters
    // =========================================================================

    /// Sets the global search text. An empty string disables the search.
    pub fn set_global_search(&mut self, text: impl Into<String>) {
        if !self.config.enable_search {
            debug!("Global search ignored: search is disabled");
            return;
        }
        let text = text.into();
        if text == self.global_search {
            return;
        }
        self.global_search = text;
        self.recompute();
    }

    /// Sets the filter on a filterable column.
    ///
    /// A no-op filter (empty text, or the `"all"` select entry) removes any
    /// existing filter on the column.
    pub fn set_column_filter(&mut self, key: &str, filter: impl Into<ColumnFilter>) -> Result<()> {
        let column = self.lookup(key)?;
        if !column.filterable {
            return Err(TableError::not_filterable(key));
        }
        if !self.config.enable_filtering {
            debug!("Column filter on '{}' ignored: filtering is disabled", key);
            return Ok(());
        }

        let filter = filter.into();
        let changed = if filter.is_noop() {
            self.column_filters.remove(key).is_some()
        } else {
            self.column_filters.insert(key.to_string(), filter.clone()) != Some(filter)
        };
        if changed {
            self.recompute();
        }
        Ok(())
    }

    /// Removes the filter on a column.
    pub fn clear_column_filter(&mut self, key: &str) -> Result<()> {
        self.lookup(key)?;
        if self.column_filters.remove(key).is_some() {
            self.recompute();
        }
        Ok(())
    }

    /// Removes the global search and every column filter.
    pub fn clear_filters(&mut self) {
        if self.global_search.is_empty() && self.column_filters.is_empty() {
            return;
        }
        self.global_search.clear();
        self.column_filters.clear();
        self.recompute();
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Activates sorting on a column.
    ///
    /// Sorting the active column flips its direction; any other column starts
    /// ascending.
    pub fn set_sort(&mut self, key: &str) -> Result<()> {
        let column = self.lookup(key)?;
        if !column.sortable {
            return Err(TableError::not_sortable(key));
        }
        if !self.config.enable_sorting {
            debug!("Sort on '{}' ignored: sorting is disabled", key);
            return Ok(());
        }

        let next = SortState::next(self.sort.as_ref(), key);
        debug!("Sort set to '{}' {:?}", next.key, next.direction);
        self.sort = Some(next);
        self.recompute();
        Ok(())
    }

    /// Returns rows to collection order.
    pub fn clear_sort(&mut self) {
        if self.sort.take().is_some() {
            self.recompute();
        }
    }

    // =========================================================================
    // Paging
    // =========================================================================

    /// Moves to page `page`, clamped into `[1, total_pages]`.
    pub fn set_page(&mut self, page: i64) {
        let total = self.total_pages();
        let clamped = query::clamp_page(page, total);
        if i64::try_from(clamped).ok() != Some(page) {
            debug!("Page {} clamped to {} of {}", page, clamped, total);
        }
        self.page.current_page = clamped;
    }

    /// Moves to the next page, staying on the last page.
    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.page.current_page += 1;
        }
    }

    /// Moves to the previous page, staying on the first page.
    pub fn prev_page(&mut self) {
        if self.has_prev_page() {
            self.page.current_page -= 1;
        }
    }

    /// Returns `true` if a page follows the current one.
    pub fn has_next_page(&self) -> bool {
        self.page.current_page < self.total_pages()
    }

    /// Returns `true` if a page precedes the current one.
    pub fn has_prev_page(&self) -> bool {
        self.page.current_page > 1
    }

    /// Sets the rows per page and returns to page 1. Zero is raised to 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        if page_size == self.page.page_size {
            return;
        }
        debug!("Page size {} -> {}", self.page.page_size, page_size);
        self.page = PageState::new(page_size);
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Toggles selection of one row. Returns `true` if the selection changed.
    pub fn toggle_row(&mut self, id: &RowId) -> Result<bool> {
        if !self.positions.contains_key(id) {
            return Err(TableError::unknown_row(id.as_str()));
        }
        Ok(self.selection.toggle(id.clone()))
    }

    /// Adds every row on the current page to the selection.
    ///
    /// Rows selected on other pages stay selected. Returns the number of
    /// newly selected rows.
    pub fn select_all_on_page(&mut self) -> usize {
        let size = self.effective_page_size();
        let slice = query::paginate(&self.ordered, self.page.current_page, size).rows;
        let ids = slice.iter().map(|&i| &self.ids[i]);
        self.selection.select_many(ids)
    }

    /// Removes every row on the current page from the selection.
    pub fn deselect_all_on_page(&mut self) -> usize {
        let size = self.effective_page_size();
        let slice = query::paginate(&self.ordered, self.page.current_page, size).rows;
        let ids = slice.iter().map(|&i| &self.ids[i]);
        self.selection.deselect_many(ids)
    }

    /// Adds every row passing search and filters to the selection, on all
    /// pages. Returns the number of newly selected rows.
    pub fn select_all_filtered(&mut self) -> usize {
        let ids = self.ordered.iter().map(|&i| &self.ids[i]);
        self.selection.select_many(ids)
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Returns `true` if the row is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selection.is_selected(id)
    }

    /// Selected ids, in collection order.
    pub fn selected_ids(&self) -> Vec<&RowId> {
        self.ids
            .iter()
            .filter(|id| self.selection.is_selected(id))
            .collect()
    }

    /// Selected rows, in collection order, whether or not they are visible.
    pub fn selected_rows(&self) -> Vec<&Row> {
        self.ids
            .iter()
            .zip(&self.rows)
            .filter(|(id, _)| self.selection.is_selected(id))
            .map(|(_, row)| row)
            .collect()
    }

    /// Number of selected rows.
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// State of the header checkbox for the current page.
    pub fn page_check_state(&self) -> CheckState {
        let slice = self.current_slice();
        self.selection.check_state(slice.iter().map(|&i| &self.ids[i]))
    }

    // =========================================================================
    // Collection replacement
    // =========================================================================

    /// Replaces the row collection.
    ///
    /// The new rows are validated first; on error nothing changes. Search,
    /// filters and sort are kept, the page is clamped, and selected ids that
    /// no longer exist are dropped.
    pub fn replace_rows(&mut self, rows: Vec<Row>) -> Result<()> {
        let (ids, positions) = index_rows(&rows).inspect_err(|e| {
            warn!("Rejected row collection: {}", e);
        })?;
        self.install_rows(rows, ids, positions);
        Ok(())
    }

    /// Replaces the columns and rows together.
    ///
    /// Filters and sort on columns that no longer exist (or are no longer
    /// filterable / sortable) are dropped.
    pub fn replace_data(&mut self, columns: Vec<Column>, rows: Vec<Row>) -> Result<()> {
        let checked = validate_columns(&columns).and_then(|()| index_rows(&rows));
        let (ids, positions) = checked.inspect_err(|e| {
            warn!("Rejected table data: {}", e);
        })?;

        self.column_filters.retain(|key, _| {
            columns.iter().any(|c| &c.key == key && c.filterable)
        });
        let stale = self
            .sort
            .take_if(|sort| !columns.iter().any(|c| c.key == sort.key && c.sortable));
        if let Some(sort) = stale {
            debug!("Dropping sort on removed column '{}'", sort.key);
        }
        self.columns = columns;
        self.install_rows(rows, ids, positions);
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn install_rows(&mut self, rows: Vec<Row>, ids: Vec<RowId>, positions: HashMap<RowId, usize>) {
        let pruned = self.selection.retain(|id| positions.contains_key(id));
        debug!(
            "Replaced rows: {} -> {} ({} selected ids pruned)",
            self.rows.len(),
            rows.len(),
            pruned
        );
        self.rows = rows;
        self.ids = ids;
        self.positions = positions;
        self.recompute();
    }

    fn lookup(&self, key: &str) -> Result<&Column> {
        self.column(key).ok_or_else(|| TableError::invalid_column(key))
    }

    fn effective_page_size(&self) -> usize {
        if self.config.enable_pagination {
            self.page.page_size
        } else {
            self.ordered.len().max(1)
        }
    }

    fn current_page_window(&self) -> Page<'_, usize> {
        query::paginate(&self.ordered, self.page.current_page, self.effective_page_size())
    }

    fn current_slice(&self) -> &[usize] {
        self.current_page_window().rows
    }

    /// Re-runs filter and sort, then clamps the current page.
    fn recompute(&mut self) {
        let search = if self.config.enable_search {
            self.global_search.as_str()
        } else {
            ""
        };
        let no_filters = HashMap::new();
        let filters = if self.config.enable_filtering {
            &self.column_filters
        } else {
            &no_filters
        };

        let mut ordered = filter_indices(&self.rows, search, filters, &self.columns);
        if self.config.enable_sorting {
            sort_indices(&self.rows, &mut ordered, self.sort.as_ref());
        }
        trace!(
            "Recomputed pipeline: {} of {} rows pass",
            ordered.len(),
            self.rows.len()
        );
        self.ordered = ordered;

        let total = self.total_pages();
        if self.page.current_page > total {
            debug!("Page {} clamped to {}", self.page.current_page, total);
            self.page.current_page = total;
        }
    }
}

/// Rejects column lists that repeat a key.
fn validate_columns(columns: &[Column]) -> Result<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            return Err(TableError::duplicate_column(&column.key));
        }
    }
    Ok(())
}

/// Extracts row ids, rejecting missing or repeated ones.
fn index_rows(rows: &[Row]) -> Result<(Vec<RowId>, HashMap<RowId, usize>)> {
    let mut ids = Vec::with_capacity(rows.len());
    let mut positions = HashMap::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let id = row.id().ok_or_else(|| TableError::missing_id(index))?;
        if positions.insert(id.clone(), index).is_some() {
            return Err(TableError::duplicate_id(id.as_str(), index));
        }
        ids.push(id);
    }
    Ok((ids, positions))
}
