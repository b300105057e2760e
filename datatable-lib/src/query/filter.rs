//! Filter stage: global search and per-column filters.

use std::collections::HashMap;

use crate::model::{Column, Row, Value};

/// Select-filter token that stands for "no filter".
const ALL_TOKEN: &str = "all";

/// A filter applied to one column.
///
/// Both matching modes are case-insensitive and compare against the
/// stringified field value, so an absent field matches as `""`.
///
/// # Example
///
/// ```
/// use datatable_lib::query::ColumnFilter;
///
/// let by_name = ColumnFilter::contains("rhye");
/// let by_status = ColumnFilter::exact("Active");
///
/// // Plain strings convert to substring filters.
/// let from_str: ColumnFilter = "rhye".into();
/// assert_eq!(from_str, by_name);
/// assert!(ColumnFilter::exact("All").is_noop());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnFilter {
    /// Matches every row.
    #[default]
    Any,
    /// Substring match.
    Contains(String),
    /// Whole-value match, used for select filters.
    Exact(String),
}

impl ColumnFilter {
    /// Creates a substring filter.
    pub fn contains(value: impl Into<String>) -> Self {
        ColumnFilter::Contains(value.into())
    }

    /// Creates an exact-match filter.
    pub fn exact(value: impl Into<String>) -> Self {
        ColumnFilter::Exact(value.into())
    }

    /// Returns `true` if this filter cannot exclude any row.
    ///
    /// Empty values are no-ops, and so is the `"all"` select entry.
    pub fn is_noop(&self) -> bool {
        match self {
            ColumnFilter::Any => true,
            ColumnFilter::Contains(v) => v.is_empty(),
            ColumnFilter::Exact(v) => v.is_empty() || v.eq_ignore_ascii_case(ALL_TOKEN),
        }
    }

    fn fold(&self) -> Option<FoldedFilter> {
        if self.is_noop() {
            return None;
        }
        match self {
            ColumnFilter::Any => None,
            ColumnFilter::Contains(v) => Some(FoldedFilter::Contains(v.to_lowercase())),
            ColumnFilter::Exact(v) => Some(FoldedFilter::Exact(v.to_lowercase())),
        }
    }
}

impl From<&str> for ColumnFilter {
    fn from(value: &str) -> Self {
        ColumnFilter::Contains(value.to_string())
    }
}

impl From<String> for ColumnFilter {
    fn from(value: String) -> Self {
        ColumnFilter::Contains(value)
    }
}

/// Lowercased form of a filter, computed once per pipeline run.
enum FoldedFilter {
    Contains(String),
    Exact(String),
}

impl FoldedFilter {
    fn matches(&self, value: &Value) -> bool {
        match self {
            FoldedFilter::Contains(needle) => value.contains_folded(needle),
            FoldedFilter::Exact(token) => value.equals_folded(token),
        }
    }
}

/// Returns the indices of rows that pass the global search and every column
/// filter, in their original order.
pub fn filter_indices(
    rows: &[Row],
    global_search: &str,
    column_filters: &HashMap<String, ColumnFilter>,
    columns: &[Column],
) -> Vec<usize> {
    let search = global_search.to_lowercase();
    let active: Vec<(&str, FoldedFilter)> = column_filters
        .iter()
        .filter_map(|(key, filter)| filter.fold().map(|f| (key.as_str(), f)))
        .collect();

    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            search.is_empty()
                || columns
                    .iter()
                    .any(|col| row.value(&col.key).contains_folded(&search))
        })
        .filter(|(_, row)| {
            active
                .iter()
                .all(|(key, filter)| filter.matches(row.value(key)))
        })
        .map(|(index, _)| index)
        .collect()
}

/// Applies the global search and column filters to `rows`.
///
/// Matching rows are returned by reference in their original relative order;
/// the input is never modified.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use datatable_lib::model::{Column, Row};
/// use datatable_lib::query::apply_filters;
///
/// let rows = vec![
///     Row::with_id(1).set("name", "Olivia Rhye"),
///     Row::with_id(2).set("name", "Phoenix Baker"),
/// ];
/// let columns = vec![Column::new("name", "Name")];
///
/// let matched = apply_filters(&rows, "PHOENIX", &HashMap::new(), &columns);
/// assert_eq!(matched.len(), 1);
/// ```
pub fn apply_filters<'a>(
    rows: &'a [Row],
    global_search: &str,
    column_filters: &HashMap<String, ColumnFilter>,
    columns: &[Column],
) -> Vec<&'a Row> {
    filter_indices(rows, global_search, column_filters, columns)
        .into_iter()
        .map(|index| &rows[index])
        .collect()
}

/// Choices offered by a column's filter control.
///
/// Declared `filter_options` win; otherwise the distinct non-empty
/// stringified values of the column, in first-seen order.
pub fn filter_options(column: &Column, rows: &[Row]) -> Vec<String> {
    if !column.filter_options.is_empty() {
        return column.filter_options.clone();
    }
    let mut seen = std::collections::HashSet::new();
    rows.iter()
        .map(|row| row.value(&column.key).to_string())
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}
