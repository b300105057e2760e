//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::Row;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Kind of filter control a column offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Free-text input, matched as a substring.
    #[default]
    Text,
    /// Choice among `filter_options`, matched as an exact token.
    Select,
    /// Date input.
    Date,
    /// Number input.
    Number,
}

/// Formats a row into the display string for one cell.
pub type CellRenderer = Arc<dyn Fn(&Row) -> String + Send + Sync>;

/// Column configuration.
///
/// Columns define how a row field is labeled, sorted, filtered and rendered.
///
/// # Examples
///
/// ```
/// use datatable_lib::model::{Alignment, Column};
///
/// let columns = vec![
///     Column::new("name", "Name").sortable().filterable(),
///     Column::new("status", "Status").select_filter(["Active", "Inactive"]),
///     Column::new("amount", "Amount")
///         .sortable()
///         .align(Alignment::Right)
///         .render(|row| format!("${}", row.value("amount"))),
/// ];
/// ```
#[derive(Clone)]
pub struct Column {
    /// Row field this column reads.
    pub key: String,
    /// Column header text.
    pub header: String,
    /// Whether this column is sortable.
    pub sortable: bool,
    /// Whether this column accepts a column filter.
    pub filterable: bool,
    /// Horizontal alignment.
    pub align: Alignment,
    /// Width hint passed through to the host (e.g. `"30%"`).
    pub width: Option<String>,
    /// Filter control kind.
    pub filter_kind: FilterKind,
    /// Choices for a select filter.
    pub filter_options: Vec<String>,
    /// Optional cell formatter.
    pub render: Option<CellRenderer>,
}

impl Column {
    /// Create a new column reading `key` with the given header.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: false,
            filterable: false,
            align: Alignment::Left,
            width: None,
            filter_kind: FilterKind::Text,
            filter_options: Vec::new(),
            render: None,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column filterable with a free-text filter.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Make the column filterable with a select filter over `options`.
    pub fn select_filter<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filterable = true;
        self.filter_kind = FilterKind::Select;
        self.filter_options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Set the filter control kind.
    pub fn filter_kind(mut self, kind: FilterKind) -> Self {
        self.filter_kind = kind;
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set the width hint.
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Set the cell formatter.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Row) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Display string for this column's cell in `row`.
    ///
    /// Uses the formatter when one is set, the value's default
    /// stringification otherwise.
    pub fn display(&self, row: &Row) -> String {
        match &self.render {
            Some(render) => render(row),
            None => row.value(&self.key).to_string(),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("align", &self.align)
            .field("width", &self.width)
            .field("filter_kind", &self.filter_kind)
            .field("filter_options", &self.filter_options)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_falls_back_to_stringifier() {
        let row = Row::with_id(1).set("amount", 1250);
        let plain = Column::new("amount", "Amount");
        let formatted =
            Column::new("amount", "Amount").render(|r| format!("${}", r.value("amount")));

        assert_eq!(plain.display(&row), "1250");
        assert_eq!(formatted.display(&row), "$1250");
        assert_eq!(Column::new("missing", "Missing").display(&row), "");
    }

    #[test]
    fn test_select_filter_marks_filterable() {
        let col = Column::new("status", "Status").select_filter(["Paid", "Pending"]);
        assert!(col.filterable);
        assert_eq!(col.filter_kind, FilterKind::Select);
        assert_eq!(col.filter_options, vec!["Paid", "Pending"]);
    }
}
