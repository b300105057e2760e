//! TableError for engine operations

/// Error type for table engine operations.
///
/// Every variant describes a caller-contract violation. Operations that only
/// adjust presentation state (search text, page numbers) never fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The column key is not part of the engine's column list.
    #[error("Column '{key}' is not defined for this table")]
    InvalidColumnKey { key: String },

    /// The column exists but is not marked sortable.
    #[error("Column '{key}' is not sortable")]
    NotSortable { key: String },

    /// The column exists but is not marked filterable.
    #[error("Column '{key}' is not filterable")]
    NotFilterable { key: String },

    /// Two columns in the same column list share a key.
    #[error("Column '{key}' is defined more than once")]
    DuplicateColumnKey { key: String },

    /// A row in an incoming collection has no `id` field.
    #[error("Row at index {index} has no identifier field")]
    MissingRowIdentifier { index: usize },

    /// Two rows in an incoming collection share an identifier.
    #[error("Row identifier '{id}' appears more than once (row {index})")]
    DuplicateRowIdentifier { id: String, index: usize },

    /// The row id does not belong to the current collection.
    #[error("Row '{id}' is not part of the current collection")]
    UnknownRowId { id: String },
}

impl TableError {
    /// Creates a new invalid column key error.
    pub fn invalid_column(key: impl Into<String>) -> Self {
        Self::InvalidColumnKey { key: key.into() }
    }

    /// Creates a new not-sortable error.
    pub fn not_sortable(key: impl Into<String>) -> Self {
        Self::NotSortable { key: key.into() }
    }

    /// Creates a new not-filterable error.
    pub fn not_filterable(key: impl Into<String>) -> Self {
        Self::NotFilterable { key: key.into() }
    }

    /// Creates a new duplicate column key error.
    pub fn duplicate_column(key: impl Into<String>) -> Self {
        Self::DuplicateColumnKey { key: key.into() }
    }

    /// Creates a new missing row identifier error.
    pub fn missing_id(index: usize) -> Self {
        Self::MissingRowIdentifier { index }
    }

    /// Creates a new duplicate row identifier error.
    pub fn duplicate_id(id: impl Into<String>, index: usize) -> Self {
        Self::DuplicateRowIdentifier {
            id: id.into(),
            index,
        }
    }

    /// Creates a new unknown row id error.
    pub fn unknown_row(id: impl Into<String>) -> Self {
        Self::UnknownRowId { id: id.into() }
    }

    /// Returns `true` if this error was caused by a column lookup.
    pub fn is_column_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidColumnKey { .. }
                | Self::NotSortable { .. }
                | Self::NotFilterable { .. }
                | Self::DuplicateColumnKey { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;
