//! Sort stage: single-column ordering.

use std::cmp::Ordering;

use serde::Serialize;

use crate::model::{Row, compare_values};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

/// The active sort: one column key and a direction.
///
/// "No sort" is represented as `Option<SortState>::None`.
///
/// # Example
///
/// ```
/// use datatable_lib::query::{Direction, SortState};
///
/// let sort = SortState::next(None, "name");
/// assert_eq!(sort.direction, Direction::Asc);
///
/// let sort = SortState::next(Some(&sort), "name");
/// assert_eq!(sort.direction, Direction::Desc);
///
/// let sort = SortState::next(Some(&sort), "email");
/// assert_eq!(sort, SortState::asc("email"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortState {
    /// Column key to sort by.
    pub key: String,
    /// Sort direction.
    pub direction: Direction,
}

impl SortState {
    /// Creates an ascending sort on a column.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort on a column.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Desc,
        }
    }

    /// Sort state after the user activates `key`.
    ///
    /// The same key flips direction; a different key starts ascending.
    pub fn next(current: Option<&SortState>, key: &str) -> Self {
        match current {
            Some(current) if current.key == key => Self {
                key: current.key.clone(),
                direction: current.direction.reversed(),
            },
            _ => Self::asc(key),
        }
    }

    fn compare(&self, a: &Row, b: &Row) -> Ordering {
        self.direction
            .apply(compare_values(a.value(&self.key), b.value(&self.key)))
    }
}

/// Stably reorders `indices` (positions into `rows`) by `sort`.
///
/// With no sort the indices are left untouched.
pub fn sort_indices(rows: &[Row], indices: &mut [usize], sort: Option<&SortState>) {
    if let Some(sort) = sort {
        indices.sort_by(|&a, &b| sort.compare(&rows[a], &rows[b]));
    }
}

/// Sorts rows by `sort`, keeping equal rows in their incoming order.
///
/// Descending order reverses the comparison, not the output, so ties are
/// never flipped.
pub fn apply_sort<'a>(mut rows: Vec<&'a Row>, sort: Option<&SortState>) -> Vec<&'a Row> {
    if let Some(sort) = sort {
        rows.sort_by(|a, b| sort.compare(a, b));
    }
    rows
}
