//! Row selection keyed by row id.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::RowId;

/// Selection mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// No selection allowed.
    None,
    /// Single row selection (radio-button style).
    Single,
    /// Multiple rows can be selected (checkbox style).
    #[default]
    Multi,
}

/// State of a "select all" checkbox for a group of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    /// Every row in the group is selected (and the group is not empty).
    Checked,
    /// No row in the group is selected.
    Unchecked,
    /// Some, but not all, rows are selected.
    Indeterminate,
}

/// Tracks selected rows by id.
///
/// Selection is independent of filtering, sorting and paging: a row stays
/// selected while it is hidden.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    mode: SelectionMode,
    selected: HashSet<RowId>,
}

impl Selection {
    /// Create an empty selection in the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
        }
    }

    /// Returns the selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Toggle selection for an id. Returns true if selection changed.
    pub fn toggle(&mut self, id: RowId) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                if !self.selected.remove(&id) {
                    self.selected.clear();
                    self.selected.insert(id);
                }
                true
            }
            SelectionMode::Multi => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
                true
            }
        }
    }

    /// Add every id to the selection. Returns the number newly selected.
    ///
    /// Only multi-select adds groups; other modes are left untouched.
    pub fn select_many<'a>(&mut self, ids: impl IntoIterator<Item = &'a RowId>) -> usize {
        if self.mode != SelectionMode::Multi {
            return 0;
        }
        ids.into_iter()
            .filter(|id| self.selected.insert((*id).clone()))
            .count()
    }

    /// Remove every id from the selection. Returns the number removed.
    pub fn deselect_many<'a>(&mut self, ids: impl IntoIterator<Item = &'a RowId>) -> usize {
        ids.into_iter().filter(|id| self.selected.remove(*id)).count()
    }

    /// Keep only ids for which `keep` returns true. Returns the number dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&RowId) -> bool) -> usize {
        let before = self.selected.len();
        self.selected.retain(|id| keep(id));
        before - self.selected.len()
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// Checkbox state for a group of ids.
    pub fn check_state<'a>(&self, ids: impl IntoIterator<Item = &'a RowId>) -> CheckState {
        let (mut total, mut hits) = (0usize, 0usize);
        for id in ids {
            total += 1;
            if self.selected.contains(id) {
                hits += 1;
            }
        }
        match hits {
            0 => CheckState::Unchecked,
            n if n == total => CheckState::Checked,
            _ => CheckState::Indeterminate,
        }
    }

    /// Clear all selections.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Get all selected ids, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &RowId> {
        self.selected.iter()
    }
}
