//! Selection state types.
//!
//! Selection uses string IDs for stability across row mutations. The derived
//! header flags (`select_all`, `indeterminate`) are stored alongside the ids so
//! that a proposal handed to a controlled caller is complete on its own.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Selection mode for tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SelectionMode {
    /// No selection allowed
    #[default]
    None,
    /// At most one row selected (radio semantics)
    Single,
    /// Any number of rows selected (checkbox semantics)
    Multi,
}

/// ID-based selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub mode: SelectionMode,
    /// Currently selected IDs
    pub selected_ids: BTreeSet<String>,
    /// Header checkbox fully checked
    pub select_all: bool,
    /// Header checkbox in the "some but not all" state
    pub indeterminate: bool,
    /// "Select all objects matching the query", beyond the current page
    #[serde(default)]
    pub all_matching: bool,
    #[serde(default)]
    pub cross_page_enabled: bool,
    /// Caller-supplied size of the full result set for cross-page selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
}

impl SelectionState {
    /// Create an empty selection.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn selected(&self) -> Vec<String> {
        self.selected_ids.iter().cloned().collect()
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_ids.contains(id)
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected_ids.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    /// Number of objects the selection stands for.
    ///
    /// With "all matching" active this is the caller's total, otherwise the
    /// number of explicitly selected ids.
    pub fn effective_count(&self) -> usize {
        match (self.all_matching, self.total_count) {
            (true, Some(total)) => total,
            _ => self.selected_ids.len(),
        }
    }

    /// Recompute `select_all` / `indeterminate`.
    ///
    /// `page_ids` are the selectable ids of the visible page. Cross-page
    /// selections with a known total count are measured against that total;
    /// everything else is measured against the page.
    pub(crate) fn recompute_flags<'a>(&mut self, page_ids: impl IntoIterator<Item = &'a str>) {
        let cross_page_total = self.total_count.filter(|_| self.cross_page_enabled);
        self.select_all = if self.all_matching {
            true
        } else if let Some(total) = cross_page_total {
            total > 0 && self.selected_ids.len() >= total
        } else {
            let mut selectable = 0usize;
            let mut selected = 0usize;
            for id in page_ids {
                selectable += 1;
                if self.selected_ids.contains(id) {
                    selected += 1;
                }
            }
            selectable > 0 && selected == selectable
        };
        self.indeterminate = !self.select_all && !self.selected_ids.is_empty();
    }
}
