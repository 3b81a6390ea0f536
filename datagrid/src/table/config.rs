//! Table configuration types.

use serde::{Deserialize, Serialize};

use crate::selection::SelectionMode;

/// Per-table behavior switches.
///
/// Plain data so hosts can load it from their own settings; builder-style
/// setters cover the common cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// How rows can be selected.
    pub selection_mode: SelectionMode,

    /// Let select-all stand for every object matching the query, not just
    /// the visible page. MULTI mode only.
    pub cross_page_selection: bool,

    /// Size of the full result set, supplied by the caller for cross-page
    /// selection. Never reconciled against the rows actually fetched.
    pub total_count: Option<usize>,

    /// Row clicks move a highlight cursor instead of toggling selection.
    pub independent_highlight: bool,

    /// Rows can be expanded.
    pub expandable: bool,

    /// Whether expansion toggles are accepted.
    pub allow_expansion_toggle: bool,

    /// Rows carry an action menu affordance.
    pub row_actions: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::None,
            cross_page_selection: false,
            total_count: None,
            independent_highlight: false,
            expandable: false,
            allow_expansion_toggle: true,
            row_actions: false,
        }
    }
}

impl TableOptions {
    /// Create options with the given selection mode.
    pub fn new(selection_mode: SelectionMode) -> Self {
        Self {
            selection_mode,
            ..Default::default()
        }
    }

    /// Enable cross-page selection with the caller's total count.
    pub fn cross_page(mut self, total_count: Option<usize>) -> Self {
        self.cross_page_selection = true;
        self.total_count = total_count;
        self
    }

    /// Decouple row highlight from selection.
    pub fn independent_highlight(mut self) -> Self {
        self.independent_highlight = true;
        self
    }

    /// Make rows expandable.
    pub fn expandable(mut self) -> Self {
        self.expandable = true;
        self
    }

    /// Set whether expansion toggles are accepted.
    pub fn allow_expansion_toggle(mut self, allow: bool) -> Self {
        self.allow_expansion_toggle = allow;
        self
    }

    /// Show per-row action menus.
    pub fn row_actions(mut self) -> Self {
        self.row_actions = true;
        self
    }
}
