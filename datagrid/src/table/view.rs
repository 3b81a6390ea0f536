//! Render-ready descriptors.
//!
//! A [`TableView`] carries everything a view layer needs to paint the table
//! without re-deriving any logic: which columns to draw, sort indicators,
//! checkbox states, expansion and action-menu affordances.

use serde::Serialize;
use serde_json::Value;

use crate::column::{Alignment, SortDirection};
use crate::selection::SelectionMode;

/// Tri-state checkbox (or radio, in SINGLE mode).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckboxState {
    pub checked: bool,
    pub indeterminate: bool,
    pub disabled: bool,
}

/// Sort indicator for a header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortIndicator {
    /// Column cannot be sorted
    None,
    /// Sortable, but not the active column
    Inactive,
    Active(SortDirection),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub field: String,
    pub label: String,
    pub width: Option<u16>,
    pub align: Alignment,
    pub sort: SortIndicator,
    /// Whether the "hide column" affordance should be enabled
    pub can_hide: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderRow {
    /// Header checkbox; only present in MULTI mode.
    pub select_all: Option<CheckboxState>,
    pub cells: Vec<HeaderCell>,
    /// Leading column for expand toggles
    pub expansion_column: bool,
    /// Trailing column for row action menus
    pub actions_column: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyCell {
    pub field: String,
    pub value: Option<Value>,
    pub align: Alignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpansionAffordance {
    pub expanded: bool,
    pub can_toggle: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionMenuAffordance {
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyRow {
    pub id: String,
    /// Selection control; absent when selection is off.
    pub selection: Option<CheckboxState>,
    pub highlighted: bool,
    pub expansion: Option<ExpansionAffordance>,
    pub action_menu: Option<ActionMenuAffordance>,
    pub cells: Vec<BodyCell>,
}

impl BodyRow {
    pub fn is_selected(&self) -> bool {
        self.selection.is_some_and(|s| s.checked)
    }
}

/// Selection figures for banners such as "3 of 120 selected".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub mode: SelectionMode,
    /// Explicitly selected ids
    pub selected_count: usize,
    /// Objects the selection stands for (the total when "all matching")
    pub effective_count: usize,
    pub select_all: bool,
    pub indeterminate: bool,
    pub all_matching: bool,
    pub total_count: Option<usize>,
}

/// Complete render description of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub id: String,
    pub selection_mode: SelectionMode,
    pub header: HeaderRow,
    pub rows: Vec<BodyRow>,
    pub summary: SelectionSummary,
    /// Enabled custom content toggles
    pub custom_content: Vec<String>,
}

impl TableView {
    pub fn row(&self, id: &str) -> Option<&BodyRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn header_cell(&self, field: &str) -> Option<&HeaderCell> {
        self.header.cells.iter().find(|c| c.field == field)
    }
}
