//! Column visibility and custom-content toggles.

use std::collections::BTreeSet;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::source::{Proposal, StateSource};

/// Full column list with hidden flags applied, plus the enabled custom
/// content toggles (content not backed by a column).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnVisibilityState {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub displayed_custom_content: BTreeSet<String>,
}

impl ColumnVisibilityState {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            displayed_custom_content: BTreeSet::new(),
        }
    }

    /// Fields of all hidden columns.
    pub fn hidden_fields(&self) -> BTreeSet<&str> {
        self.columns
            .iter()
            .filter(|c| c.hidden)
            .map(|c| c.field.as_str())
            .collect()
    }

    /// Columns currently shown, in order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.hidden)
    }

    pub fn is_custom_content_displayed(&self, kind: &str) -> bool {
        self.displayed_custom_content.contains(kind)
    }

    /// Whether hiding `field` is allowed right now.
    ///
    /// Refused for unknown, already hidden and `disable_hiding` columns, and
    /// for the last visible cell-bearing column that can be hidden.
    pub fn can_hide(&self, field: &str) -> bool {
        let Some(column) = self.columns.iter().find(|c| c.field == field) else {
            return false;
        };
        if column.hidden || column.disable_hiding {
            return false;
        }
        if column.has_no_cell {
            return true;
        }
        self.columns
            .iter()
            .filter(|c| c.counts_as_visible_content())
            .count()
            > 1
    }

    /// Restore the "one visible column" floor.
    ///
    /// When no cell-bearing hideable column is visible, the first such column
    /// is shown again. Returns `true` if a column was un-hidden.
    pub(crate) fn restore_visible_floor(&mut self) -> bool {
        if self.columns.iter().any(Column::counts_as_visible_content) {
            return false;
        }
        let Some(column) = self
            .columns
            .iter_mut()
            .find(|c| !c.has_no_cell && !c.disable_hiding)
        else {
            return false;
        };
        warn!("No visible column left; showing {}", column.field);
        column.hidden = false;
        true
    }
}

/// Column visibility bookkeeping for one table.
#[derive(Debug)]
pub struct ColumnVisibilityModel {
    source: StateSource<ColumnVisibilityState>,
}

impl ColumnVisibilityModel {
    pub fn new(source: StateSource<ColumnVisibilityState>) -> Self {
        Self { source }
    }

    pub fn state(&self) -> &ColumnVisibilityState {
        self.source.current()
    }

    pub fn columns(&self) -> &[Column] {
        &self.state().columns
    }

    /// Flip the hidden flag of `field`.
    ///
    /// Refused for unknown and `disable_hiding` columns, and when it would hide
    /// the last visible cell-bearing column. The proposal carries a full,
    /// cloned column list; the current list is never edited in place.
    pub fn toggle_column(&mut self, field: &str) -> Option<Proposal<ColumnVisibilityState>> {
        let state = self.state();
        let Some(index) = state.columns.iter().position(|c| c.field == field) else {
            debug!("Ignoring visibility toggle on unknown column {field}");
            return None;
        };
        let column = &state.columns[index];
        if column.disable_hiding {
            debug!("Ignoring visibility toggle on {field}: hiding disabled");
            return None;
        }
        if !column.hidden && !state.can_hide(field) {
            debug!("Ignoring visibility toggle on {field}: last visible column");
            return None;
        }

        let mut next = state.clone();
        next.columns[index].hidden = !column.hidden;
        trace!("Column {field} hidden={}", next.columns[index].hidden);
        Some(self.source.propose(next))
    }

    /// Flip a custom content toggle. No visibility floor applies.
    pub fn toggle_custom_content(&mut self, kind: &str) -> Proposal<ColumnVisibilityState> {
        let mut next = self.state().clone();
        if !next.displayed_custom_content.remove(kind) {
            next.displayed_custom_content.insert(kind.to_string());
        }
        trace!("Custom content {kind} displayed={}", next.is_custom_content_displayed(kind));
        self.source.propose(next)
    }

    /// Replace the controlled column list (and custom content).
    ///
    /// A list with every column hidden gets its first hideable column shown.
    pub fn set_controlled(&mut self, mut next: ColumnVisibilityState) -> bool {
        next.restore_visible_floor();
        if !self.source.sync(next) {
            log::warn!("set_controlled_columns called on uncontrolled columns; ignoring");
            return false;
        }
        true
    }

    /// Install a new column universe in uncontrolled mode.
    ///
    /// Hidden flags the user already set survive for fields that still exist,
    /// as long as at least one column stays visible.
    pub fn replace_columns(&mut self, columns: Vec<Column>) -> bool {
        self.source.reset_uncontrolled(|state| {
            let hidden: BTreeSet<String> =
                state.hidden_fields().into_iter().map(str::to_string).collect();
            let previous: BTreeSet<String> =
                state.columns.iter().map(|c| c.field.clone()).collect();
            state.columns = columns
                .into_iter()
                .map(|mut c| {
                    if previous.contains(&c.field) {
                        c.hidden = hidden.contains(&c.field) && !c.disable_hiding;
                    }
                    c
                })
                .collect();
            state.restore_visible_floor();
        })
    }
}
