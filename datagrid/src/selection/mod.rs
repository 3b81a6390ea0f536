//! Row selection: NONE / SINGLE / MULTI modes, select-all with an
//! indeterminate marker, disabled rows, and cross-page "select all matching".

mod state;

use std::collections::BTreeSet;

use log::{debug, trace};

pub use state::{SelectionMode, SelectionState};

use crate::source::{Proposal, StateSource};

/// Selection bookkeeping for one table.
///
/// The model knows the ids of the visible page (in display order) and the
/// caller's disabled ids; every operation is total and unknown or disabled
/// ids are ignored.
#[derive(Debug)]
pub struct SelectionModel {
    source: StateSource<SelectionState>,
    /// Visible row ids in display order
    row_ids: Vec<String>,
    disabled: BTreeSet<String>,
}

impl SelectionModel {
    pub fn new(source: StateSource<SelectionState>) -> Self {
        let mut model = Self {
            source,
            row_ids: Vec::new(),
            disabled: BTreeSet::new(),
        };
        model.refresh_flags();
        model
    }

    pub fn state(&self) -> &SelectionState {
        self.source.current()
    }

    pub fn mode(&self) -> SelectionMode {
        self.state().mode
    }

    /// Whether `id` renders as checked.
    ///
    /// With "all matching" raised every selectable row counts as selected,
    /// including rows of pages fetched after the select-all.
    pub fn is_selected(&self, id: &str) -> bool {
        let state = self.state();
        state.is_selected(id) || (state.all_matching && !self.disabled.contains(id))
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.disabled.contains(id)
    }

    /// Get all selected IDs (sorted).
    pub fn selected_ids(&self) -> Vec<String> {
        self.state().selected()
    }

    /// Toggle a single row.
    ///
    /// SINGLE mode has radio semantics: a new row replaces the previous one and
    /// re-clicking the selected row clears the selection. MULTI mode flips
    /// membership. Returns `None` when the toggle is ignored.
    pub fn toggle_row(&mut self, id: &str) -> Option<Proposal<SelectionState>> {
        let mode = self.mode();
        if mode == SelectionMode::None {
            debug!("Ignoring row toggle for {id}: selection disabled");
            return None;
        }
        if !self.row_ids.iter().any(|r| r == id) {
            debug!("Ignoring row toggle for unknown row {id}");
            return None;
        }
        if self.disabled.contains(id) {
            debug!("Ignoring row toggle for disabled row {id}");
            return None;
        }

        let mut next = self.state().clone();
        match mode {
            SelectionMode::Single => {
                let was_selected = next.selected_ids.contains(id);
                next.selected_ids.clear();
                if !was_selected {
                    next.selected_ids.insert(id.to_string());
                }
            }
            SelectionMode::Multi if next.all_matching => {
                // Excluding a row breaks "everything matching the query";
                // the rest of the page stays selected.
                next.selected_ids.extend(self.selectable_ids().map(str::to_string));
                next.selected_ids.remove(id);
                next.all_matching = false;
            }
            SelectionMode::Multi => {
                if !next.selected_ids.remove(id) {
                    next.selected_ids.insert(id.to_string());
                }
            }
            SelectionMode::None => return None,
        }
        trace!("Row {id} toggled, {} selected", next.selected_ids.len());
        Some(self.propose(next))
    }

    /// Toggle the header checkbox (MULTI mode only).
    ///
    /// When everything is selected, clears to empty. Otherwise selects every
    /// selectable row of the page; with cross-page selection enabled it also
    /// raises the "all matching" signal and leaves the authoritative row set
    /// to the caller's `total_count`.
    pub fn toggle_select_all(&mut self) -> Option<Proposal<SelectionState>> {
        if self.mode() != SelectionMode::Multi {
            debug!("Ignoring select-all outside MULTI mode");
            return None;
        }

        let state = self.state();
        if self.selectable_ids().next().is_none() && state.is_empty() && !state.all_matching {
            debug!("Ignoring select-all: no selectable rows");
            return None;
        }

        let mut next = self.state().clone();
        if next.select_all {
            next.selected_ids.clear();
            next.all_matching = false;
            trace!("Select-all cleared");
        } else {
            if !next.cross_page_enabled {
                next.selected_ids.clear();
            }
            next.selected_ids.extend(self.selectable_ids().map(str::to_string));
            next.all_matching = next.cross_page_enabled;
            trace!(
                "Select-all picked {} rows (all matching: {})",
                next.selected_ids.len(),
                next.all_matching
            );
        }
        Some(self.propose(next))
    }

    /// Replace the selected ids wholesale (controlled mode only).
    ///
    /// Disabled ids are dropped; so are ids outside the current page unless
    /// cross-page selection is enabled. Returns `false` for uncontrolled models.
    pub fn set_controlled_selection<I, S>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.source.is_controlled() {
            log::warn!("set_controlled_selection called on an uncontrolled selection; ignoring");
            return false;
        }
        let mut next = self.state().clone();
        next.selected_ids = ids.into_iter().map(Into::into).collect();
        next.all_matching = next.all_matching && !next.selected_ids.is_empty();
        self.sanitize(&mut next);
        self.source.sync(next)
    }

    /// Replace the controlled selection with a full state, typically the
    /// proposal the change handler received. Ids and the "all matching" flag
    /// are taken from `state`; mode, cross-page switch and total stay the
    /// table's own.
    pub fn set_controlled_state(&mut self, state: SelectionState) -> bool {
        if !self.source.is_controlled() {
            log::warn!("set_controlled_state called on an uncontrolled selection; ignoring");
            return false;
        }
        let mut next = self.state().clone();
        next.selected_ids = state.selected_ids;
        next.all_matching = state.all_matching;
        self.sanitize(&mut next);
        self.source.sync(next)
    }

    /// Raise or clear the cross-page "all matching" signal from the caller side
    /// (controlled mode), e.g. after its own "select all N results" banner.
    pub fn set_controlled_all_matching(&mut self, all_matching: bool) -> bool {
        if !self.source.is_controlled() {
            return false;
        }
        let mut next = self.state().clone();
        next.all_matching = all_matching && next.cross_page_enabled;
        self.sanitize(&mut next);
        self.source.sync(next)
    }

    /// Synchronize with a new page of rows.
    ///
    /// Ids that left the page (unless cross-page), and ids that became
    /// disabled, are pruned; derived flags are recomputed.
    pub fn reconcile<I>(&mut self, row_ids: Vec<String>, disabled: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.row_ids = row_ids;
        self.disabled = disabled.into_iter().collect();
        let (row_ids, disabled) = (&self.row_ids, &self.disabled);
        self.source.refresh(|state| {
            prune(state, row_ids, disabled);
            recompute(state, row_ids, disabled);
        });
    }

    /// Update the caller's total count for cross-page selection.
    pub fn set_total_count(&mut self, total_count: Option<usize>) {
        self.source.refresh(|state| state.total_count = total_count);
        self.refresh_flags();
    }

    fn selectable_ids(&self) -> impl Iterator<Item = &str> {
        self.row_ids
            .iter()
            .map(String::as_str)
            .filter(|id| !self.disabled.contains(*id))
    }

    fn sanitize(&self, state: &mut SelectionState) {
        prune(state, &self.row_ids, &self.disabled);
        recompute(state, &self.row_ids, &self.disabled);
    }

    fn refresh_flags(&mut self) {
        let (row_ids, disabled) = (&self.row_ids, &self.disabled);
        self.source.refresh(|state| recompute(state, row_ids, disabled));
    }

    fn propose(&mut self, mut next: SelectionState) -> Proposal<SelectionState> {
        recompute(&mut next, &self.row_ids, &self.disabled);
        self.source.propose(next)
    }
}

fn prune(state: &mut SelectionState, row_ids: &[String], disabled: &BTreeSet<String>) {
    state.all_matching = state.all_matching && state.cross_page_enabled;
    let keep_foreign = state.cross_page_enabled;
    state
        .selected_ids
        .retain(|id| !disabled.contains(id) && (keep_foreign || row_ids.contains(id)));

    if state.mode == SelectionMode::None {
        state.selected_ids.clear();
    }
    if state.mode == SelectionMode::Single && state.selected_ids.len() > 1 {
        // Keep the first selected row in display order.
        let keep = row_ids
            .iter()
            .find(|id| state.selected_ids.contains(*id))
            .or_else(|| state.selected_ids.iter().next())
            .cloned();
        state.selected_ids = keep.into_iter().collect();
    }
}

fn recompute(state: &mut SelectionState, row_ids: &[String], disabled: &BTreeSet<String>) {
    state.recompute_flags(
        row_ids
            .iter()
            .map(String::as_str)
            .filter(|id| !disabled.contains(*id)),
    );
}
