//! Table controller state.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, trace, warn};

use crate::action_menu::{ActionMenu, ActionMenuState, OutsideClickHub};
use crate::column::Column;
use crate::expansion::{ExpansionModel, ExpansionState};
use crate::highlight::{HighlightModel, HighlightState};
use crate::row::TableRow;
use crate::selection::{SelectionModel, SelectionMode, SelectionState};
use crate::sort::{SortModel, SortState};
use crate::source::{Proposal, StateSource};
use crate::visibility::{ColumnVisibilityModel, ColumnVisibilityState};

use super::builder::TableBuilder;
use super::config::TableOptions;

/// Unique identifier for a table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// What a plain row click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowClick {
    /// The highlight cursor moved (independent highlight mode).
    Highlighted(HighlightState),
    /// The selection changed (or a change was proposed, when controlled).
    Selected(SelectionState),
    /// Nothing happened.
    Ignored,
}

/// Internal state for the table.
#[derive(Debug)]
pub(super) struct TableInner<R: TableRow> {
    pub rows: Vec<R>,
    /// Row ids in display order.
    pub row_ids: Vec<String>,
    pub disabled: Vec<String>,
    pub options: TableOptions,
    pub selection: SelectionModel,
    pub sort: SortModel,
    pub visibility: ColumnVisibilityModel,
    pub expansion: ExpansionModel,
    pub highlight: HighlightModel,
    pub action_menu: ActionMenu,
}

impl<R: TableRow> TableInner<R> {
    fn install_rows(&mut self, rows: Vec<R>) {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id();
            if seen.insert(id.clone()) {
                kept.push(row);
            } else {
                warn!("Duplicate row id {id} in refresh; keeping the first occurrence");
            }
        }
        self.row_ids = kept.iter().map(|r| r.id()).collect();
        self.rows = kept;
        self.sync_selection();
        self.highlight.reconcile(&self.row_ids);
        self.action_menu.reconcile(&self.row_ids);
    }

    fn sync_selection(&mut self) {
        self.selection
            .reconcile(self.row_ids.clone(), self.disabled.iter().cloned());
    }

    fn is_known_row(&self, id: &str) -> bool {
        self.row_ids.iter().any(|r| r == id)
    }
}

/// The table state engine.
///
/// `TableController<R>` composes the selection, sort, column visibility,
/// expansion, highlight and action-menu models over one row/column universe.
/// The view layer calls it on every user interaction and re-renders from
/// [`view`](Self::view).
///
/// Interactions are total: an interaction that does not apply (sorting a
/// non-sortable column, hiding the last visible column, toggling a disabled
/// row) returns `None`/`false` and changes nothing.
///
/// The controller is a cheap handle; clones share the same state. Change
/// handlers run after the internal lock is released, so they may call back
/// into the controller.
#[derive(Debug)]
pub struct TableController<R: TableRow> {
    /// Unique identifier.
    id: TableId,
    /// Internal state.
    pub(super) inner: Arc<RwLock<TableInner<R>>>,
    /// Dirty flag for re-render.
    pub(super) dirty: Arc<AtomicBool>,
}

impl<R: TableRow> TableController<R> {
    /// Start building a table over `columns`.
    pub fn builder(columns: Vec<Column>) -> TableBuilder<R> {
        TableBuilder::new(columns)
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn from_parts(
        rows: Vec<R>,
        disabled: Vec<String>,
        options: TableOptions,
        selection: StateSource<SelectionState>,
        sort: StateSource<SortState>,
        visibility: StateSource<ColumnVisibilityState>,
        expansion: StateSource<ExpansionState>,
        highlight: StateSource<HighlightState>,
        hub: Option<Arc<dyn OutsideClickHub>>,
    ) -> Self {
        let allow_toggle = options.allow_expansion_toggle;
        let mut inner = TableInner {
            rows: Vec::new(),
            row_ids: Vec::new(),
            disabled,
            options,
            selection: SelectionModel::new(selection),
            sort: SortModel::new(sort),
            visibility: ColumnVisibilityModel::new(visibility),
            expansion: ExpansionModel::new(expansion, allow_toggle),
            highlight: HighlightModel::new(highlight),
            action_menu: ActionMenu::new(hub),
        };
        inner.install_rows(rows);
        let columns = inner.visibility.columns().to_vec();
        inner.sort.reconcile(&columns);

        let id = TableId::new();
        debug!("Created table {id} with {} rows", inner.rows.len());
        Self {
            id,
            inner: Arc::new(RwLock::new(inner)),
            dirty: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    fn read<T: Default>(&self, f: impl FnOnce(&TableInner<R>) -> T) -> T {
        self.inner.read().map(|g| f(&g)).unwrap_or_default()
    }

    /// Run `f` under the write lock and deliver its proposal after unlocking.
    fn propose<S: Clone>(
        &self,
        f: impl FnOnce(&mut TableInner<R>) -> Option<Proposal<S>>,
    ) -> Option<S> {
        let proposal = self.inner.write().ok().and_then(|mut g| f(&mut g))?;
        self.mark_dirty();
        let next = proposal.next().clone();
        proposal.notify();
        Some(next)
    }

    /// Run `f` under the write lock, marking dirty when it reports a change.
    fn update(&self, f: impl FnOnce(&mut TableInner<R>) -> bool) -> bool {
        let changed = self.inner.write().map(|mut g| f(&mut g)).unwrap_or(false);
        if changed {
            self.mark_dirty();
        }
        changed
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Data access
    // -------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.read(|g| g.rows.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> Vec<R> {
        self.read(|g| g.rows.clone())
    }

    pub fn row(&self, id: &str) -> Option<R> {
        self.read(|g| g.rows.iter().find(|r| r.id() == id).cloned())
    }

    /// Full column list with current hidden flags.
    pub fn columns(&self) -> Vec<Column> {
        self.read(|g| g.visibility.columns().to_vec())
    }

    pub fn options(&self) -> TableOptions {
        self.read(|g| g.options.clone())
    }

    // -------------------------------------------------------------------------
    // Data refresh
    // -------------------------------------------------------------------------

    /// Replace the rows wholesale.
    ///
    /// Selection is pruned to the new page (unless cross-page), uncontrolled
    /// expansion is reset, a highlight or open action menu on a vanished row
    /// is dropped.
    pub fn set_rows(&self, rows: Vec<R>) {
        self.update(|g| {
            g.install_rows(rows);
            g.expansion.on_rows_changed();
            trace!("Rows replaced: {} rows", g.rows.len());
            true
        });
    }

    /// Replace the caller's disabled row ids.
    pub fn set_disabled_row_ids<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let disabled: Vec<String> = ids.into_iter().map(Into::into).collect();
        self.update(|g| {
            g.disabled = disabled;
            g.sync_selection();
            true
        });
    }

    /// Install a new column universe (uncontrolled column visibility only).
    ///
    /// Hidden flags already chosen by the user survive for fields that still
    /// exist; an active sort on a vanished or non-sortable column is cleared.
    pub fn set_columns(&self, columns: Vec<Column>) -> bool {
        self.update(|g| {
            if !g.visibility.replace_columns(columns) {
                warn!("set_columns called with controlled columns; use set_controlled_columns");
                return false;
            }
            let columns = g.visibility.columns().to_vec();
            g.sort.reconcile(&columns);
            true
        })
    }

    /// Update the caller-supplied total for cross-page selection.
    pub fn set_total_count(&self, total_count: Option<usize>) {
        self.update(|g| {
            g.options.total_count = total_count;
            g.selection.set_total_count(total_count);
            true
        });
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn selection(&self) -> SelectionState {
        self.read(|g| g.selection.state().clone())
    }

    /// Get all selected IDs (sorted).
    pub fn selected_ids(&self) -> Vec<String> {
        self.read(|g| g.selection.selected_ids())
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.read(|g| g.selection.is_selected(id))
    }

    /// Toggle one row's checkbox (or radio, in SINGLE mode).
    pub fn toggle_row_selection(&self, id: &str) -> Option<SelectionState> {
        self.propose(|g| g.selection.toggle_row(id))
    }

    /// Toggle the header checkbox.
    pub fn toggle_select_all(&self) -> Option<SelectionState> {
        self.propose(|g| g.selection.toggle_select_all())
    }

    /// Push the caller's selection (controlled mode).
    pub fn set_controlled_selection<I, S>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update(|g| g.selection.set_controlled_selection(ids))
    }

    /// Push a full selection state back (controlled mode), e.g. the proposal
    /// the change handler received. Carries the "all matching" flag along
    /// with the ids.
    pub fn set_controlled_selection_state(&self, state: SelectionState) -> bool {
        self.update(|g| g.selection.set_controlled_state(state))
    }

    /// Push the caller's cross-page "all matching" flag (controlled mode).
    pub fn set_controlled_all_matching(&self, all_matching: bool) -> bool {
        self.update(|g| g.selection.set_controlled_all_matching(all_matching))
    }

    // -------------------------------------------------------------------------
    // Sort
    // -------------------------------------------------------------------------

    pub fn sort(&self) -> SortState {
        self.read(|g| g.sort.state().clone())
    }

    /// Handle a click on a column header.
    pub fn handle_header_click(&self, field: &str) -> Option<SortState> {
        self.propose(|g| {
            let TableInner {
                sort, visibility, ..
            } = g;
            sort.handle_header_click(visibility.columns(), field)
        })
    }

    /// Push the caller's sort (controlled mode).
    pub fn set_controlled_sort(&self, next: SortState) -> bool {
        self.update(|g| {
            let TableInner {
                sort, visibility, ..
            } = g;
            sort.set_controlled_sort(visibility.columns(), next)
        })
    }

    // -------------------------------------------------------------------------
    // Column visibility
    // -------------------------------------------------------------------------

    pub fn column_visibility(&self) -> ColumnVisibilityState {
        self.read(|g| g.visibility.state().clone())
    }

    /// Whether the user may hide `field` right now.
    pub fn can_hide_column(&self, field: &str) -> bool {
        self.read(|g| g.visibility.state().can_hide(field))
    }

    /// Show or hide a column.
    pub fn toggle_column(&self, field: &str) -> Option<ColumnVisibilityState> {
        self.propose(|g| g.visibility.toggle_column(field))
    }

    /// Flip a custom content toggle.
    pub fn toggle_custom_content(&self, kind: &str) -> Option<ColumnVisibilityState> {
        self.propose(|g| Some(g.visibility.toggle_custom_content(kind)))
    }

    /// Push the caller's column list and custom content (controlled mode).
    pub fn set_controlled_columns(&self, next: ColumnVisibilityState) -> bool {
        self.update(|g| {
            if !g.visibility.set_controlled(next) {
                return false;
            }
            let columns = g.visibility.columns().to_vec();
            g.sort.reconcile(&columns);
            true
        })
    }

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    pub fn expansion(&self) -> ExpansionState {
        self.read(|g| g.expansion.state().clone())
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.read(|g| g.expansion.is_expanded(id))
    }

    /// Expand or collapse a row.
    pub fn toggle_row_expansion(&self, id: &str) -> Option<ExpansionState> {
        self.propose(|g| {
            if !g.options.expandable {
                debug!("Ignoring expansion toggle for {id}: table is not expandable");
                return None;
            }
            if !g.is_known_row(id) {
                debug!("Ignoring expansion toggle for unknown row {id}");
                return None;
            }
            g.expansion.toggle_row(id)
        })
    }

    /// Switch whether expansion toggles are accepted.
    pub fn set_allow_expansion_toggle(&self, allow: bool) {
        self.update(|g| {
            g.options.allow_expansion_toggle = allow;
            g.expansion.set_allow_toggle(allow);
            true
        });
    }

    /// Push the caller's expanded ids (controlled mode).
    pub fn set_controlled_expansion<I, S>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next = ExpansionState::new(ids);
        self.update(|g| g.expansion.set_controlled(next))
    }

    // -------------------------------------------------------------------------
    // Highlight
    // -------------------------------------------------------------------------

    pub fn highlighted_row_id(&self) -> Option<String> {
        self.read(|g| g.highlight.state().highlighted_row_id.clone())
    }

    /// Move the highlight cursor to a row.
    pub fn highlight_row(&self, id: &str) -> Option<HighlightState> {
        self.propose(|g| {
            let TableInner {
                highlight, row_ids, ..
            } = g;
            highlight.highlight(row_ids, id)
        })
    }

    /// Push the caller's highlighted row (controlled mode).
    pub fn set_controlled_highlight(&self, id: Option<String>) -> bool {
        self.update(|g| {
            g.highlight.set_controlled(HighlightState {
                highlighted_row_id: id,
            })
        })
    }

    /// Handle a plain click on a row body.
    ///
    /// With independent highlight (MULTI mode) the click moves the highlight
    /// and leaves the checkboxes alone. Otherwise it toggles the row's
    /// selection; with selection off it does nothing.
    pub fn click_row(&self, id: &str) -> RowClick {
        let (mode, independent) =
            self.read(|g| (g.selection.mode(), g.options.independent_highlight));
        if independent && mode == SelectionMode::Multi {
            return self
                .highlight_row(id)
                .map_or(RowClick::Ignored, RowClick::Highlighted);
        }
        match mode {
            SelectionMode::None => RowClick::Ignored,
            SelectionMode::Single | SelectionMode::Multi => self
                .toggle_row_selection(id)
                .map_or(RowClick::Ignored, RowClick::Selected),
        }
    }

    // -------------------------------------------------------------------------
    // Action menu
    // -------------------------------------------------------------------------

    pub fn action_menu(&self) -> ActionMenuState {
        self.read(|g| g.action_menu.state())
    }

    /// Open a row's action menu, closing any other; re-clicking the open row
    /// closes it.
    pub fn toggle_action_menu(&self, id: &str) -> bool {
        self.update(|g| {
            if !g.options.row_actions {
                debug!("Ignoring action menu for {id}: row actions disabled");
                return false;
            }
            if !g.is_known_row(id) {
                debug!("Ignoring action menu for unknown row {id}");
                return false;
            }
            g.action_menu.toggle(id)
        })
    }

    pub fn close_action_menu(&self) -> bool {
        self.update(|g| g.action_menu.close())
    }

    /// The host saw a click outside the open menu.
    pub fn handle_outside_click(&self) -> bool {
        self.close_action_menu()
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the table state has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<R: TableRow> Clone for TableController<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}
