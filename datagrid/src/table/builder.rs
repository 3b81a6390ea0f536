//! Table construction and contract validation.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::action_menu::OutsideClickHub;
use crate::column::Column;
use crate::error::ConfigError;
use crate::expansion::ExpansionState;
use crate::highlight::HighlightState;
use crate::row::TableRow;
use crate::selection::{SelectionMode, SelectionState};
use crate::sort::SortState;
use crate::source::{ChangeHandler, StateSource};
use crate::visibility::ColumnVisibilityState;

use super::config::TableOptions;
use super::state::TableController;

/// Controlled value, uncontrolled default and handler for one concern.
struct Slot<V, S> {
    controlled: Option<V>,
    default: Option<V>,
    on_change: Option<ChangeHandler<S>>,
}

impl<V, S> Default for Slot<V, S> {
    fn default() -> Self {
        Self {
            controlled: None,
            default: None,
            on_change: None,
        }
    }
}

impl<V, S: Clone> Slot<V, S> {
    fn resolve(
        self,
        field: &'static str,
        seed: impl FnOnce() -> S,
        into_state: impl Fn(V) -> S,
    ) -> Result<StateSource<S>, ConfigError> {
        match (self.controlled, self.default) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingState { field }),
            (Some(value), None) => {
                let on_change = self
                    .on_change
                    .ok_or(ConfigError::MissingChangeHandler { field })?;
                Ok(StateSource::controlled(into_state(value), on_change))
            }
            (None, default) => {
                let value = match default {
                    Some(value) => into_state(value),
                    None => seed(),
                };
                Ok(StateSource::uncontrolled(value, self.on_change))
            }
        }
    }
}

/// Builder for [`TableController`].
///
/// Every stateful concern is either controlled (the caller passes the value
/// plus a change handler and pushes updates back with the matching
/// `set_controlled_*` call) or uncontrolled (optionally seeded with a
/// default). Supplying both a controlled value and a default for the same
/// concern is rejected by [`build`](Self::build).
///
/// ```
/// use datagrid::prelude::*;
///
/// let table = TableBuilder::new(vec![Column::new("name", "Name").sortable()])
///     .rows(vec![Row::new("1").with("name", "Ada"), Row::new("2").with("name", "Grace")])
///     .options(TableOptions::new(SelectionMode::Multi))
///     .disabled_row_ids(["2"])
///     .build()
///     .unwrap();
///
/// table.toggle_select_all();
/// assert_eq!(table.selected_ids(), vec!["1".to_string()]);
/// ```
pub struct TableBuilder<R: TableRow> {
    rows: Vec<R>,
    columns: Vec<Column>,
    options: TableOptions,
    disabled_row_ids: Vec<String>,
    custom_content: Vec<String>,
    outside_click_hub: Option<Arc<dyn OutsideClickHub>>,
    selection: Slot<Vec<String>, SelectionState>,
    sort: Slot<SortState, SortState>,
    visibility: Slot<Vec<Column>, ColumnVisibilityState>,
    expansion: Slot<Vec<String>, ExpansionState>,
    highlight: Slot<Option<String>, HighlightState>,
}

impl<R: TableRow> TableBuilder<R> {
    /// Start a table over the given column universe.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            rows: Vec::new(),
            columns,
            options: TableOptions::default(),
            disabled_row_ids: Vec::new(),
            custom_content: Vec::new(),
            outside_click_hub: None,
            selection: Slot::default(),
            sort: Slot::default(),
            visibility: Slot::default(),
            expansion: Slot::default(),
            highlight: Slot::default(),
        }
    }

    pub fn rows(mut self, rows: Vec<R>) -> Self {
        self.rows = rows;
        self
    }

    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn disabled_row_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled_row_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Custom content toggles that start enabled.
    pub fn displayed_custom_content<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_content = kinds.into_iter().map(Into::into).collect();
        self
    }

    /// Host capability for outside-click listeners used by action menus.
    pub fn outside_click_hub(mut self, hub: Arc<dyn OutsideClickHub>) -> Self {
        self.outside_click_hub = Some(hub);
        self
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Controlled selected ids.
    pub fn selected_row_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.controlled = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Uncontrolled initial selection. Without it, rows flagged as
    /// preselected seed the selection.
    pub fn default_selected_row_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.default = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn on_selection_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&SelectionState) + Send + Sync + 'static,
    {
        self.selection.on_change = Some(Arc::new(f));
        self
    }

    // -------------------------------------------------------------------------
    // Sort
    // -------------------------------------------------------------------------

    /// Controlled sort.
    pub fn sorted_column(mut self, sort: SortState) -> Self {
        self.sort.controlled = Some(sort);
        self
    }

    /// Uncontrolled initial sort. Without it, the first sortable column with
    /// a `sort_direction` seeds the sort.
    pub fn default_sorted_column(mut self, sort: SortState) -> Self {
        self.sort.default = Some(sort);
        self
    }

    pub fn on_sort<F>(mut self, f: F) -> Self
    where
        F: Fn(&SortState) + Send + Sync + 'static,
    {
        self.sort.on_change = Some(Arc::new(f));
        self
    }

    // -------------------------------------------------------------------------
    // Column visibility
    // -------------------------------------------------------------------------

    /// Controlled column list (with hidden flags).
    pub fn displayed_columns(mut self, columns: Vec<Column>) -> Self {
        self.visibility.controlled = Some(columns);
        self
    }

    /// Uncontrolled initial hidden fields, overriding the columns' own flags.
    pub fn default_hidden_columns<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hidden: HashSet<String> = fields.into_iter().map(Into::into).collect();
        let columns = self
            .columns
            .iter()
            .cloned()
            .map(|mut c| {
                c.hidden = hidden.contains(&c.field) && !c.disable_hiding;
                c
            })
            .collect();
        self.visibility.default = Some(columns);
        self
    }

    pub fn on_columns_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&ColumnVisibilityState) + Send + Sync + 'static,
    {
        self.visibility.on_change = Some(Arc::new(f));
        self
    }

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    pub fn expanded_row_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expansion.controlled = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn default_expanded_row_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expansion.default = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn on_expansion_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&ExpansionState) + Send + Sync + 'static,
    {
        self.expansion.on_change = Some(Arc::new(f));
        self
    }

    // -------------------------------------------------------------------------
    // Highlight
    // -------------------------------------------------------------------------

    pub fn highlighted_row_id(mut self, id: Option<String>) -> Self {
        self.highlight.controlled = Some(id);
        self
    }

    pub fn default_highlighted_row_id(mut self, id: impl Into<String>) -> Self {
        self.highlight.default = Some(Some(id.into()));
        self
    }

    pub fn on_highlight_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&HighlightState) + Send + Sync + 'static,
    {
        self.highlight.on_change = Some(Arc::new(f));
        self
    }

    /// Validate the configuration and create the table.
    pub fn build(self) -> Result<TableController<R>, ConfigError> {
        check_unique_fields(&self.columns)?;
        if let Some(displayed) = &self.visibility.controlled {
            check_unique_fields(displayed)?;
        }
        let mut ids = HashSet::new();
        for row in &self.rows {
            let id = row.id();
            if ids.contains(&id) {
                return Err(ConfigError::DuplicateRow(id));
            }
            ids.insert(id);
        }

        let options = self.options;
        if options.cross_page_selection && options.selection_mode != SelectionMode::Multi {
            return Err(ConfigError::CrossPageRequiresMulti);
        }

        let selection_state = |ids: Vec<String>| SelectionState {
            selected_ids: ids.into_iter().collect(),
            cross_page_enabled: options.cross_page_selection,
            total_count: options.total_count,
            ..SelectionState::new(options.selection_mode)
        };
        let preselected: Vec<String> = self
            .rows
            .iter()
            .filter(|r| r.preselected())
            .map(|r| r.id())
            .collect();
        let selection = self.selection.resolve(
            "selected_row_ids",
            || selection_state(preselected),
            &selection_state,
        )?;

        let sort = self.sort.resolve(
            "sorted_column",
            || SortState::from_columns(&self.columns),
            |s| s,
        )?;

        let custom_content: BTreeSet<String> = self.custom_content.into_iter().collect();
        let visibility_state = |columns: Vec<Column>| {
            let mut state = ColumnVisibilityState {
                columns,
                displayed_custom_content: custom_content.clone(),
            };
            state.restore_visible_floor();
            state
        };
        let visibility = self.visibility.resolve(
            "displayed_columns",
            || visibility_state(self.columns.clone()),
            &visibility_state,
        )?;

        let expansion = self.expansion.resolve(
            "expanded_row_ids",
            ExpansionState::default,
            ExpansionState::new,
        )?;

        let highlight = self.highlight.resolve(
            "highlighted_row_id",
            HighlightState::default,
            |id| HighlightState {
                highlighted_row_id: id,
            },
        )?;

        Ok(TableController::from_parts(
            self.rows,
            self.disabled_row_ids,
            options,
            selection,
            sort,
            visibility,
            expansion,
            highlight,
            self.outside_click_hub,
        ))
    }
}

fn check_unique_fields(columns: &[Column]) -> Result<(), ConfigError> {
    let mut fields = HashSet::new();
    for column in columns {
        if !fields.insert(column.field.as_str()) {
            return Err(ConfigError::DuplicateColumn(column.field.clone()));
        }
    }
    Ok(())
}
