//! Table view derivation.

use crate::row::TableRow;
use crate::selection::SelectionMode;

use super::state::{TableController, TableInner};
use super::view::{
    ActionMenuAffordance, BodyCell, BodyRow, CheckboxState, ExpansionAffordance, HeaderCell,
    HeaderRow, SelectionSummary, SortIndicator, TableView,
};

impl<R: TableRow> TableController<R> {
    /// Derive the render-ready description of the table.
    pub fn view(&self) -> TableView {
        let id = self.id_string();
        self.inner
            .read()
            .map(|g| render::<R>(&g, id.clone()))
            .unwrap_or_else(|_| empty_view(id))
    }

    /// Selection figures for the header checkbox and banners.
    pub fn selection_summary(&self) -> SelectionSummary {
        self.inner
            .read()
            .map(|g| summarize::<R>(&g))
            .unwrap_or_else(|_| SelectionSummary::empty())
    }
}

impl SelectionSummary {
    fn empty() -> Self {
        Self {
            mode: SelectionMode::None,
            selected_count: 0,
            effective_count: 0,
            select_all: false,
            indeterminate: false,
            all_matching: false,
            total_count: None,
        }
    }
}

fn empty_view(id: String) -> TableView {
    TableView {
        id,
        selection_mode: SelectionMode::None,
        header: HeaderRow {
            select_all: None,
            cells: Vec::new(),
            expansion_column: false,
            actions_column: false,
        },
        rows: Vec::new(),
        summary: SelectionSummary::empty(),
        custom_content: Vec::new(),
    }
}

fn summarize<R: TableRow>(g: &TableInner<R>) -> SelectionSummary {
    let state = g.selection.state();
    SelectionSummary {
        mode: state.mode,
        selected_count: state.len(),
        effective_count: state.effective_count(),
        select_all: state.select_all,
        indeterminate: state.indeterminate,
        all_matching: state.all_matching,
        total_count: state.total_count,
    }
}

fn render<R: TableRow>(g: &TableInner<R>, id: String) -> TableView {
    let mode = g.selection.mode();
    let visibility = g.visibility.state();
    let sort = g.sort.state();
    let columns: Vec<_> = visibility.visible_columns().collect();

    let select_all = (mode == SelectionMode::Multi).then(|| {
        let state = g.selection.state();
        CheckboxState {
            checked: state.select_all,
            indeterminate: state.indeterminate,
            disabled: g.row_ids.iter().all(|id| g.selection.is_disabled(id)),
        }
    });

    let cells = columns
        .iter()
        .map(|c| HeaderCell {
            field: c.field.clone(),
            label: c.header_name.clone(),
            width: c.width,
            align: c.align,
            sort: match (c.sortable, sort.direction_of(&c.field)) {
                (false, _) => SortIndicator::None,
                (true, None) => SortIndicator::Inactive,
                (true, Some(direction)) => SortIndicator::Active(direction),
            },
            can_hide: visibility.can_hide(&c.field),
        })
        .collect();

    let expandable = g.options.expandable;
    let row_actions = g.options.row_actions;
    let highlight = g.highlight.state();

    let rows = g
        .rows
        .iter()
        .map(|row| {
            let id = row.id();
            let selection = (mode != SelectionMode::None).then(|| CheckboxState {
                checked: g.selection.is_selected(&id),
                indeterminate: false,
                disabled: g.selection.is_disabled(&id),
            });
            let expansion = expandable.then(|| ExpansionAffordance {
                expanded: g.expansion.is_expanded(&id),
                can_toggle: g.expansion.allow_toggle(),
            });
            let action_menu = row_actions.then(|| ActionMenuAffordance {
                open: g.action_menu.is_open_for(&id),
            });
            let cells = columns
                .iter()
                .filter(|c| !c.has_no_cell)
                .map(|c| BodyCell {
                    field: c.field.clone(),
                    value: row.field(&c.field),
                    align: c.align,
                })
                .collect();
            BodyRow {
                highlighted: highlight.is_highlighted(&id),
                id,
                selection,
                expansion,
                action_menu,
                cells,
            }
        })
        .collect();

    TableView {
        id,
        selection_mode: mode,
        header: HeaderRow {
            select_all,
            cells,
            expansion_column: expandable,
            actions_column: row_actions,
        },
        rows,
        summary: summarize(g),
        custom_content: visibility.displayed_custom_content.iter().cloned().collect(),
    }
}
