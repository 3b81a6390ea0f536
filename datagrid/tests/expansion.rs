mod common;

use common::{Recorder, ids, init_logging, rows};
use datagrid::prelude::*;

fn expandable(options: TableOptions) -> TableController<Row> {
    init_logging();
    TableBuilder::new(common::columns())
        .rows(rows(4))
        .options(options.expandable())
        .build()
        .unwrap()
}

fn expanded(table: &TableController<Row>) -> Vec<String> {
    table.expansion().expanded_ids.into_iter().collect()
}

#[test]
fn test_double_toggle_round_trips() {
    let table = expandable(TableOptions::default());
    let before = table.expansion();

    table.toggle_row_expansion("2");
    assert!(table.is_expanded("2"));
    table.toggle_row_expansion("2");
    assert_eq!(table.expansion(), before);
}

#[test]
fn test_refresh_resets_uncontrolled_expansion() {
    let table = expandable(TableOptions::default());
    table.toggle_row_expansion("1");
    table.toggle_row_expansion("3");

    table.set_rows(rows(4));
    assert!(expanded(&table).is_empty());
}

#[test]
fn test_toggle_ignored_when_not_allowed() {
    let table = expandable(TableOptions::default().allow_expansion_toggle(false));
    assert!(table.toggle_row_expansion("1").is_none());

    table.set_allow_expansion_toggle(true);
    assert!(table.toggle_row_expansion("1").is_some());
    assert_eq!(expanded(&table), ids(&["1"]));
}

#[test]
fn test_non_expandable_table_ignores_toggles() {
    let table = common::table(2, SelectionMode::None);
    assert!(table.toggle_row_expansion("1").is_none());
    assert!(table.view().rows[0].expansion.is_none());
}

#[test]
fn test_unknown_row_is_ignored() {
    let table = expandable(TableOptions::default());
    assert!(table.toggle_row_expansion("nope").is_none());
}

#[test]
fn test_controlled_expansion_survives_refresh() {
    init_logging();
    let recorder = Recorder::<ExpansionState>::new();
    let table = TableBuilder::new(common::columns())
        .rows(rows(3))
        .options(TableOptions::default().expandable())
        .expanded_row_ids(["2"])
        .on_expansion_change(recorder.handler())
        .build()
        .unwrap();

    let proposed = table.toggle_row_expansion("3").unwrap();
    assert_eq!(proposed.expanded_ids.len(), 2);
    assert_eq!(expanded(&table), ids(&["2"]));

    table.set_rows(rows(3));
    assert_eq!(expanded(&table), ids(&["2"]));

    assert!(table.set_controlled_expansion(["1"]));
    assert_eq!(expanded(&table), ids(&["1"]));
    assert_eq!(recorder.calls().len(), 1);
}

#[test]
fn test_view_reports_expansion() {
    let table = expandable(TableOptions::default());
    table.toggle_row_expansion("2");

    let view = table.view();
    assert!(view.header.expansion_column);
    let row = view.row("2").unwrap();
    assert_eq!(row.expansion.map(|e| e.expanded), Some(true));
    assert_eq!(view.row("1").unwrap().expansion.map(|e| e.expanded), Some(false));
}
