mod common;

use common::{Recorder, init_logging, rows};
use datagrid::prelude::*;

fn hideable() -> Vec<Column> {
    vec![
        Column::new("a", "A"),
        Column::new("b", "B"),
        Column::new("c", "C"),
    ]
}

fn build(columns: Vec<Column>) -> TableController<Row> {
    init_logging();
    TableBuilder::new(columns).rows(rows(2)).build().unwrap()
}

fn hidden(table: &TableController<Row>) -> Vec<String> {
    table
        .columns()
        .into_iter()
        .filter(|c| c.hidden)
        .map(|c| c.field)
        .collect()
}

#[test]
fn test_last_visible_column_cannot_be_hidden() {
    let table = build(hideable());

    assert!(table.toggle_column("a").is_some());
    assert!(table.toggle_column("b").is_some());
    assert!(!table.can_hide_column("c"));
    assert!(table.toggle_column("c").is_none());
    assert_eq!(hidden(&table), vec!["a", "b"]);

    table.toggle_column("a");
    assert!(table.can_hide_column("c"));
    assert!(table.toggle_column("c").is_some());
    assert_eq!(hidden(&table), vec!["b", "c"]);
}

#[test]
fn test_disable_hiding_is_respected() {
    let table = build(vec![
        Column::new("id", "ID").disable_hiding(),
        Column::new("name", "Name"),
        Column::new("email", "Email"),
    ]);

    assert!(table.toggle_column("id").is_none());
    table.toggle_column("name");
    // "id" cannot be hidden, so it does not count toward the floor.
    assert!(table.toggle_column("email").is_none());
}

#[test]
fn test_header_only_columns_do_not_satisfy_floor() {
    let table = build(vec![
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("actions", "").without_cell(),
    ]);

    table.toggle_column("name");
    assert!(table.toggle_column("email").is_none());
    assert!(table.toggle_column("actions").is_some());
}

#[test]
fn test_toggle_returns_full_list_without_touching_original() {
    let original = hideable();
    let table = build(original.clone());

    let next = table.toggle_column("b").unwrap();
    assert_eq!(next.columns.len(), 3);
    assert!(next.columns[1].hidden);
    assert!(original.iter().all(|c| !c.hidden));
}

#[test]
fn test_hidden_columns_are_left_out_of_view() {
    let table = build(hideable());
    table.toggle_column("b");

    let view = table.view();
    let header: Vec<_> = view.header.cells.iter().map(|c| c.field.as_str()).collect();
    assert_eq!(header, vec!["a", "c"]);
    let cells: Vec<_> = view.rows[0].cells.iter().map(|c| c.field.as_str()).collect();
    assert_eq!(cells, vec!["a", "c"]);
}

#[test]
fn test_custom_content_has_no_floor() {
    let table = build(hideable());

    let next = table.toggle_custom_content("details").unwrap();
    assert!(next.is_custom_content_displayed("details"));
    let next = table.toggle_custom_content("details").unwrap();
    assert!(next.displayed_custom_content.is_empty());
    assert!(table.view().custom_content.is_empty());
}

#[test]
fn test_default_hidden_columns() {
    init_logging();
    let table: TableController<Row> = TableBuilder::new(hideable())
        .default_hidden_columns(["c"])
        .displayed_custom_content(["summary"])
        .build()
        .unwrap();

    assert_eq!(hidden(&table), vec!["c"]);
    assert_eq!(table.view().custom_content, vec!["summary"]);
}

#[test]
fn test_controlled_columns() {
    init_logging();
    let recorder = Recorder::<ColumnVisibilityState>::new();
    let table: TableController<Row> = TableBuilder::new(hideable())
        .displayed_columns(hideable())
        .on_columns_change(recorder.handler())
        .build()
        .unwrap();

    let proposed = table.toggle_column("a").unwrap();
    assert!(hidden(&table).is_empty());
    assert_eq!(recorder.calls().len(), 1);

    assert!(table.set_controlled_columns(proposed));
    assert_eq!(hidden(&table), vec!["a"]);
    assert!(!table.set_columns(hideable()));
}

#[test]
fn test_set_columns_keeps_user_choices() {
    let table = build(hideable());
    table.toggle_column("b");

    let mut next = hideable();
    next.push(Column::new("d", "D").hidden());
    table.set_columns(next);
    assert_eq!(hidden(&table), vec!["b", "d"]);
}

#[test]
fn test_set_columns_keeps_one_column_visible() {
    let table = build(vec![Column::new("a", "A"), Column::new("b", "B")]);
    table.toggle_column("a");
    assert_eq!(hidden(&table), vec!["a"]);

    // "b" goes away and "a" keeps the user's hidden flag, which would leave
    // nothing to show.
    table.set_columns(vec![Column::new("a", "A")]);
    assert!(hidden(&table).is_empty());
    assert_eq!(table.view().header.cells.len(), 1);
}

#[test]
fn test_controlled_columns_keep_one_column_visible() {
    init_logging();
    let table: TableController<Row> = TableBuilder::new(hideable())
        .displayed_columns(hideable())
        .on_columns_change(|_: &ColumnVisibilityState| {})
        .build()
        .unwrap();

    let all_hidden = hideable().into_iter().map(Column::hidden).collect();
    assert!(table.set_controlled_columns(ColumnVisibilityState::new(all_hidden)));
    assert_eq!(hidden(&table), vec!["b", "c"]);
}

#[test]
fn test_hiding_every_column_up_front_keeps_the_first() {
    init_logging();
    let table: TableController<Row> = TableBuilder::new(vec![
        Column::new("id", "ID").disable_hiding(),
        Column::new("actions", "").without_cell(),
        Column::new("name", "Name"),
        Column::new("email", "Email"),
    ])
    .default_hidden_columns(["actions", "name", "email"])
    .build()
    .unwrap();

    assert_eq!(hidden(&table), vec!["actions", "email"]);
}
