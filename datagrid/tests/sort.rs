mod common;

use common::{Recorder, init_logging, rows, table};
use datagrid::prelude::*;

#[test]
fn test_header_clicks_cycle_direction() {
    let table = table(3, SelectionMode::None);
    assert_eq!(table.sort(), SortState::unsorted());

    table.handle_header_click("name");
    assert_eq!(table.sort(), SortState::by("name", SortDirection::Asc));

    table.handle_header_click("name");
    assert_eq!(table.sort(), SortState::by("name", SortDirection::Desc));

    table.handle_header_click("name");
    assert_eq!(table.sort(), SortState::by("name", SortDirection::Asc));
}

#[test]
fn test_new_column_resets_to_ascending() {
    let table = table(3, SelectionMode::None);
    table.handle_header_click("name");
    table.handle_header_click("name");

    table.handle_header_click("status");
    assert_eq!(table.sort(), SortState::by("status", SortDirection::Asc));

    let view = table.view();
    assert_eq!(view.header_cell("name").unwrap().sort, SortIndicator::Inactive);
    assert_eq!(
        view.header_cell("status").unwrap().sort,
        SortIndicator::Active(SortDirection::Asc)
    );
    assert_eq!(view.header_cell("owner").unwrap().sort, SortIndicator::None);
}

#[test]
fn test_non_sortable_and_unknown_columns_are_ignored() {
    let table = table(3, SelectionMode::None);
    assert!(table.handle_header_click("owner").is_none());
    assert!(table.handle_header_click("missing").is_none());
    assert_eq!(table.sort().active_field, None);
}

#[test]
fn test_default_sort_seeded_from_column() {
    init_logging();
    let table: TableController<Row> = TableBuilder::new(vec![
        Column::new("name", "Name").sortable(),
        Column::new("age", "Age")
            .sortable()
            .sort_direction(SortDirection::Desc),
    ])
    .build()
    .unwrap();

    assert_eq!(table.sort(), SortState::by("age", SortDirection::Desc));
    table.handle_header_click("age");
    assert_eq!(table.sort(), SortState::by("age", SortDirection::Asc));
}

#[test]
fn test_controlled_sort_emits_and_waits_for_caller() {
    init_logging();
    let recorder = Recorder::<SortState>::new();
    let table = TableBuilder::new(common::columns())
        .rows(rows(2))
        .sorted_column(SortState::by("name", SortDirection::Desc))
        .on_sort(recorder.handler())
        .build()
        .unwrap();

    let proposed = table.handle_header_click("name").unwrap();
    assert_eq!(proposed, SortState::by("name", SortDirection::Asc));
    assert_eq!(recorder.calls(), vec![proposed.clone()]);
    assert_eq!(table.sort(), SortState::by("name", SortDirection::Desc));

    assert!(table.set_controlled_sort(proposed));
    assert_eq!(table.sort(), SortState::by("name", SortDirection::Asc));
}

#[test]
fn test_controlled_sort_rejects_non_sortable_column() {
    init_logging();
    let table = TableBuilder::new(common::columns())
        .rows(rows(2))
        .sorted_column(SortState::unsorted())
        .on_sort(|_: &SortState| {})
        .build()
        .unwrap();

    assert!(!table.set_controlled_sort(SortState::by("owner", SortDirection::Asc)));
    assert_eq!(table.sort().active_field, None);
}

#[test]
fn test_sort_cleared_when_column_disappears() {
    let table = table(2, SelectionMode::None);
    table.handle_header_click("status");

    table.set_columns(vec![
        Column::new("name", "Name").sortable(),
        Column::new("status", "Status"),
    ]);
    assert_eq!(table.sort().active_field, None);
}
