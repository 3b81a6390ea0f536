mod common;

use std::collections::BTreeSet;

use common::{init_logging, rows};
use datagrid::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Toggle(usize),
    SelectAll,
    Refresh(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..14).prop_map(Op::Toggle),
        1 => Just(Op::SelectAll),
        1 => (0usize..12).prop_map(Op::Refresh),
    ]
}

fn multi_table(n: usize, disabled: &BTreeSet<String>) -> TableController<Row> {
    init_logging();
    TableBuilder::new(common::columns())
        .rows(rows(n))
        .options(TableOptions::new(SelectionMode::Multi))
        .disabled_row_ids(disabled.iter().cloned())
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn test_selection_stays_within_selectable_rows(
        n in 1usize..12,
        disabled in proptest::collection::btree_set(1usize..12, 0..4),
        ops in proptest::collection::vec(op(), 0..40),
    ) {
        let disabled: BTreeSet<String> = disabled.iter().map(|i| i.to_string()).collect();
        let table = multi_table(n, &disabled);
        let mut current_rows = n;

        for op in ops {
            match op {
                Op::Toggle(i) => { table.toggle_row_selection(&i.to_string()); }
                Op::SelectAll => { table.toggle_select_all(); }
                Op::Refresh(m) => {
                    current_rows = m;
                    table.set_rows(rows(m));
                }
            }

            let row_ids: BTreeSet<String> = (1..=current_rows).map(|i| i.to_string()).collect();
            let selectable: BTreeSet<String> = row_ids.difference(&disabled).cloned().collect();
            let state = table.selection();

            prop_assert!(state.selected_ids.is_subset(&selectable));
            prop_assert_eq!(
                state.select_all,
                !selectable.is_empty() && state.selected_ids.len() == selectable.len()
            );
            prop_assert_eq!(
                state.indeterminate,
                !state.selected_ids.is_empty() && state.selected_ids.len() < selectable.len()
            );
        }
    }

    #[test]
    fn test_single_mode_never_exceeds_one(
        clicks in proptest::collection::vec(0usize..8, 0..30),
    ) {
        let table = common::table(6, SelectionMode::Single);
        for click in clicks {
            table.toggle_row_selection(&click.to_string());
            prop_assert!(table.selected_ids().len() <= 1);
        }
    }

    #[test]
    fn test_sort_is_always_on_a_sortable_column(
        clicks in proptest::collection::vec(prop_oneof![Just("name"), Just("status"), Just("owner"), Just("nope")], 0..20),
    ) {
        let table = common::table(2, SelectionMode::None);
        let mut expected: Option<(String, SortDirection)> = None;
        for field in clicks {
            table.handle_header_click(field);
            if field == "name" || field == "status" {
                expected = Some(match expected {
                    Some((active, direction)) if active == field => (active, direction.flipped()),
                    _ => (field.to_string(), SortDirection::Asc),
                });
            }
            let sort = table.sort();
            prop_assert_eq!(
                sort.active_field.clone().zip(Some(sort.direction)),
                expected.clone()
            );
        }
    }

    #[test]
    fn test_expansion_double_toggle_is_identity(
        seed in proptest::collection::vec(1usize..6, 0..4),
        target in 1usize..6,
    ) {
        init_logging();
        let table = TableBuilder::new(common::columns())
            .rows(rows(5))
            .options(TableOptions::default().expandable())
            .default_expanded_row_ids(seed.iter().map(|i| i.to_string()))
            .build()
            .unwrap();
        let before = table.expansion();
        table.toggle_row_expansion(&target.to_string());
        table.toggle_row_expansion(&target.to_string());
        prop_assert_eq!(table.expansion(), before);
    }
}
