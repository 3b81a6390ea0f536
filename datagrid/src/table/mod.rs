//! Table controller - the orchestrating facade over the leaf models.
//!
//! The controller provides:
//! - Row selection (none, single or multi-select, cross-page select-all)
//! - Single-column sorting (app-controlled ordering)
//! - Column visibility with a "last visible column" floor
//! - Expandable rows and an independent highlight cursor
//! - Per-row action menus with outside-click teardown
//! - A render-ready [`TableView`] for the view layer
//!
//! # Example
//!
//! ```
//! use datagrid::prelude::*;
//!
//! let columns = vec![
//!     Column::new("name", "Name").sortable(),
//!     Column::new("email", "Email"),
//! ];
//! let rows = vec![
//!     Row::new("u1").with("name", "Ada").with("email", "ada@example.com"),
//!     Row::new("u2").with("name", "Grace").with("email", "grace@example.com"),
//! ];
//! let table = TableBuilder::new(columns)
//!     .rows(rows)
//!     .options(TableOptions::new(SelectionMode::Single))
//!     .build()
//!     .unwrap();
//!
//! table.handle_header_click("name");
//! table.toggle_row_selection("u2");
//!
//! let view = table.view();
//! assert!(view.row("u2").unwrap().is_selected());
//! assert_eq!(
//!     view.header_cell("name").unwrap().sort,
//!     SortIndicator::Active(SortDirection::Asc)
//! );
//! ```

mod builder;
mod config;
mod render;
mod state;
mod view;

pub use builder::TableBuilder;
pub use config::TableOptions;
pub use state::{RowClick, TableController, TableId};
pub use view::{
    ActionMenuAffordance, BodyCell, BodyRow, CheckboxState, ExpansionAffordance, HeaderCell,
    HeaderRow, SelectionSummary, SortIndicator, TableView,
};
