//! Renderer-agnostic state engine for data-grid tables.
//!
//! The engine tracks which rows are selected, which column is sorted and in
//! which direction, which columns and custom content are visible, which rows
//! are expanded, and which row's action menu is open. Every concern can be
//! owned by the caller ("controlled") or by the engine ("uncontrolled"); see
//! [`source`]. A [`TableController`] composes the leaf models and derives a
//! [`TableView`] that a view layer paints without re-deriving any logic.

pub mod action_menu;
pub mod column;
pub mod error;
pub mod expansion;
pub mod highlight;
pub mod row;
pub mod selection;
pub mod sort;
pub mod source;
pub mod table;
pub mod visibility;

pub use action_menu::{ActionMenuState, ListenerRegistry, OutsideClickHub, Subscription};
pub use column::{Alignment, Column, SortDirection};
pub use error::ConfigError;
pub use expansion::ExpansionState;
pub use highlight::HighlightState;
pub use row::{Row, TableRow};
pub use selection::{SelectionMode, SelectionState};
pub use sort::SortState;
pub use table::{
    BodyRow, CheckboxState, HeaderCell, RowClick, SelectionSummary, SortIndicator, TableBuilder,
    TableController, TableId, TableOptions, TableView,
};
pub use visibility::ColumnVisibilityState;

pub mod prelude {
    pub use crate::action_menu::{ListenerRegistry, OutsideClickHub};
    pub use crate::column::{Alignment, Column, SortDirection};
    pub use crate::error::ConfigError;
    pub use crate::expansion::ExpansionState;
    pub use crate::highlight::HighlightState;
    pub use crate::row::{Row, TableRow};
    pub use crate::selection::{SelectionMode, SelectionState};
    pub use crate::sort::SortState;
    pub use crate::table::{
        RowClick, SortIndicator, TableBuilder, TableController, TableOptions, TableView,
    };
    pub use crate::visibility::ColumnVisibilityState;
}
