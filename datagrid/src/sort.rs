//! Single-column sort tracking.
//!
//! The model only records *which* field is active and in which direction.
//! Ordering the rows (including tie-breaks) is the caller's job, in response
//! to the emitted state.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::column::{Column, SortDirection};
use crate::source::{Proposal, StateSource};

/// The active sort, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub active_field: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    /// No active sort.
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            active_field: Some(field.into()),
            direction,
        }
    }

    /// Direction of `field` if it is the active sort column.
    pub fn direction_of(&self, field: &str) -> Option<SortDirection> {
        (self.active_field.as_deref() == Some(field)).then_some(self.direction)
    }

    /// Seed from the first sortable column carrying an initial direction.
    pub fn from_columns(columns: &[Column]) -> Self {
        columns
            .iter()
            .find(|c| c.sortable && c.sort_direction.is_some())
            .map(|c| Self::by(c.field.clone(), c.sort_direction.unwrap_or_default()))
            .unwrap_or_else(Self::unsorted)
    }

    fn is_valid_for(&self, columns: &[Column]) -> bool {
        match &self.active_field {
            None => true,
            Some(field) => columns.iter().any(|c| &c.field == field && c.sortable),
        }
    }
}

/// Sort bookkeeping for one table.
#[derive(Debug)]
pub struct SortModel {
    source: StateSource<SortState>,
}

impl SortModel {
    pub fn new(source: StateSource<SortState>) -> Self {
        Self { source }
    }

    pub fn state(&self) -> &SortState {
        self.source.current()
    }

    /// Handle a click on the header of `field`.
    ///
    /// Clicking the active column flips its direction; clicking another
    /// sortable column makes it active in ascending order. Unknown or
    /// non-sortable columns are ignored.
    pub fn handle_header_click(
        &mut self,
        columns: &[Column],
        field: &str,
    ) -> Option<Proposal<SortState>> {
        let Some(column) = columns.iter().find(|c| c.field == field) else {
            debug!("Ignoring header click on unknown column {field}");
            return None;
        };
        if !column.sortable {
            debug!("Ignoring header click on non-sortable column {field}");
            return None;
        }

        let current = self.state();
        let next = match current.direction_of(field) {
            Some(direction) => SortState::by(field, direction.flipped()),
            None => SortState::by(field, SortDirection::Asc),
        };
        trace!("Sort -> {:?} {:?}", next.active_field, next.direction);
        Some(self.source.propose(next))
    }

    /// Replace the controlled sort. Rejected if it names a column that is not
    /// sortable or for uncontrolled models.
    pub fn set_controlled_sort(&mut self, columns: &[Column], next: SortState) -> bool {
        if !next.is_valid_for(columns) {
            debug!("Rejecting controlled sort on {:?}: not a sortable column", next.active_field);
            return false;
        }
        if !self.source.sync(next) {
            log::warn!("set_controlled_sort called on an uncontrolled sort; ignoring");
            return false;
        }
        true
    }

    /// Keep the active field pointing at a sortable column after the column
    /// list changed. Returns `true` if the sort was cleared.
    pub fn reconcile(&mut self, columns: &[Column]) -> bool {
        if self.state().is_valid_for(columns) {
            return false;
        }
        debug!(
            "Clearing sort on {:?}: column is gone or no longer sortable",
            self.state().active_field
        );
        self.source.refresh(|state| state.active_field = None);
        true
    }
}
