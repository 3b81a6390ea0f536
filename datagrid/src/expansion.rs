//! Expandable rows.

use std::collections::BTreeSet;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::source::{Proposal, StateSource};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionState {
    pub expanded_ids: BTreeSet<String>,
}

impl ExpansionState {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expanded_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded_ids.contains(id)
    }
}

/// Expansion bookkeeping for one table.
///
/// Uncontrolled expansion does not survive a data refresh; controlled
/// expansion is left entirely to the caller.
#[derive(Debug)]
pub struct ExpansionModel {
    source: StateSource<ExpansionState>,
    allow_toggle: bool,
}

impl ExpansionModel {
    pub fn new(source: StateSource<ExpansionState>, allow_toggle: bool) -> Self {
        Self {
            source,
            allow_toggle,
        }
    }

    pub fn state(&self) -> &ExpansionState {
        self.source.current()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.state().is_expanded(id)
    }

    pub fn allow_toggle(&self) -> bool {
        self.allow_toggle
    }

    pub fn set_allow_toggle(&mut self, allow_toggle: bool) {
        self.allow_toggle = allow_toggle;
    }

    /// Flip membership of `id`. Ignored when toggling is not allowed.
    pub fn toggle_row(&mut self, id: &str) -> Option<Proposal<ExpansionState>> {
        if !self.allow_toggle {
            debug!("Ignoring expansion toggle for {id}: toggling disabled");
            return None;
        }
        let mut next = self.state().clone();
        if !next.expanded_ids.remove(id) {
            next.expanded_ids.insert(id.to_string());
        }
        trace!("Row {id} expanded={}", next.is_expanded(id));
        Some(self.source.propose(next))
    }

    /// The row list was replaced. Uncontrolled expansion resets entirely.
    ///
    /// Returns `true` if anything was cleared.
    pub fn on_rows_changed(&mut self) -> bool {
        let mut cleared = false;
        self.source.reset_uncontrolled(|state| {
            cleared = !state.expanded_ids.is_empty();
            state.expanded_ids.clear();
        });
        if cleared {
            trace!("Expansion reset after row refresh");
        }
        cleared
    }

    pub fn set_controlled(&mut self, next: ExpansionState) -> bool {
        if !self.source.sync(next) {
            log::warn!("set_controlled_expansion called on uncontrolled expansion; ignoring");
            return false;
        }
        true
    }
}
