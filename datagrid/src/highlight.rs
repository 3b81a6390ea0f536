//! Independent row highlight: a "currently viewed" cursor decoupled from
//! checkbox selection.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::source::{Proposal, StateSource};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightState {
    pub highlighted_row_id: Option<String>,
}

impl HighlightState {
    pub fn on(id: impl Into<String>) -> Self {
        Self {
            highlighted_row_id: Some(id.into()),
        }
    }

    pub fn is_highlighted(&self, id: &str) -> bool {
        self.highlighted_row_id.as_deref() == Some(id)
    }
}

#[derive(Debug)]
pub struct HighlightModel {
    source: StateSource<HighlightState>,
}

impl HighlightModel {
    pub fn new(source: StateSource<HighlightState>) -> Self {
        Self { source }
    }

    pub fn state(&self) -> &HighlightState {
        self.source.current()
    }

    /// Move the highlight to `id`. Ignored for unknown rows and when the row
    /// is already highlighted.
    pub fn highlight(&mut self, row_ids: &[String], id: &str) -> Option<Proposal<HighlightState>> {
        if !row_ids.iter().any(|r| r == id) {
            debug!("Ignoring highlight of unknown row {id}");
            return None;
        }
        if self.state().is_highlighted(id) {
            return None;
        }
        trace!("Highlight -> {id}");
        Some(self.source.propose(HighlightState::on(id)))
    }

    pub fn set_controlled(&mut self, next: HighlightState) -> bool {
        if !self.source.sync(next) {
            log::warn!("set_controlled_highlight called on an uncontrolled highlight; ignoring");
            return false;
        }
        true
    }

    /// Drop an uncontrolled highlight whose row left the table.
    pub fn reconcile(&mut self, row_ids: &[String]) {
        self.source.reset_uncontrolled(|state| {
            if let Some(id) = &state.highlighted_row_id
                && !row_ids.contains(id)
            {
                state.highlighted_row_id = None;
            }
        });
    }
}
