//! Per-row action menus.
//!
//! At most one row's menu is open. While a menu is open the table holds a
//! [`Subscription`] to the host's outside-click source; the subscription is
//! dropped (and so detached) when the menu closes, when another menu opens,
//! or when the table itself is dropped.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use log::trace;
use serde::{Deserialize, Serialize};

/// Identifier of one attached outside-click listener.
pub type ListenerId = u64;

/// Host capability for listening to clicks outside an open menu.
///
/// The host routes clicks it detects outside the menu region back to
/// [`TableController::handle_outside_click`](crate::TableController::handle_outside_click).
pub trait OutsideClickHub: Send + Sync + fmt::Debug {
    /// Start listening; returns a handle for [`detach`](Self::detach).
    fn attach(&self) -> ListenerId;

    /// Stop listening.
    fn detach(&self, id: ListenerId);
}

/// RAII guard for an attached listener.
pub struct Subscription {
    hub: Arc<dyn OutsideClickHub>,
    id: ListenerId,
}

impl Subscription {
    pub fn attach(hub: Arc<dyn OutsideClickHub>) -> Self {
        let id = hub.attach();
        trace!("Outside-click listener {id} attached");
        Self { hub, id }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.detach(self.id);
        trace!("Outside-click listener {} detached", self.id);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// A simple in-process [`OutsideClickHub`] that tracks attached listeners.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: AtomicU64,
    active: Mutex<BTreeSet<ListenerId>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listeners currently attached.
    pub fn active_count(&self) -> usize {
        self.active.lock().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_attached(&self, id: ListenerId) -> bool {
        self.active.lock().map(|g| g.contains(&id)).unwrap_or(false)
    }
}

impl OutsideClickHub for ListenerRegistry {
    fn attach(&self) -> ListenerId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.active.lock() {
            guard.insert(id);
        }
        id
    }

    fn detach(&self, id: ListenerId) {
        if let Ok(mut guard) = self.active.lock() {
            guard.remove(&id);
        }
    }
}

/// Which row's action menu is open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMenuState {
    pub open_row_id: Option<String>,
}

#[derive(Debug)]
struct OpenMenu {
    row_id: String,
    subscription: Option<Subscription>,
}

/// Action menu bookkeeping for one table.
#[derive(Debug, Default)]
pub struct ActionMenu {
    hub: Option<Arc<dyn OutsideClickHub>>,
    open: Option<OpenMenu>,
}

impl ActionMenu {
    pub fn new(hub: Option<Arc<dyn OutsideClickHub>>) -> Self {
        Self { hub, open: None }
    }

    pub fn state(&self) -> ActionMenuState {
        ActionMenuState {
            open_row_id: self.open_row_id().map(str::to_string),
        }
    }

    pub fn open_row_id(&self) -> Option<&str> {
        self.open.as_ref().map(|m| m.row_id.as_str())
    }

    pub fn is_open_for(&self, row_id: &str) -> bool {
        self.open_row_id() == Some(row_id)
    }

    /// Listener held by the open menu, if any.
    pub fn listener_id(&self) -> Option<ListenerId> {
        self.open
            .as_ref()
            .and_then(|m| m.subscription.as_ref())
            .map(Subscription::id)
    }

    /// Open the menu of `row_id`, closing any other one first.
    /// Returns `false` if it was already open.
    pub fn open(&mut self, row_id: &str) -> bool {
        if self.is_open_for(row_id) {
            return false;
        }
        // Detach the previous listener before attaching the next one.
        self.close();
        let subscription = self.hub.clone().map(Subscription::attach);
        self.open = Some(OpenMenu {
            row_id: row_id.to_string(),
            subscription,
        });
        trace!("Action menu opened for {row_id}");
        true
    }

    /// Open `row_id`'s menu, or close it if it is the one already open.
    pub fn toggle(&mut self, row_id: &str) -> bool {
        if self.is_open_for(row_id) {
            self.close()
        } else {
            self.open(row_id)
        }
    }

    /// Close the open menu. Returns `false` if none was open.
    pub fn close(&mut self) -> bool {
        match self.open.take() {
            Some(menu) => {
                trace!("Action menu closed for {}", menu.row_id);
                true
            }
            None => false,
        }
    }

    /// Close the menu if its row is no longer part of the table.
    pub fn reconcile(&mut self, row_ids: &[String]) -> bool {
        let stale = self
            .open_row_id()
            .is_some_and(|id| !row_ids.iter().any(|r| r == id));
        stale && self.close()
    }
}
