//! Controlled vs. uncontrolled ownership of a piece of table state.
//!
//! Each concern of the table (selection, sort, column visibility, expansion,
//! highlight) is owned either by the caller or by the engine. The choice is
//! made once, when the table is built:
//!
//! - [`StateSource::Controlled`]: the caller owns the value. The engine keeps
//!   the last value the caller pushed, computes proposals from it, and hands
//!   them to the change handler. Nothing changes until the caller syncs a new
//!   value back.
//! - [`StateSource::Uncontrolled`]: the engine owns the value and adopts its
//!   own proposals immediately. An optional handler observes every change.

use std::fmt;
use std::sync::Arc;

/// Callback receiving a proposed next state.
pub type ChangeHandler<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Wrap a closure as a [`ChangeHandler`].
pub fn handler<S, F>(f: F) -> ChangeHandler<S>
where
    F: Fn(&S) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Who owns a piece of state.
pub enum StateSource<S> {
    /// Caller-owned state plus the handler that receives proposals.
    Controlled {
        value: S,
        on_change: ChangeHandler<S>,
    },
    /// Engine-owned state with an optional observer.
    Uncontrolled {
        value: S,
        on_change: Option<ChangeHandler<S>>,
    },
}

impl<S: Clone> StateSource<S> {
    pub fn controlled(value: S, on_change: ChangeHandler<S>) -> Self {
        Self::Controlled { value, on_change }
    }

    pub fn uncontrolled(value: S, on_change: Option<ChangeHandler<S>>) -> Self {
        Self::Uncontrolled { value, on_change }
    }

    /// The value the engine currently renders from.
    pub fn current(&self) -> &S {
        match self {
            Self::Controlled { value, .. } | Self::Uncontrolled { value, .. } => value,
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, Self::Controlled { .. })
    }

    /// Submit a proposed next state.
    ///
    /// Uncontrolled sources adopt it; controlled sources leave their value
    /// untouched. The returned [`Proposal`] must be notified once any lock
    /// guarding this source has been released.
    pub fn propose(&mut self, next: S) -> Proposal<S> {
        match self {
            Self::Controlled { on_change, .. } => Proposal {
                handler: Some(Arc::clone(on_change)),
                next,
            },
            Self::Uncontrolled { value, on_change } => {
                *value = next.clone();
                Proposal {
                    handler: on_change.clone(),
                    next,
                }
            }
        }
    }

    /// Replace a controlled value. Returns `false` (and does nothing) for
    /// uncontrolled sources.
    pub fn sync(&mut self, next: S) -> bool {
        match self {
            Self::Controlled { value, .. } => {
                *value = next;
                true
            }
            Self::Uncontrolled { .. } => false,
        }
    }

    /// Mutate an uncontrolled value in place without notifying anyone.
    ///
    /// Used for engine-side housekeeping such as resets on data refresh.
    /// Returns `false` for controlled sources.
    pub fn reset_uncontrolled(&mut self, f: impl FnOnce(&mut S)) -> bool {
        match self {
            Self::Controlled { .. } => false,
            Self::Uncontrolled { value, .. } => {
                f(value);
                true
            }
        }
    }

    /// Mutate the held value regardless of ownership.
    ///
    /// Only for derived bookkeeping that does not change what the caller
    /// asked for, e.g. recomputing flags against a new row count.
    pub(crate) fn refresh(&mut self, f: impl FnOnce(&mut S)) {
        match self {
            Self::Controlled { value, .. } | Self::Uncontrolled { value, .. } => f(value),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for StateSource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Controlled { value, .. } => f.debug_tuple("Controlled").field(value).finish(),
            Self::Uncontrolled { value, on_change } => f
                .debug_struct("Uncontrolled")
                .field("value", value)
                .field("observed", &on_change.is_some())
                .finish(),
        }
    }
}

/// A proposed state change awaiting delivery to its handler.
#[must_use = "a proposal does nothing until notified"]
pub struct Proposal<S> {
    handler: Option<ChangeHandler<S>>,
    next: S,
}

impl<S> Proposal<S> {
    /// The proposed state.
    pub fn next(&self) -> &S {
        &self.next
    }

    /// Deliver the proposal to its handler, if any.
    pub fn notify(self) {
        if let Some(handler) = self.handler {
            handler(&self.next);
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Proposal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proposal")
            .field("next", &self.next)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn test_controlled_keeps_value_and_reports_proposal() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut source = StateSource::controlled(1, handler(move |v: &i32| {
            sink.lock().unwrap().push(*v);
        }));

        source.propose(2).notify();

        assert_eq!(*source.current(), 1);
        assert_eq!(*seen.lock().unwrap(), vec![2]);
        assert!(source.sync(2));
        assert_eq!(*source.current(), 2);
    }

    #[test]
    fn test_uncontrolled_adopts_value() {
        let mut source = StateSource::uncontrolled(1, None);
        source.propose(5).notify();
        assert_eq!(*source.current(), 5);
        assert!(!source.sync(7));
        assert_eq!(*source.current(), 5);
    }

    #[test]
    fn test_reset_only_touches_uncontrolled() {
        let mut controlled = StateSource::controlled(vec![1], handler(|_: &Vec<i32>| {}));
        assert!(!controlled.reset_uncontrolled(Vec::clear));
        assert_eq!(controlled.current(), &vec![1]);

        let mut uncontrolled = StateSource::uncontrolled(vec![1], None);
        assert!(uncontrolled.reset_uncontrolled(Vec::clear));
        assert!(uncontrolled.current().is_empty());
    }
}
