//! Application store.
//!
//! The [`Store`] owns the current [`RootState`] snapshot and is the single
//! place where state changes. It is a cheap, cloneable handle that is passed
//! explicitly to every component that reads or dispatches; there is no
//! global instance.
//!
//! The store lives on the UI loop and is not `Send`. Background tasks never
//! hold it: they send [`Action`]s over a channel and the loop dispatches them.

mod state;

pub use state::{reduce, Action, LifecycleEvent, RootState};

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;

#[cfg(test)]
mod tests;

type Listener = Rc<dyn Fn(&Arc<RootState>)>;

struct Inner {
    state: RefCell<Arc<RootState>>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener_id: Cell<u64>,
    dispatching: Cell<bool>,
}

/// Handle to the application state.
///
/// Cloning the handle shares the same state and listeners.
///
/// # Example
///
/// ```
/// use pulse_dashboard::slices::UiAction;
/// use pulse_dashboard::store::{Action, RootState, Store};
///
/// let store = Store::new(RootState::default());
/// let before = store.get_state();
/// store.dispatch(Action::Ui(UiAction::ToggleSidebar));
/// assert!(store.get_state().ui.sidebar_open);
/// assert!(!std::sync::Arc::ptr_eq(&before, &store.get_state()));
/// ```
#[derive(Clone)]
pub struct Store {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.inner.state.borrow())
            .field("subscriber_count", &self.subscriber_count())
            .field("dispatching", &self.inner.dispatching.get())
            .finish()
    }
}

/// Clears the dispatching flag even if a listener panics.
struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Store {
    /// Creates a store holding `initial`.
    pub fn new(initial: RootState) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(Arc::new(initial)),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
                dispatching: Cell::new(false),
            }),
        }
    }

    /// Returns the current snapshot.
    ///
    /// Snapshots are immutable. Two reads return the same `Arc` unless an
    /// effective dispatch happened in between, so `Arc::ptr_eq` is a valid
    /// change check.
    pub fn get_state(&self) -> Arc<RootState> {
        Arc::clone(&self.inner.state.borrow())
    }

    /// Applies `action` and notifies subscribers.
    ///
    /// An action that leaves the state unchanged keeps the current snapshot
    /// and notifies nobody. Dispatching from inside a listener is rejected:
    /// the nested action is logged and dropped.
    pub fn dispatch(&self, action: Action) {
        if self.inner.dispatching.get() {
            tracing::error!("nested dispatch from a store listener ignored: {:?}", action);
            return;
        }
        self.inner.dispatching.set(true);
        let _guard = DispatchGuard(&self.inner.dispatching);

        let current = self.get_state();
        let next = reduce(&current, action);
        if next == *current {
            tracing::trace!("dispatch left state unchanged");
            return;
        }

        let next = Arc::new(next);
        *self.inner.state.borrow_mut() = Arc::clone(&next);
        self.notify(&next);
    }

    /// Registers `listener`, called synchronously after every effective
    /// dispatch with the new snapshot.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or [`Subscription::unsubscribe`] is called.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Arc<RootState>) + 'static,
    {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        tracing::trace!("store listener {} subscribed", id);
        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    /// Returns the number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn notify(&self, state: &Arc<RootState>) {
        // Snapshot so listeners may subscribe or unsubscribe while running.
        let snapshot: Vec<(u64, Listener)> = self.inner.listeners.borrow().clone();
        for (id, listener) in snapshot {
            let still_registered = self
                .inner
                .listeners
                .borrow()
                .iter()
                .any(|(existing, _)| *existing == id);
            if still_registered {
                listener(state);
            }
        }
    }
}

/// Guard returned by [`Store::subscribe`].
///
/// Unsubscribes when dropped.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    store: Weak<Inner>,
}

impl Subscription {
    /// Removes the listener now.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
            tracing::trace!("store listener {} unsubscribed", self.id);
        }
    }
}
