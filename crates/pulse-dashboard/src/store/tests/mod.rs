//! Tests for the Store module.
//!
//! Tests are organized into categories:
//! - `dispatch`: Routing, snapshot identity and the root reducer
//! - `subscriber`: Listener registration, notification and nested dispatch
//! - `config_seed`: Initial state built from configuration

mod config_seed;

use super::{Action, RootState, Store};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Creates a store with default state.
pub(super) fn default_store() -> Store {
    Store::new(RootState::default())
}

/// Subscribes a listener that records every snapshot it receives.
pub(super) fn record_snapshots(
    store: &Store,
) -> (super::Subscription, Rc<RefCell<Vec<Arc<RootState>>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let sub = store.subscribe(move |state| sink.borrow_mut().push(Arc::clone(state)));
    (sub, seen)
}

/// Dispatches every action in order.
pub(super) fn dispatch_all(store: &Store, actions: impl IntoIterator<Item = Action>) {
    for action in actions {
        store.dispatch(action);
    }
}
