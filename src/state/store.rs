//! Table view store.
//!
//! One `TableStore` exists per mounted table. It is passed down by ownership (or by
//! `&mut`) rather than looked up globally. Dispatch is synchronous and strictly
//! sequential: each action is fully reduced before the next one is looked at.

use crate::model::{RawAction, TableAction};
use crate::state::{reduce, reduce_raw, TableViewState};
use tracing::debug;

/// Owner of a [`TableViewState`] and the only place it changes.
#[derive(Debug, Default)]
pub struct TableStore {
    state: TableViewState,
    revision: u64,
}

impl TableStore {
    /// Create a store with an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an existing state.
    pub fn with_state(state: TableViewState) -> Self {
        Self { state, revision: 0 }
    }

    /// Current state, read-only.
    pub fn state(&self) -> &TableViewState {
        &self.state
    }

    /// Number of committed dispatches that produced a different state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Narrow the state to what a caller needs.
    pub fn select<T>(&self, selector: impl FnOnce(&TableViewState) -> T) -> T {
        selector(&self.state)
    }

    /// Reduce one action into the state.
    ///
    /// Returns `true` if any field changed identity.
    pub fn dispatch(&mut self, action: TableAction) -> bool {
        let kind = action.kind();
        debug!(action = %kind, "dispatch");
        self.commit(|state| reduce(state, action))
    }

    /// Reduce a wire-form action. Unmatched actions are logged and ignored.
    pub fn dispatch_raw(&mut self, raw: RawAction) -> bool {
        debug!(kind = %raw.kind, "dispatch raw");
        self.commit(|state| reduce_raw(state, raw))
    }

    /// Consume the store, returning its final state.
    pub fn into_state(self) -> TableViewState {
        self.state
    }

    fn commit(&mut self, transition: impl FnOnce(TableViewState) -> TableViewState) -> bool {
        let previous = std::mem::take(&mut self.state);
        let snapshot = previous.clone();
        self.state = transition(previous);
        let changed = !self.state.same_as(&snapshot);
        if changed {
            self.revision += 1;
        }
        changed
    }
}
