//! Acceptance test harness for the table view.
//!
//! Wraps a mounted [`TableView`] and the [`MemoryGrid`] it drives so that acceptance
//! tests read as a sequence of user-level steps.

use crate::integration::{apply_script, StateSnapshot};
use crate::model::{ScriptError, TableAction};
use crate::state::TableViewState;
use crate::sync::{TableProps, TableView};
use crate::widget::memory::GridCall;
use crate::widget::{GridHandle, MemoryGrid};
use std::collections::BTreeSet;
use std::rc::Rc;

/// Test harness for acceptance testing.
pub struct SyncTestHarness {
    view: TableView,
    grid: Rc<MemoryGrid>,
}

impl SyncTestHarness {
    /// Mount with default props, then attach `grid` as a separate notification.
    pub fn mount_then_attach(props: TableProps, grid: MemoryGrid) -> Self {
        let grid = Rc::new(grid);
        let mut view = TableView::mount(props);
        view.attach(Some(grid.clone() as Rc<dyn GridHandle>));
        Self { view, grid }
    }

    /// Mount with the widget already available.
    pub fn mounted(props: TableProps, grid: MemoryGrid) -> Self {
        let grid = Rc::new(grid);
        let view = TableView::mount_attached(props, grid.clone() as Rc<dyn GridHandle>);
        Self { view, grid }
    }

    /// Dispatch one action.
    pub fn send(&mut self, action: TableAction) {
        self.view.dispatch(action);
    }

    /// Apply a JSONL action script.
    pub fn run_script(&mut self, script: &str) -> Vec<ScriptError> {
        apply_script(&mut self.view, script)
    }

    /// Simulate the user changing the grid directly, without telling the store.
    pub fn user_hides_column(&self, column: usize) {
        self.grid.hide_column_internally(column);
    }

    /// Re-deliver the widget's attach notification.
    pub fn reattach(&mut self) {
        self.view.attach(Some(self.grid.clone() as Rc<dyn GridHandle>));
    }

    /// Detach the widget.
    pub fn detach(&mut self) {
        self.view.detach();
    }

    /// Current store state.
    pub fn state(&self) -> &TableViewState {
        self.view.state()
    }

    /// Hidden columns as a set.
    pub fn hidden_columns(&self) -> BTreeSet<usize> {
        self.state()
            .hidden_columns
            .as_deref()
            .map(|columns| columns.iter().copied().collect())
            .unwrap_or_default()
    }

    /// The grid being driven.
    pub fn grid(&self) -> &MemoryGrid {
        &self.grid
    }

    /// Calls the grid has received since the last [`clear_calls`](Self::clear_calls).
    pub fn calls(&self) -> Vec<GridCall> {
        self.grid.calls()
    }

    /// Forget recorded grid calls.
    pub fn clear_calls(&self) {
        self.grid.clear_calls();
    }

    /// Snapshot of view and grid.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::capture(&self.view, &self.grid)
    }
}
