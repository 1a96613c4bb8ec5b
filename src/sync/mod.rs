//! Bidirectional synchronization between the store and the grid widget.
//!
//! [`TableView`] is the mounted unit: it owns one [`TableStore`], the caller's props, and
//! the dependency trackers of the synchronization effects. Every public entry point commits
//! its state change first and then flushes effects, so neither the store nor the widget
//! ever sees a half-applied update.
//!
//! # Effects
//!
//! | Effect | Direction | Dependencies |
//! |---|---|---|
//! | default hidden columns | props → store | `props.hidden_columns` |
//! | view settings | store → widget | instance, hidden columns, hidden rows |
//! | filter reconciliation | store → widget | filter plugin, column filters |
//!
//! Attach-time import (widget → store) is not dependency driven; it runs when the widget
//! reports itself through [`TableView::attach`] or is handed to [`TableView::mount_attached`].

pub mod deps;
pub mod effects;

pub use deps::{DepTracker, RefEq};
pub use effects::ReconcileReport;

use crate::model::action::clear_table_instance;
use crate::model::{ColumnFilter, RawAction, TableAction};
use crate::state::{selectors, TableStore, TableViewState};
use crate::widget::{FilterPlugin, GridHandle, HiddenColumnsSettings, WidgetInstance};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Upper bound on effect passes in a single flush.
///
/// Effects that dispatch cause another pass; a well-behaved set settles in two or three.
pub const MAX_FLUSH_PASSES: usize = 16;

/// Caller-supplied configuration for a mounted table.
///
/// Fields are compared by reference: replacing a field with a new `Rc`, even one with the
/// same content, re-applies it.
#[derive(Debug, Clone, Default)]
pub struct TableProps {
    /// Columns hidden by default. Absent means none.
    pub hidden_columns: Option<Rc<HiddenColumnsSettings>>,
}

impl TableProps {
    /// Props with a default hidden-column list.
    pub fn with_hidden_columns(columns: Vec<usize>) -> Self {
        Self {
            hidden_columns: Some(Rc::new(HiddenColumnsSettings { columns })),
        }
    }
}

type ViewSettingsDeps = (
    Option<WidgetInstance>,
    Option<Rc<Vec<usize>>>,
    Option<Rc<Vec<usize>>>,
);
type FilterDeps = (Option<Rc<dyn FilterPlugin>>, Option<Rc<Vec<ColumnFilter>>>);

/// A mounted table: store, props and synchronization effects.
#[derive(Debug)]
pub struct TableView {
    store: TableStore,
    props: TableProps,
    default_hidden_deps: DepTracker<Option<Rc<HiddenColumnsSettings>>>,
    view_settings_deps: DepTracker<ViewSettingsDeps>,
    filter_deps: DepTracker<FilterDeps>,
    last_reconcile: Option<ReconcileReport>,
}

impl TableView {
    fn unmounted(props: TableProps) -> Self {
        Self {
            store: TableStore::new(),
            props,
            default_hidden_deps: DepTracker::default(),
            view_settings_deps: DepTracker::default(),
            filter_deps: DepTracker::default(),
            last_reconcile: None,
        }
    }

    /// Mount a table with an empty store and run every effect once.
    pub fn mount(props: TableProps) -> Self {
        let mut view = Self::unmounted(props);
        info!("table view mounted");
        view.flush();
        view
    }

    /// Mount a table whose widget is ready in the same update.
    ///
    /// The widget is imported before effects run for the first time, so the default
    /// hidden columns in `props` overwrite whatever the widget reported.
    pub fn mount_attached(props: TableProps, handle: Rc<dyn GridHandle>) -> Self {
        let mut view = Self::unmounted(props);
        info!("table view mounted with widget");
        for action in effects::import_from_widget(handle) {
            view.store.dispatch(action);
        }
        view.flush();
        view
    }

    /// Current state, read-only.
    pub fn state(&self) -> &TableViewState {
        self.store.state()
    }

    /// Narrow the state with a selector.
    pub fn select<T>(&self, selector: impl FnOnce(&TableViewState) -> T) -> T {
        self.store.select(selector)
    }

    /// The underlying store.
    pub fn store(&self) -> &TableStore {
        &self.store
    }

    /// Report of the most recent filter reconciliation, if one ran.
    pub fn last_reconcile(&self) -> Option<ReconcileReport> {
        self.last_reconcile
    }

    /// Dispatch one action, then flush effects.
    pub fn dispatch(&mut self, action: TableAction) {
        self.store.dispatch(action);
        self.flush();
    }

    /// Dispatch a wire-form action, then flush effects.
    pub fn dispatch_raw(&mut self, raw: RawAction) {
        if self.store.dispatch_raw(raw) {
            self.flush();
        }
    }

    /// Dispatch several actions and flush effects once.
    pub fn batch(&mut self, actions: impl IntoIterator<Item = TableAction>) {
        for action in actions {
            self.store.dispatch(action);
        }
        self.flush();
    }

    /// Replace the props, then flush effects.
    pub fn set_props(&mut self, props: TableProps) {
        self.props = props;
        self.flush();
    }

    /// Widget attach notification.
    ///
    /// `None` (the widget going away) is ignored here; use [`detach`](Self::detach) to
    /// forget a widget explicitly. A live handle is imported into the store: its hidden
    /// columns overwrite the store's, and its column settings replace the store's.
    pub fn attach(&mut self, instance: Option<Rc<dyn GridHandle>>) {
        let Some(handle) = instance else {
            debug!("ignoring empty attach notification");
            return;
        };
        info!("widget attached");
        for action in effects::import_from_widget(handle) {
            self.store.dispatch(action);
        }
        self.flush();
    }

    /// Forget the attached widget.
    ///
    /// Widget-facing effects are reset so that a later attach reconciles from scratch.
    pub fn detach(&mut self) {
        if self.store.state().instance.is_none() {
            return;
        }
        info!("widget detached");
        self.store.dispatch(clear_table_instance());
        self.view_settings_deps.reset();
        self.filter_deps.reset();
        self.flush();
    }

    /// Tear down the view, returning the final state.
    pub fn unmount(self) -> TableViewState {
        info!("table view unmounted");
        self.store.into_state()
    }

    /// Run every effect whose dependencies changed, until none did.
    fn flush(&mut self) {
        for pass in 0..MAX_FLUSH_PASSES {
            let revision = self.store.revision();
            let ran = self.run_effects();
            if !ran || self.store.revision() == revision {
                return;
            }
            debug!(pass, "effects dispatched; flushing again");
        }
        warn!(
            passes = MAX_FLUSH_PASSES,
            "effects did not settle; deferring remaining work"
        );
    }

    /// One pass over the effects, in declaration order. Returns whether any ran.
    fn run_effects(&mut self) -> bool {
        let mut ran = false;

        // Default hidden columns: props -> store
        if self.default_hidden_deps.update(self.props.hidden_columns.clone()) {
            ran = true;
            let action = effects::default_hidden_columns_action(self.props.hidden_columns.as_deref());
            self.store.dispatch(action);
        }

        // View settings: store -> widget
        let state = self.store.state();
        let view_deps = (
            selectors::instance(state),
            state.hidden_columns.clone(),
            state.hidden_rows.clone(),
        );
        if self.view_settings_deps.update(view_deps) {
            ran = true;
            if let Some(instance) = selectors::instance(state) {
                effects::push_view_settings(instance.handle().as_ref(), state);
            }
        }

        // Filter reconciliation: store -> widget
        let filter_deps = (
            selectors::filter_plugin(state),
            selectors::column_filters(state),
        );
        if self.filter_deps.update(filter_deps) {
            ran = true;
            if let Some(plugin) = selectors::filter_plugin(state) {
                let filters = selectors::column_filters(state).unwrap_or_default();
                self.last_reconcile = Some(effects::reconcile_filters(plugin.as_ref(), &filters));
            }
        }

        ran
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
