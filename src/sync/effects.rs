//! Synchronization effect bodies.
//!
//! Each function here is one side of the protocol between the store and the widget. They
//! do not decide *when* to run; [`TableView`](crate::sync::TableView) does that by
//! comparing dependencies. Missing widgets or plugins are never errors here: callers only
//! invoke these with handles they already hold.

use crate::model::action::{set_column_settings, set_table_instance};
use crate::model::{set_hidden_columns, ColumnFilter, TableAction};
use crate::state::{selectors, TableViewState};
use crate::widget::{FilterPlugin, GridHandle, GridSettings, HiddenColumnsSettings, WidgetInstance};
use std::rc::Rc;
use tracing::{debug, warn};

/// What a filter reconciliation pass did to the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Existing conditions were cleared.
    pub cleared: bool,
    /// Conditions the widget accepted.
    pub added: usize,
    /// Conditions the widget rejected.
    pub rejected: usize,
    /// The widget recomputed its visible rows.
    pub applied: bool,
}

/// Action that seeds hidden columns from the caller's default configuration.
///
/// Absent configuration means "nothing hidden".
pub fn default_hidden_columns_action(defaults: Option<&HiddenColumnsSettings>) -> TableAction {
    set_hidden_columns(defaults.map(|d| d.columns.clone()).unwrap_or_default())
}

/// Replace the widget's filter conditions with the store's.
///
/// Clears the widget only if it has conditions, adds every stored filter in order, then
/// asks the widget to recompute once. Conditions the widget rejects are logged and
/// skipped; the remaining ones still apply.
pub fn reconcile_filters(plugin: &dyn FilterPlugin, filters: &[ColumnFilter]) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    if plugin.has_conditions() {
        plugin.clear_conditions();
        report.cleared = true;
    }

    if filters.is_empty() {
        return report;
    }

    for filter in filters {
        match plugin.add_condition(
            filter.column,
            &filter.operator,
            &filter.args,
            filter.operation,
        ) {
            Ok(()) => report.added += 1,
            Err(err) => {
                warn!(column = filter.column, operator = %filter.operator, error = %err, "widget rejected filter condition");
                report.rejected += 1;
            }
        }
    }

    plugin.filter();
    report.applied = true;
    debug!(?report, "filters reconciled");
    report
}

/// View settings derived from the state, in the shape the widget consumes.
pub fn grid_settings(state: &TableViewState) -> GridSettings {
    GridSettings {
        hidden_columns: selectors::hidden_columns_settings(state),
        hidden_rows: selectors::hidden_rows_settings(state),
    }
}

/// Push hidden columns and rows into the widget.
pub fn push_view_settings(handle: &dyn GridHandle, state: &TableViewState) {
    let settings = grid_settings(state);
    debug!(
        hidden_columns = settings.hidden_columns.columns.len(),
        hidden_rows = settings.hidden_rows.rows.len(),
        "pushing view settings"
    );
    handle.update_settings(&settings);
}

/// Actions that import a freshly attached widget's state into the store.
///
/// In order: remember the instance, adopt the widget's hidden columns, adopt its column
/// settings. If the widget has no hidden-columns plugin the hidden set is left alone.
pub fn import_from_widget(handle: Rc<dyn GridHandle>) -> Vec<TableAction> {
    let hidden = handle
        .hidden_columns_plugin()
        .map(|plugin| plugin.hidden_columns());
    let settings = handle.column_settings();

    let mut actions = vec![set_table_instance(WidgetInstance::new(handle))];
    match hidden {
        Some(columns) => actions.push(set_hidden_columns(columns)),
        None => warn!("attached widget has no hidden-columns plugin; keeping store value"),
    }
    actions.push(set_column_settings(settings));
    actions
}
