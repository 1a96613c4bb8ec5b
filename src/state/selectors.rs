//! Derived-state accessors.
//!
//! Each selector narrows [`TableViewState`] to exactly what one consumer needs. They are
//! pure and cheap to call repeatedly; pass them to [`TableStore::select`].
//!
//! [`TableStore::select`]: crate::state::TableStore::select

use crate::model::ColumnFilter;
use crate::state::TableViewState;
use crate::widget::{
    FilterPlugin, GridHandle, HiddenColumnsSettings, HiddenRowsSettings, WidgetInstance,
};
use std::rc::Rc;

/// The attached widget, if any.
pub fn instance(state: &TableViewState) -> Option<WidgetInstance> {
    state.instance.clone()
}

/// The attached widget's filter plugin, if both exist.
pub fn filter_plugin(state: &TableViewState) -> Option<Rc<dyn FilterPlugin>> {
    state
        .instance
        .as_ref()
        .and_then(|instance| instance.handle().filters_plugin())
}

/// Hidden columns shaped as the widget's setting. Absent means none.
pub fn hidden_columns_settings(state: &TableViewState) -> HiddenColumnsSettings {
    HiddenColumnsSettings {
        columns: state.hidden_columns.as_deref().cloned().unwrap_or_default(),
    }
}

/// Hidden rows shaped as the widget's setting. Absent means none.
pub fn hidden_rows_settings(state: &TableViewState) -> HiddenRowsSettings {
    HiddenRowsSettings {
        rows: state.hidden_rows.as_deref().cloned().unwrap_or_default(),
    }
}

/// Active filters; the shared list itself so callers can compare by pointer.
pub fn column_filters(state: &TableViewState) -> Option<Rc<Vec<ColumnFilter>>> {
    state.column_filters.clone()
}

/// Number of columns the widget reported on attach, or `0` before attach.
pub fn column_count(state: &TableViewState) -> usize {
    state.column_settings.as_deref().map_or(0, Vec::len)
}

/// Physical indices of the columns that are not hidden.
pub fn visible_columns(state: &TableViewState) -> Vec<usize> {
    (0..column_count(state))
        .filter(|&column| !state.is_column_hidden(column))
        .collect()
}

/// Whether a particular column is hidden. Returns a selector closure.
pub fn is_column_hidden(column: usize) -> impl Fn(&TableViewState) -> bool {
    move |state| state.is_column_hidden(column)
}
