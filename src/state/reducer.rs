//! Table view reducer.
//!
//! Pure functions that transform [`TableViewState`] in response to [`TableAction`]s.
//! The reducer is total: it never panics and never fails. Wire-form actions that do not
//! map to a known action are reported and leave the state untouched.

use crate::model::{ColumnFilter, RawAction, TableAction};
use crate::state::TableViewState;
use std::rc::Rc;
use tracing::warn;

/// Apply one action to the state.
///
/// # Arguments
/// * `state` - Current state, consumed
/// * `action` - The transition to apply
///
/// Returns the next state. Fields the action does not touch keep their `Rc`.
pub fn reduce(state: TableViewState, action: TableAction) -> TableViewState {
    match action {
        TableAction::SetInstance(instance) => TableViewState {
            instance: Some(instance),
            ..state
        },
        TableAction::ClearInstance => TableViewState {
            instance: None,
            column_settings: None,
            ..state
        },
        TableAction::SetColumnSettings(settings) => TableViewState {
            column_settings: Some(settings),
            ..state
        },
        TableAction::SetHiddenRows(rows) => TableViewState {
            hidden_rows: Some(Rc::new(dedup(rows))),
            ..state
        },
        TableAction::SetHiddenColumns(columns) => TableViewState {
            hidden_columns: Some(Rc::new(dedup(columns))),
            ..state
        },
        TableAction::HideColumn(column) => hide_column(state, column),
        TableAction::ShowColumn(column) => show_column(state, column),
        TableAction::ToggleColumnVisibility(column) => {
            if state.is_column_hidden(column) {
                show_column(state, column)
            } else {
                hide_column(state, column)
            }
        }
        TableAction::SetColumnFilters(filters) => TableViewState {
            column_filters: Some(Rc::new(one_per_column(filters))),
            ..state
        },
        TableAction::AddColumnFilter(filter) => add_column_filter(state, filter),
        TableAction::RemoveColumnFilter(column) => {
            let remaining = other_filters(&state, column);
            TableViewState {
                column_filters: Some(Rc::new(remaining)),
                ..state
            }
        }
    }
}

/// Apply a wire-form action.
///
/// Unknown or internal kinds and malformed payloads are logged at `warn` and the input
/// state is returned as is.
pub fn reduce_raw(state: TableViewState, raw: RawAction) -> TableViewState {
    match TableAction::try_from(raw) {
        Ok(action) => reduce(state, action),
        Err(err) => {
            warn!(error = %err, "warning: action not matched");
            state
        }
    }
}

fn hide_column(state: TableViewState, column: usize) -> TableViewState {
    let mut hidden: Vec<usize> = state.hidden_columns.as_deref().cloned().unwrap_or_default();
    if !hidden.contains(&column) {
        hidden.push(column);
    }
    TableViewState {
        hidden_columns: Some(Rc::new(hidden)),
        ..state
    }
}

fn show_column(state: TableViewState, column: usize) -> TableViewState {
    // Absent stays absent
    let hidden = state.hidden_columns.as_deref().map(|hidden| {
        Rc::new(
            hidden
                .iter()
                .copied()
                .filter(|&c| c != column)
                .collect::<Vec<_>>(),
        )
    });
    TableViewState {
        hidden_columns: hidden,
        ..state
    }
}

fn add_column_filter(state: TableViewState, filter: ColumnFilter) -> TableViewState {
    let mut filters = other_filters(&state, filter.column);
    filters.push(filter);
    TableViewState {
        column_filters: Some(Rc::new(filters)),
        ..state
    }
}

fn other_filters(state: &TableViewState, column: usize) -> Vec<ColumnFilter> {
    state
        .column_filters
        .as_deref()
        .map(|filters| {
            filters
                .iter()
                .filter(|f| f.column != column)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Keep one filter per column; a later filter replaces an earlier one on the same column.
fn one_per_column(filters: Vec<ColumnFilter>) -> Vec<ColumnFilter> {
    filters.into_iter().fold(Vec::new(), |mut kept, filter| {
        kept.retain(|f: &ColumnFilter| f.column != filter.column);
        kept.push(filter);
        kept
    })
}

/// Drop repeated indices, keeping the first occurrence.
fn dedup(indices: Vec<usize>) -> Vec<usize> {
    let mut seen = Vec::with_capacity(indices.len());
    for index in indices {
        if !seen.contains(&index) {
            seen.push(index);
        }
    }
    seen
}

// ===== Tests =====

#[cfg(test)]
#[path = "reducer_tests.rs"]
mod tests;
