//! Action vocabulary for the table view store.
//!
//! Every state mutation is described by one [`TableAction`]. The public action creators
//! at the bottom of this module are the supported way for application code to build them;
//! `SetInstance`, `SetColumnSettings` and `ClearInstance` are produced only by the attach
//! and detach paths in [`crate::sync`].
//!
//! Actions also have a wire form, [`RawAction`], used by action scripts:
//!
//! ```json
//! {"kind": "ADD_COLUMN_FILTER", "payload": {"column": 2, "operator": "eq", "args": [5]}}
//! ```

use crate::model::{ActionError, ColumnFilter, ColumnSettings};
use crate::widget::WidgetInstance;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// A single state mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    /// Remember the attached widget. Internal.
    SetInstance(WidgetInstance),
    /// Forget the attached widget and its column metadata. Internal.
    ClearInstance,
    /// Replace column metadata wholesale. Internal.
    SetColumnSettings(Rc<Vec<ColumnSettings>>),
    /// Replace the hidden column set.
    SetHiddenColumns(Vec<usize>),
    /// Replace the hidden row set.
    SetHiddenRows(Vec<usize>),
    /// Hide one column.
    HideColumn(usize),
    /// Show one column.
    ShowColumn(usize),
    /// Hide the column if visible, show it if hidden.
    ToggleColumnVisibility(usize),
    /// Replace all column filters.
    SetColumnFilters(Vec<ColumnFilter>),
    /// Add a filter, replacing any filter already on the same column.
    AddColumnFilter(ColumnFilter),
    /// Remove the filter on a column.
    RemoveColumnFilter(usize),
}

impl TableAction {
    /// The wire tag for this action.
    pub fn kind(&self) -> ActionKind {
        match self {
            TableAction::SetInstance(_) => ActionKind::SetInstance,
            TableAction::ClearInstance => ActionKind::ClearInstance,
            TableAction::SetColumnSettings(_) => ActionKind::SetColumnSettings,
            TableAction::SetHiddenColumns(_) => ActionKind::SetHiddenColumns,
            TableAction::SetHiddenRows(_) => ActionKind::SetHiddenRows,
            TableAction::HideColumn(_) => ActionKind::HideColumn,
            TableAction::ShowColumn(_) => ActionKind::ShowColumn,
            TableAction::ToggleColumnVisibility(_) => ActionKind::ToggleColumnVisibility,
            TableAction::SetColumnFilters(_) => ActionKind::SetColumnFilters,
            TableAction::AddColumnFilter(_) => ActionKind::AddColumnFilter,
            TableAction::RemoveColumnFilter(_) => ActionKind::RemoveColumnFilter,
        }
    }
}

/// Tag of a [`TableAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// `SET_INSTANCE`
    SetInstance,
    /// `CLEAR_INSTANCE`
    ClearInstance,
    /// `SET_COLUMN_SETTINGS`
    SetColumnSettings,
    /// `SET_HIDDEN_COLUMNS`
    SetHiddenColumns,
    /// `SET_HIDDEN_ROWS`
    SetHiddenRows,
    /// `HIDE_COLUMN`
    HideColumn,
    /// `SHOW_COLUMN`
    ShowColumn,
    /// `TOGGLE_COLUMN_VISIBILITY`
    ToggleColumnVisibility,
    /// `SET_COLUMN_FILTERS`
    SetColumnFilters,
    /// `ADD_COLUMN_FILTER`
    AddColumnFilter,
    /// `REMOVE_COLUMN_FILTER`
    RemoveColumnFilter,
}

impl ActionKind {
    /// Upper-snake tag as used on the wire and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::SetInstance => "SET_INSTANCE",
            ActionKind::ClearInstance => "CLEAR_INSTANCE",
            ActionKind::SetColumnSettings => "SET_COLUMN_SETTINGS",
            ActionKind::SetHiddenColumns => "SET_HIDDEN_COLUMNS",
            ActionKind::SetHiddenRows => "SET_HIDDEN_ROWS",
            ActionKind::HideColumn => "HIDE_COLUMN",
            ActionKind::ShowColumn => "SHOW_COLUMN",
            ActionKind::ToggleColumnVisibility => "TOGGLE_COLUMN_VISIBILITY",
            ActionKind::SetColumnFilters => "SET_COLUMN_FILTERS",
            ActionKind::AddColumnFilter => "ADD_COLUMN_FILTER",
            ActionKind::RemoveColumnFilter => "REMOVE_COLUMN_FILTER",
        }
    }

    /// Whether application code may send this action over the wire.
    pub fn is_public(&self) -> bool {
        !matches!(
            self,
            ActionKind::SetInstance | ActionKind::ClearInstance | ActionKind::SetColumnSettings
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Untyped wire form of an action: `{ "kind": ..., "payload": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    /// Upper-snake action tag.
    pub kind: String,
    /// Payload; its shape depends on `kind`.
    #[serde(default)]
    pub payload: Value,
}

impl RawAction {
    /// Build a raw action from a tag and payload.
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}

fn payload<T: DeserializeOwned>(kind: &str, value: Value) -> Result<T, ActionError> {
    serde_json::from_value(value).map_err(|e| ActionError::InvalidPayload {
        kind: kind.to_string(),
        reason: e.to_string(),
    })
}

impl TryFrom<RawAction> for TableAction {
    type Error = ActionError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let RawAction { kind, payload: value } = raw;
        let action = match kind.as_str() {
            "SET_HIDDEN_COLUMNS" => TableAction::SetHiddenColumns(payload(&kind, value)?),
            "SET_HIDDEN_ROWS" => TableAction::SetHiddenRows(payload(&kind, value)?),
            "HIDE_COLUMN" => TableAction::HideColumn(payload(&kind, value)?),
            "SHOW_COLUMN" => TableAction::ShowColumn(payload(&kind, value)?),
            "TOGGLE_COLUMN_VISIBILITY" => {
                TableAction::ToggleColumnVisibility(payload(&kind, value)?)
            }
            "SET_COLUMN_FILTERS" => TableAction::SetColumnFilters(payload(&kind, value)?),
            "ADD_COLUMN_FILTER" => TableAction::AddColumnFilter(payload(&kind, value)?),
            "REMOVE_COLUMN_FILTER" => TableAction::RemoveColumnFilter(payload(&kind, value)?),
            _ => return Err(ActionError::Unrecognized { kind }),
        };
        Ok(action)
    }
}

// ===== Internal action creators =====

pub(crate) fn set_table_instance(instance: WidgetInstance) -> TableAction {
    TableAction::SetInstance(instance)
}

pub(crate) fn clear_table_instance() -> TableAction {
    TableAction::ClearInstance
}

pub(crate) fn set_column_settings(settings: Vec<ColumnSettings>) -> TableAction {
    TableAction::SetColumnSettings(Rc::new(settings))
}

// ===== Public action creators =====

/// Replace the hidden column set.
pub fn set_hidden_columns(columns: Vec<usize>) -> TableAction {
    TableAction::SetHiddenColumns(columns)
}

/// Replace the hidden row set.
pub fn set_hidden_rows(rows: Vec<usize>) -> TableAction {
    TableAction::SetHiddenRows(rows)
}

/// Hide a column.
pub fn hide_table_column(column: usize) -> TableAction {
    TableAction::HideColumn(column)
}

/// Show a column.
pub fn show_table_column(column: usize) -> TableAction {
    TableAction::ShowColumn(column)
}

/// Flip a column's visibility.
pub fn toggle_table_column_visibility(column: usize) -> TableAction {
    TableAction::ToggleColumnVisibility(column)
}

/// Replace all column filters.
pub fn set_column_filters(filters: Vec<ColumnFilter>) -> TableAction {
    TableAction::SetColumnFilters(filters)
}

/// Add a filter; an existing filter on the same column is replaced.
pub fn add_column_filter(filter: ColumnFilter) -> TableAction {
    TableAction::AddColumnFilter(filter)
}

/// Remove the filter on a column.
pub fn remove_column_filter(column: usize) -> TableAction {
    TableAction::RemoveColumnFilter(column)
}
