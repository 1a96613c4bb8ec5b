//! Per-column metadata reported by the widget.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Snapshot of one column's settings as the widget reports them on attach.
///
/// Only a handful of settings are named; anything else the widget carries is
/// kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSettings {
    /// Header title, if the column has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Fixed width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Whether cells in the column reject edits.
    #[serde(default)]
    pub read_only: bool,
    /// Remaining widget-specific settings.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ColumnSettings {
    /// Settings with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}
