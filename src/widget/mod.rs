//! Boundary to the grid widget.
//!
//! The widget is an external, stateful collaborator. The store never creates or destroys
//! it; it only remembers the handle the widget reports on attach, reads from it, and sends
//! it imperative commands. Everything here is single-threaded: handles are shared with
//! `Rc` and plugins use interior mutability for their own state.

pub mod memory;

pub use memory::MemoryGrid;

use crate::model::{ColumnSettings, OperationType, WidgetError};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Live handle to a mounted grid widget.
pub trait GridHandle: fmt::Debug {
    /// The filter plugin, if the widget has it enabled.
    ///
    /// Implementations must return the same `Rc` for as long as the plugin lives; the
    /// reconciliation effect uses pointer identity to decide whether to re-run.
    fn filters_plugin(&self) -> Option<Rc<dyn FilterPlugin>>;

    /// The hidden-columns plugin, if enabled.
    fn hidden_columns_plugin(&self) -> Option<Rc<dyn HiddenColumnsPlugin>>;

    /// Current per-column settings, one entry per column.
    fn column_settings(&self) -> Vec<ColumnSettings>;

    /// Apply view settings derived from the store.
    fn update_settings(&self, settings: &GridSettings);
}

/// The widget's column filter subsystem.
pub trait FilterPlugin: fmt::Debug {
    /// Whether any condition is currently registered.
    fn has_conditions(&self) -> bool;

    /// Drop every registered condition.
    fn clear_conditions(&self);

    /// Register a condition on a column. Nothing is recomputed until [`filter`](Self::filter).
    fn add_condition(
        &self,
        column: usize,
        operator: &str,
        args: &[Value],
        operation: Option<OperationType>,
    ) -> Result<(), WidgetError>;

    /// Recompute visible rows from the registered conditions.
    fn filter(&self);
}

/// The widget's hidden-columns subsystem.
pub trait HiddenColumnsPlugin: fmt::Debug {
    /// Physical indices of the columns the widget currently hides.
    fn hidden_columns(&self) -> Vec<usize>;
}

/// Store-held reference to an attached widget.
///
/// Cloning shares the handle. Equality is pointer identity. Only the attach path inside
/// this crate can build one, so application code cannot dispatch `SetInstance` itself.
#[derive(Clone)]
pub struct WidgetInstance(Rc<dyn GridHandle>);

impl WidgetInstance {
    pub(crate) fn new(handle: Rc<dyn GridHandle>) -> Self {
        Self(handle)
    }

    /// Borrow the underlying handle.
    pub fn handle(&self) -> &Rc<dyn GridHandle> {
        &self.0
    }

    /// Whether both references point at the same widget.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for WidgetInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WidgetInstance").field(&self.0).finish()
    }
}

impl PartialEq for WidgetInstance {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// Hidden-columns setting in the shape the widget consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HiddenColumnsSettings {
    /// Hidden physical column indices.
    pub columns: Vec<usize>,
}

/// Hidden-rows setting in the shape the widget consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HiddenRowsSettings {
    /// Hidden physical row indices.
    pub rows: Vec<usize>,
}

/// View settings pushed from the store into the widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSettings {
    /// Columns to hide.
    pub hidden_columns: HiddenColumnsSettings,
    /// Rows to hide.
    pub hidden_rows: HiddenRowsSettings,
}
