//! Table view state.
//!
//! `TableViewState` is the root state type: which columns and rows are hidden, which
//! filters are active, and which widget (if any) is attached. It is plain data; every
//! transition goes through [`reduce`](crate::state::reduce).

use crate::model::{ColumnFilter, ColumnSettings};
use crate::widget::WidgetInstance;
use std::rc::Rc;

/// Declarative view configuration for one mounted table.
///
/// All fields start absent. Collections live behind `Rc` so that consumers can detect
/// changes by pointer identity: a transition that touches a collection always allocates a
/// new one, and a transition that does not touch it keeps the same `Rc`.
///
/// # Invariants
///
/// - `hidden_columns` and `hidden_rows` contain no duplicates.
/// - `column_filters` holds at most one entry per column.
#[derive(Debug, Clone, Default)]
pub struct TableViewState {
    /// Attached widget. The store only remembers it; the widget owns itself.
    pub instance: Option<WidgetInstance>,

    /// Per-column metadata, as reported by the widget on attach.
    pub column_settings: Option<Rc<Vec<ColumnSettings>>>,

    /// Hidden physical column indices, in the order they were hidden.
    pub hidden_columns: Option<Rc<Vec<usize>>>,

    /// Hidden physical row indices.
    pub hidden_rows: Option<Rc<Vec<usize>>>,

    /// Active filters, one per column, in insertion order.
    pub column_filters: Option<Rc<Vec<ColumnFilter>>>,
}

impl TableViewState {
    /// Empty state, as created at mount.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every field refers to the same allocation as `other`.
    ///
    /// This is the identity the reducer guarantees for actions it does not apply.
    pub fn same_as(&self, other: &Self) -> bool {
        fn same<T>(a: &Option<Rc<T>>, b: &Option<Rc<T>>) -> bool {
            match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                _ => false,
            }
        }

        let instance = match (&self.instance, &other.instance) {
            (None, None) => true,
            (Some(a), Some(b)) => a.ptr_eq(b),
            _ => false,
        };

        instance
            && same(&self.column_settings, &other.column_settings)
            && same(&self.hidden_columns, &other.hidden_columns)
            && same(&self.hidden_rows, &other.hidden_rows)
            && same(&self.column_filters, &other.column_filters)
    }

    /// Whether a column is currently hidden.
    pub fn is_column_hidden(&self, column: usize) -> bool {
        self.hidden_columns
            .as_deref()
            .is_some_and(|hidden| hidden.contains(&column))
    }
}

/// Value equality: collections by content, the widget by pointer.
impl PartialEq for TableViewState {
    fn eq(&self, other: &Self) -> bool {
        self.instance == other.instance
            && self.column_settings == other.column_settings
            && self.hidden_columns == other.hidden_columns
            && self.hidden_rows == other.hidden_rows
            && self.column_filters == other.column_filters
    }
}
