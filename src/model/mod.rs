//! Domain model types (pure).
//!
//! All types in this module are plain data: actions, filter conditions, column metadata
//! and the error taxonomy.

pub mod action;
pub mod column;
pub mod error;
pub mod filter;

// Re-export for convenience
pub use action::{
    add_column_filter, hide_table_column, remove_column_filter, set_column_filters,
    set_hidden_columns, set_hidden_rows, show_table_column, toggle_table_column_visibility,
    ActionKind, RawAction, TableAction,
};
pub use column::ColumnSettings;
pub use error::{ActionError, AppError, ScriptError, WidgetError};
pub use filter::{ColumnFilter, OperationType};
