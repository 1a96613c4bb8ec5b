//! Error types for tablesync.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions up to [`AppError`], which only the binary ever sees.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the command-line driver
//!   - [`ConfigError`](crate::config::ConfigError) - Config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing subscriber setup failures
//!   - [`ScriptError`] - Malformed lines in an action script
//!   - `std::io::Error` - Reading scripts, writing output
//! - [`ActionError`] - A wire-form action that does not map to a [`TableAction`]
//! - [`WidgetError`] - The widget rejected an imperative command
//!
//! # Error Recovery Strategy
//!
//! The store and the synchronization effects never return errors to their callers.
//! [`ActionError`] and [`WidgetError`] are **non-fatal**: they are logged with
//! `tracing::warn!` and the state (or the widget) is left as it was. Only configuration,
//! logging and I/O failures in the binary are fatal.
//!
//! [`TableAction`]: crate::model::TableAction

use thiserror::Error;

/// Top-level error for the command-line driver.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// An action script contained a line that is not a valid action.
    ///
    /// Only fatal when the driver runs in strict mode; otherwise script errors are
    /// reported and skipped.
    #[error("Action script error: {0}")]
    Script(#[from] ScriptError),

    /// A `--filter` argument could not be parsed.
    #[error("Invalid filter argument: {0}")]
    InvalidFilter(String),

    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The state snapshot could not be serialized.
    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A wire-form action that cannot become a [`TableAction`](crate::model::TableAction).
///
/// Raised by `TryFrom<RawAction>`. The reducer treats both variants the same way: the
/// action is reported and the state is returned unchanged.
///
/// # Examples
///
/// ```
/// use tablesync::model::ActionError;
///
/// let err = ActionError::Unrecognized { kind: "FREEZE_ROW".to_string() };
/// assert!(err.to_string().contains("FREEZE_ROW"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The `kind` tag does not name a public action.
    ///
    /// Internal kinds (`SET_INSTANCE`, `SET_COLUMN_SETTINGS`, `CLEAR_INSTANCE`) also land
    /// here: they cannot be expressed on the wire.
    #[error("action not matched: {kind}")]
    Unrecognized {
        /// The tag as received.
        kind: String,
    },

    /// The tag is known but the payload has the wrong shape.
    #[error("invalid payload for {kind}: {reason}")]
    InvalidPayload {
        /// The action kind whose payload was rejected.
        kind: String,
        /// Deserializer message.
        reason: String,
    },
}

/// The widget refused an imperative command.
///
/// Filter tuples are not validated by the store; whatever the widget thinks of them comes
/// back as one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// The filter plugin has no operator with this name.
    #[error("unknown filter operator '{operator}'")]
    UnknownOperator {
        /// Operator name as given.
        operator: String,
    },

    /// The column index is outside the grid.
    #[error("column {column} out of range (grid has {columns} columns)")]
    ColumnOutOfRange {
        /// Requested column.
        column: usize,
        /// Number of columns in the grid.
        columns: usize,
    },

    /// The operator exists but the argument list does not fit it.
    #[error("operator '{operator}' expects {expected} argument(s), got {actual}")]
    ArgumentCount {
        /// Operator name.
        operator: String,
        /// Arguments the operator needs.
        expected: usize,
        /// Arguments supplied.
        actual: usize,
    },
}

/// A line in an action script that could not be turned into an action.
///
/// Script errors are collected rather than aborting the run, the same way the widget keeps
/// working with a partially valid configuration.
///
/// # Examples
///
/// ```
/// use tablesync::model::ScriptError;
///
/// let err = ScriptError::InvalidJson { line: 7, message: "expected value".to_string() };
/// assert!(err.to_string().contains("line 7"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// The line is not valid JSON or lacks a `kind`.
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number.
        line: usize,
        /// Parser message.
        message: String,
    },

    /// The line parsed but does not describe a public action.
    #[error("Rejected action at line {line}: {source}")]
    Rejected {
        /// 1-based line number.
        line: usize,
        /// Why the action was rejected.
        #[source]
        source: ActionError,
    },
}

impl ScriptError {
    /// Line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ScriptError::InvalidJson { line, .. } | ScriptError::Rejected { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_error_reports_line_for_both_variants() {
        let json = ScriptError::InvalidJson {
            line: 3,
            message: "eof".to_string(),
        };
        let rejected = ScriptError::Rejected {
            line: 9,
            source: ActionError::Unrecognized {
                kind: "NOPE".to_string(),
            },
        };
        assert_eq!(json.line(), 3);
        assert_eq!(rejected.line(), 9);
    }

    #[test]
    fn script_error_converts_into_app_error() {
        let err: AppError = ScriptError::InvalidJson {
            line: 1,
            message: "x".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Script(_)));
    }

    #[test]
    fn widget_error_messages_carry_context() {
        let err = WidgetError::ColumnOutOfRange {
            column: 25,
            columns: 20,
        };
        let msg = err.to_string();
        assert!(msg.contains("25"));
        assert!(msg.contains("20"));
    }
}
