//! Pure core integration functions.
//!
//! Action scripts are JSONL: one wire-form action per line. These functions turn script
//! lines into actions and feed them to a mounted view; they are testable without I/O.

use crate::model::{ColumnFilter, RawAction, ScriptError, TableAction};
use crate::state::selectors;
use crate::sync::TableView;
use crate::widget::MemoryGrid;
use serde::Serialize;
use tracing::warn;

/// Serializable summary of a mounted view and the grid it drives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSnapshot {
    /// Whether a widget is attached.
    pub attached: bool,
    /// Columns the widget reported.
    pub column_count: usize,
    /// Hidden columns, in store order.
    pub hidden_columns: Vec<usize>,
    /// Columns not hidden.
    pub visible_columns: Vec<usize>,
    /// Hidden rows, in store order.
    pub hidden_rows: Vec<usize>,
    /// Active column filters.
    pub column_filters: Vec<ColumnFilter>,
    /// Rows the grid shows after filtering and row hiding.
    pub visible_row_count: usize,
}

impl StateSnapshot {
    /// Capture the current state of `view` and `grid`.
    pub fn capture(view: &TableView, grid: &MemoryGrid) -> Self {
        let state = view.state();
        Self {
            attached: state.instance.is_some(),
            column_count: selectors::column_count(state),
            hidden_columns: selectors::hidden_columns_settings(state).columns,
            visible_columns: selectors::visible_columns(state),
            hidden_rows: selectors::hidden_rows_settings(state).rows,
            column_filters: selectors::column_filters(state)
                .map(|filters| filters.as_ref().clone())
                .unwrap_or_default(),
            visible_row_count: grid.visible_rows().len(),
        }
    }

    /// Human-readable multi-line summary.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("attached: {}", self.attached),
            format!(
                "columns: {} visible of {}, hidden {:?}",
                self.visible_columns.len(),
                self.column_count,
                self.hidden_columns
            ),
            format!(
                "rows: {} visible, hidden {:?}",
                self.visible_row_count, self.hidden_rows
            ),
        ];
        for filter in &self.column_filters {
            let args = serde_json::Value::from(filter.args.clone());
            let mut line = format!(
                "filter: column {} {} {}",
                filter.column, filter.operator, args
            );
            if let Some(operation) = filter.operation {
                line.push_str(&format!(" ({})", operation.as_str()));
            }
            lines.push(line);
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Parse action-script lines.
///
/// Blank lines and lines starting with `#` are skipped. Lines that fail to parse, or that
/// name an unknown or internal action, are collected as errors and do not stop parsing.
///
/// # Arguments
///
/// * `lines` - Raw script lines
/// * `starting_line_number` - Line number of the first line (for error reporting)
///
/// # Returns
///
/// Tuple of (successfully parsed actions, script errors)
pub fn process_lines(
    lines: Vec<String>,
    starting_line_number: usize,
) -> (Vec<TableAction>, Vec<ScriptError>) {
    let mut actions = Vec::new();
    let mut errors = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line_number = starting_line_number + index;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let raw: RawAction = match serde_json::from_str(trimmed) {
            Ok(raw) => raw,
            Err(err) => {
                errors.push(ScriptError::InvalidJson {
                    line: line_number,
                    message: err.to_string(),
                });
                continue;
            }
        };

        match TableAction::try_from(raw) {
            Ok(action) => actions.push(action),
            Err(source) => errors.push(ScriptError::Rejected {
                line: line_number,
                source,
            }),
        }
    }

    (actions, errors)
}

/// Parse a whole script and apply it to a view in one batch.
///
/// Returns the errors encountered; each one is also logged at `warn`.
pub fn apply_script(view: &mut TableView, script: &str) -> Vec<ScriptError> {
    let lines = script.lines().map(str::to_string).collect();
    let (actions, errors) = process_lines(lines, 1);
    for error in &errors {
        warn!(line = error.line(), error = %error, "skipping script line");
    }
    view.batch(actions);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{hide_table_column, ActionError, ColumnFilter};
    use crate::sync::TableProps;
    use crate::widget::GridHandle;
    use serde_json::json;
    use std::rc::Rc;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    // ===== process_lines Tests =====

    #[test]
    fn process_lines_parses_valid_actions() {
        let (actions, errors) = process_lines(
            lines(&[
                r#"{"kind":"HIDE_COLUMN","payload":3}"#,
                r#"{"kind":"ADD_COLUMN_FILTER","payload":{"column":0,"operator":"eq","args":[1]}}"#,
            ]),
            1,
        );

        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(
            actions,
            vec![
                hide_table_column(3),
                TableAction::AddColumnFilter(ColumnFilter::new(0, "eq", vec![json!(1)])),
            ]
        );
    }

    #[test]
    fn process_lines_skips_blank_and_comment_lines() {
        let (actions, errors) = process_lines(
            lines(&["", "   ", "# hide the id column", r#"{"kind":"HIDE_COLUMN","payload":0}"#]),
            1,
        );
        assert_eq!(actions.len(), 1);
        assert!(errors.is_empty());
    }

    #[test]
    fn process_lines_reports_invalid_json_with_line_number() {
        let (actions, errors) = process_lines(
            lines(&[r#"{"kind":"HIDE_COLUMN","payload":1}"#, "{not json"]),
            10,
        );
        assert_eq!(actions.len(), 1);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ScriptError::InvalidJson { line: 11, .. }));
    }

    #[test]
    fn process_lines_rejects_internal_actions() {
        let (actions, errors) = process_lines(lines(&[r#"{"kind":"SET_INSTANCE","payload":null}"#]), 1);
        assert!(actions.is_empty());
        assert_eq!(
            errors,
            vec![ScriptError::Rejected {
                line: 1,
                source: ActionError::Unrecognized {
                    kind: "SET_INSTANCE".to_string()
                }
            }]
        );
    }

    #[test]
    fn process_lines_continues_after_errors() {
        let (actions, errors) = process_lines(
            lines(&[
                "garbage",
                r#"{"kind":"SHOW_COLUMN","payload":"x"}"#,
                r#"{"kind":"SHOW_COLUMN","payload":2}"#,
            ]),
            1,
        );
        assert_eq!(actions.len(), 1);
        assert_eq!(errors.len(), 2);
    }

    // ===== apply_script Tests =====

    #[test]
    fn apply_script_updates_view() {
        let mut view = TableView::mount(TableProps::default());
        let errors = apply_script(
            &mut view,
            "{\"kind\":\"SET_HIDDEN_COLUMNS\",\"payload\":[1,3]}\n{\"kind\":\"TOGGLE_COLUMN_VISIBILITY\",\"payload\":3}\n",
        );
        assert!(errors.is_empty());
        assert!(view.state().is_column_hidden(1));
        assert!(!view.state().is_column_hidden(3));
    }

    // ===== StateSnapshot Tests =====

    #[test]
    fn snapshot_reflects_view_and_grid() {
        let grid = Rc::new(MemoryGrid::sample(10, 4));
        let mut view = TableView::mount_attached(
            TableProps::with_hidden_columns(vec![3]),
            grid.clone() as Rc<dyn GridHandle>,
        );
        let errors = apply_script(
            &mut view,
            concat!(
                "{\"kind\":\"SET_HIDDEN_ROWS\",\"payload\":[0]}\n",
                "{\"kind\":\"ADD_COLUMN_FILTER\",\"payload\":{\"column\":0,\"operator\":\"lt\",\"args\":[30]}}\n",
            ),
        );
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");

        let snapshot = StateSnapshot::capture(&view, &grid);
        assert!(snapshot.attached);
        assert_eq!(snapshot.column_count, 4);
        assert_eq!(snapshot.visible_columns, vec![0, 1, 2]);
        // Column 0 holds 0, 7, 14, ..., 63; five are below 30, row 0 is hidden
        assert_eq!(snapshot.visible_row_count, 4);

        insta::assert_snapshot!(snapshot.summary(), @r###"
        attached: true
        columns: 3 visible of 4, hidden [3]
        rows: 4 visible, hidden [0]
        filter: column 0 lt [30]
        "###);
    }

    #[test]
    fn summary_lists_one_line_per_filter_with_operation() {
        let snapshot = StateSnapshot {
            attached: false,
            column_count: 0,
            hidden_columns: vec![],
            visible_columns: vec![],
            hidden_rows: vec![],
            column_filters: vec![
                ColumnFilter::new(1, "between", vec![json!(2), json!(4)])
                    .with_operation(crate::model::OperationType::Disjunction),
                ColumnFilter::new(3, "empty", vec![]),
            ],
            visible_row_count: 0,
        };

        insta::assert_snapshot!(snapshot.summary(), @r###"
        attached: false
        columns: 0 visible of 0, hidden []
        rows: 0 visible, hidden []
        filter: column 1 between [2,4] (disjunction)
        filter: column 3 empty []
        "###);
        assert!(snapshot.summary().ends_with("[]\n"));
    }
}
