//! Tests for the in-memory grid widget.

use super::*;
use crate::widget::{HiddenColumnsSettings, HiddenRowsSettings};
use serde_json::json;

// ===== Test Helpers =====

/// Three columns: name, amount, note.
fn ledger() -> MemoryGrid {
    MemoryGrid::new(vec![
        vec![json!("apple"), json!(3), json!("")],
        vec![json!("banana"), json!(7), json!("ripe")],
        vec![json!("cherry"), json!(12), json!(null)],
        vec![json!("Apricot"), json!("5"), json!("dried")],
    ])
}

fn plugin(grid: &MemoryGrid) -> Rc<dyn FilterPlugin> {
    grid.filters_plugin().expect("filters enabled")
}

fn run(grid: &MemoryGrid, conditions: &[(usize, &str, Vec<Value>, Option<OperationType>)]) -> Vec<usize> {
    let filters = plugin(grid);
    filters.clear_conditions();
    for (column, operator, args, operation) in conditions {
        filters
            .add_condition(*column, operator, args, *operation)
            .expect("valid condition");
    }
    filters.filter();
    grid.visible_rows()
}

// ===== Construction =====

#[test]
fn with_size_builds_zero_grid() {
    let grid = MemoryGrid::with_size(300, 20);
    assert_eq!(grid.row_count(), 300);
    assert_eq!(grid.column_count(), 20);
    assert_eq!(grid.column_settings().len(), 20);
}

#[test]
fn plugin_handles_are_stable() {
    let grid = ledger();
    let a = plugin(&grid);
    let b = plugin(&grid);
    assert!(Rc::ptr_eq(&a, &b));
}

#[test]
fn disabled_plugins_are_absent() {
    let grid = ledger().without_filters().without_hidden_columns();
    assert!(grid.filters_plugin().is_none());
    assert!(grid.hidden_columns_plugin().is_none());
    assert_eq!(grid.visible_rows(), vec![0, 1, 2, 3]);
}

// ===== Filtering =====

#[test]
fn no_filter_pass_shows_every_row() {
    assert_eq!(ledger().visible_rows(), vec![0, 1, 2, 3]);
}

#[test]
fn eq_compares_numbers_loosely() {
    let grid = ledger();
    assert_eq!(run(&grid, &[(1, "eq", vec![json!(5)], None)]), vec![3]);
}

#[test]
fn contains_is_case_insensitive() {
    let grid = ledger();
    assert_eq!(run(&grid, &[(0, "begins_with", vec![json!("AP")], None)]), vec![0, 3]);
    assert_eq!(run(&grid, &[(0, "contains", vec![json!("an")], None)]), vec![1]);
}

#[test]
fn between_is_inclusive_and_order_free() {
    let grid = ledger();
    assert_eq!(
        run(&grid, &[(1, "between", vec![json!(7), json!(3)], None)]),
        vec![0, 1, 3]
    );
}

#[test]
fn empty_matches_null_and_blank() {
    let grid = ledger();
    assert_eq!(run(&grid, &[(2, "empty", vec![], None)]), vec![0, 2]);
    assert_eq!(run(&grid, &[(2, "not_empty", vec![], None)]), vec![1, 3]);
}

#[test]
fn conditions_on_different_columns_all_apply() {
    let grid = ledger();
    let rows = run(
        &grid,
        &[
            (1, "gt", vec![json!(4)], None),
            (2, "not_empty", vec![], None),
        ],
    );
    assert_eq!(rows, vec![1, 3]);
}

#[test]
fn disjunction_on_same_column_matches_any() {
    let grid = ledger();
    let rows = run(
        &grid,
        &[
            (1, "lt", vec![json!(4)], Some(OperationType::Disjunction)),
            (1, "gt", vec![json!(10)], Some(OperationType::Disjunction)),
        ],
    );
    assert_eq!(rows, vec![0, 2]);
}

#[test]
fn clearing_then_filtering_restores_all_rows() {
    let grid = ledger();
    run(&grid, &[(1, "eq", vec![json!(3)], None)]);
    assert_eq!(run(&grid, &[]), vec![0, 1, 2, 3]);
}

// ===== Rejected conditions =====

#[test]
fn unknown_operator_is_rejected_but_recorded() {
    let grid = ledger();
    let err = plugin(&grid)
        .add_condition(0, "sounds_like", &[json!("x")], None)
        .unwrap_err();
    assert_eq!(
        err,
        WidgetError::UnknownOperator {
            operator: "sounds_like".to_string()
        }
    );
    assert_eq!(grid.calls().len(), 1);
    assert!(!plugin(&grid).has_conditions());
}

#[test]
fn out_of_range_column_is_rejected() {
    let grid = ledger();
    let err = plugin(&grid).add_condition(9, "eq", &[json!(1)], None).unwrap_err();
    assert!(matches!(err, WidgetError::ColumnOutOfRange { column: 9, columns: 3 }));
}

#[test]
fn missing_arguments_are_rejected() {
    let grid = ledger();
    let err = plugin(&grid).add_condition(1, "between", &[json!(1)], None).unwrap_err();
    assert!(matches!(err, WidgetError::ArgumentCount { expected: 2, actual: 1, .. }));
}

// ===== Hidden columns and settings =====

#[test]
fn internal_hide_is_reported_by_plugin() {
    let grid = ledger().with_hidden_columns(&[2]);
    grid.hide_column_internally(0);
    grid.hide_column_internally(0);
    let hidden = grid.hidden_columns_plugin().expect("plugin").hidden_columns();
    assert_eq!(hidden, vec![2, 0]);
}

#[test]
fn update_settings_hides_rows_and_columns() {
    let grid = ledger();
    grid.update_settings(&GridSettings {
        hidden_columns: HiddenColumnsSettings { columns: vec![1] },
        hidden_rows: HiddenRowsSettings { rows: vec![0, 2] },
    });

    assert_eq!(grid.visible_rows(), vec![1, 3]);
    assert_eq!(
        grid.hidden_columns_plugin().expect("plugin").hidden_columns(),
        vec![1]
    );
    assert!(matches!(grid.calls().as_slice(), [GridCall::UpdateSettings(_)]));
}

#[test]
fn conditions_report_original_operator_names() {
    let grid = ledger();
    run(&grid, &[(0, "begins_with", vec![json!("a")], None)]);
    assert_eq!(grid.conditions()[0].operator, "begins_with");
    grid.clear_calls();
    assert!(grid.calls().is_empty());
}

#[test]
fn sample_grid_is_deterministic() {
    let grid = MemoryGrid::sample(3, 2);
    assert_eq!(grid.row_count(), 3);
    assert_eq!(grid.column_count(), 2);
    // Column 1 holds 13, 20, 27
    assert_eq!(run(&grid, &[(1, "gt", vec![json!(15)], None)]), vec![1, 2]);
}

#[test]
fn column_settings_define_filterable_columns() {
    let grid = ledger().with_column_settings(vec![ColumnSettings::default(); 5]);
    assert_eq!(grid.column_count(), 5);

    // Column 4 has no data; every cell reads as null
    assert_eq!(run(&grid, &[(4, "empty", vec![], None)]), vec![0, 1, 2, 3]);
    let err = plugin(&grid).add_condition(5, "empty", &[], None).unwrap_err();
    assert!(matches!(err, WidgetError::ColumnOutOfRange { column: 5, columns: 5 }));
}

#[test]
fn fewer_column_settings_narrow_filterable_columns() {
    let grid = ledger().with_column_settings(vec![ColumnSettings::default(); 2]);
    let err = plugin(&grid).add_condition(2, "empty", &[], None).unwrap_err();
    assert!(matches!(err, WidgetError::ColumnOutOfRange { column: 2, columns: 2 }));
}
