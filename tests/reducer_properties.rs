//! Property-based tests for reducer laws.
//!
//! Tests validate:
//! 1. Unrecognized wire actions leave the state pointer-identical
//! 2. Hiding twice keeps one entry (idempotence)
//! 3. Show undoes hide (inverse)
//! 4. Toggle equals hide or show depending on the current state
//! 5. At most one filter per column

use proptest::prelude::*;
use serde_json::json;
use tablesync::model::{
    add_column_filter, hide_table_column, remove_column_filter, set_column_filters,
    set_hidden_columns, set_hidden_rows, show_table_column, toggle_table_column_visibility,
    ColumnFilter, RawAction, TableAction,
};
use tablesync::state::{reduce, reduce_raw, TableViewState};

// ===== Strategies =====

fn column_filter() -> impl Strategy<Value = ColumnFilter> {
    (0usize..12, prop::sample::select(vec!["eq", "neq", "gt", "contains"]), 0i64..100)
        .prop_map(|(c, op, arg)| ColumnFilter::new(c, op, vec![json!(arg)]))
}

fn public_action() -> impl Strategy<Value = TableAction> {
    let column = 0usize..12;
    prop_oneof![
        prop::collection::vec(column.clone(), 0..6).prop_map(set_hidden_columns),
        prop::collection::vec(column.clone(), 0..6).prop_map(set_hidden_rows),
        column.clone().prop_map(hide_table_column),
        column.clone().prop_map(show_table_column),
        column.clone().prop_map(toggle_table_column_visibility),
        column_filter().prop_map(add_column_filter),
        prop::collection::vec(column_filter(), 0..6).prop_map(set_column_filters),
        column.prop_map(remove_column_filter),
    ]
}

/// Any state reachable from empty through public actions.
fn reachable_state() -> impl Strategy<Value = TableViewState> {
    prop::collection::vec(public_action(), 0..20)
        .prop_map(|actions| actions.into_iter().fold(TableViewState::default(), reduce))
}

fn hidden(state: &TableViewState) -> Vec<usize> {
    state.hidden_columns.as_deref().cloned().unwrap_or_default()
}

// ===== Property 1: Unknown actions are identity =====

proptest! {
    #[test]
    fn unknown_raw_action_returns_same_state(
        state in reachable_state(),
        kind in "[A-Z_]{1,20}",
    ) {
        prop_assume!(!matches!(
            kind.as_str(),
            "SET_HIDDEN_COLUMNS" | "SET_HIDDEN_ROWS" | "HIDE_COLUMN" | "SHOW_COLUMN"
                | "TOGGLE_COLUMN_VISIBILITY" | "SET_COLUMN_FILTERS" | "ADD_COLUMN_FILTER"
                | "REMOVE_COLUMN_FILTER"
        ));
        let before = state.clone();
        let after = reduce_raw(state, RawAction::new(kind, json!(null)));
        prop_assert!(after.same_as(&before));
    }
}

// ===== Property 2-4: Visibility laws =====

proptest! {
    #[test]
    fn hide_is_idempotent(state in reachable_state(), column in 0usize..12) {
        let once = reduce(state, hide_table_column(column));
        let twice = reduce(once, hide_table_column(column));
        let count = hidden(&twice).iter().filter(|&&c| c == column).count();
        prop_assert_eq!(count, 1);
    }

    #[test]
    fn show_undoes_hide(state in reachable_state(), column in 0usize..12) {
        let hidden_then_shown = reduce(reduce(state, hide_table_column(column)), show_table_column(column));
        prop_assert!(!hidden(&hidden_then_shown).contains(&column));
    }

    #[test]
    fn toggle_matches_hide_or_show(state in reachable_state(), column in 0usize..12) {
        let was_hidden = state.is_column_hidden(column);
        let toggled = reduce(state.clone(), toggle_table_column_visibility(column));
        let expected = if was_hidden {
            reduce(state, show_table_column(column))
        } else {
            reduce(state, hide_table_column(column))
        };
        prop_assert_eq!(hidden(&toggled), hidden(&expected));
    }

    #[test]
    fn hidden_columns_never_repeat(state in reachable_state()) {
        let mut columns = hidden(&state);
        let len = columns.len();
        columns.sort_unstable();
        columns.dedup();
        prop_assert_eq!(columns.len(), len);
    }
}

// ===== Property 5: Filter uniqueness =====

proptest! {
    #[test]
    fn at_most_one_filter_per_column(state in reachable_state()) {
        let filters = state.column_filters.as_deref().cloned().unwrap_or_default();
        let mut columns: Vec<usize> = filters.iter().map(|f| f.column).collect();
        columns.sort_unstable();
        columns.dedup();
        prop_assert_eq!(columns.len(), filters.len());
    }
}

proptest! {
    #[test]
    fn set_column_filters_keeps_last_filter_for_each_column(
        filters in prop::collection::vec(column_filter(), 0..8),
    ) {
        let state = reduce(TableViewState::default(), set_column_filters(filters.clone()));
        let kept = state.column_filters.as_deref().cloned().unwrap_or_default();
        let mut columns: Vec<usize> = filters.iter().map(|f| f.column).collect();
        columns.sort_unstable();
        columns.dedup();
        prop_assert_eq!(kept.len(), columns.len());
        for filter in &kept {
            let last = filters.iter().rev().find(|f| f.column == filter.column);
            prop_assert_eq!(Some(filter), last);
        }
    }
}

#[test]
fn later_filter_on_same_column_replaces_earlier() {
    let state = reduce(
        TableViewState::default(),
        add_column_filter(ColumnFilter::new(2, "eq", vec![json!(5)])),
    );
    let state = reduce(state, add_column_filter(ColumnFilter::new(2, "neq", vec![json!(7)])));

    let filters = state.column_filters.as_deref().cloned().unwrap_or_default();
    assert_eq!(filters, vec![ColumnFilter::new(2, "neq", vec![json!(7)])]);
}
