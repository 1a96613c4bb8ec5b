//! In-memory grid widget.
//!
//! `MemoryGrid` implements the widget boundary over a plain table of JSON cells. It backs
//! the command-line driver and the tests: it evaluates filter conditions, tracks hidden
//! columns the way the real widget does, and records every imperative call it receives.

use crate::model::{ColumnFilter, ColumnSettings, OperationType, WidgetError};
use crate::widget::{FilterPlugin, GridHandle, GridSettings, HiddenColumnsPlugin};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::rc::Rc;
use tracing::trace;

/// One imperative call received by a [`MemoryGrid`] or its plugins.
#[derive(Debug, Clone, PartialEq)]
pub enum GridCall {
    /// `FilterPlugin::clear_conditions`
    ClearConditions,
    /// `FilterPlugin::add_condition`, with its arguments.
    AddCondition(ColumnFilter),
    /// `FilterPlugin::filter`
    Filter,
    /// `GridHandle::update_settings`
    UpdateSettings(GridSettings),
}

type CallLog = Rc<RefCell<Vec<GridCall>>>;

static NULL_CELL: Value = Value::Null;

/// Filter operators the in-memory grid understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Eq,
    Neq,
    Contains,
    NotContains,
    BeginsWith,
    EndsWith,
    Gt,
    Gte,
    Lt,
    Lte,
    Between,
    NotBetween,
    Empty,
    NotEmpty,
}

impl Operator {
    fn parse(name: &str) -> Option<Self> {
        let op = match name {
            "eq" => Operator::Eq,
            "neq" => Operator::Neq,
            "contains" => Operator::Contains,
            "not_contains" => Operator::NotContains,
            "begins_with" => Operator::BeginsWith,
            "ends_with" => Operator::EndsWith,
            "gt" => Operator::Gt,
            "gte" => Operator::Gte,
            "lt" => Operator::Lt,
            "lte" => Operator::Lte,
            "between" => Operator::Between,
            "not_between" => Operator::NotBetween,
            "empty" => Operator::Empty,
            "not_empty" => Operator::NotEmpty,
            _ => return None,
        };
        Some(op)
    }

    fn arity(&self) -> usize {
        match self {
            Operator::Empty | Operator::NotEmpty => 0,
            Operator::Between | Operator::NotBetween => 2,
            _ => 1,
        }
    }

    fn matches(&self, cell: &Value, args: &[Value]) -> bool {
        match self {
            Operator::Eq => loose_eq(cell, &args[0]),
            Operator::Neq => !loose_eq(cell, &args[0]),
            Operator::Contains => text(cell).contains(&text(&args[0])),
            Operator::NotContains => !text(cell).contains(&text(&args[0])),
            Operator::BeginsWith => text(cell).starts_with(&text(&args[0])),
            Operator::EndsWith => text(cell).ends_with(&text(&args[0])),
            Operator::Gt => compare(cell, &args[0]) == Some(Ordering::Greater),
            Operator::Gte => matches!(
                compare(cell, &args[0]),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::Lt => compare(cell, &args[0]) == Some(Ordering::Less),
            Operator::Lte => matches!(
                compare(cell, &args[0]),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Operator::Between => in_range(cell, &args[0], &args[1]),
            Operator::NotBetween => !in_range(cell, &args[0], &args[1]),
            Operator::Empty => is_empty(cell),
            Operator::NotEmpty => !is_empty(cell),
        }
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_lowercase(),
        Value::Null => String::new(),
        other => other.to_string().to_lowercase(),
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn loose_eq(cell: &Value, arg: &Value) -> bool {
    match (number(cell), number(arg)) {
        (Some(a), Some(b)) => a == b,
        _ => text(cell) == text(arg),
    }
}

fn compare(cell: &Value, arg: &Value) -> Option<Ordering> {
    match (number(cell), number(arg)) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        _ => None,
    }
}

fn in_range(cell: &Value, low: &Value, high: &Value) -> bool {
    let (Some(value), Some(low), Some(high)) = (number(cell), number(low), number(high)) else {
        return false;
    };
    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    value >= low && value <= high
}

fn is_empty(cell: &Value) -> bool {
    match cell {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[derive(Debug, Clone)]
struct Condition {
    column: usize,
    name: String,
    operator: Operator,
    args: Vec<Value>,
    operation: Option<OperationType>,
}

/// Filter plugin of a [`MemoryGrid`].
#[derive(Debug)]
pub struct MemoryFilters {
    data: Rc<Vec<Vec<Value>>>,
    columns: Cell<usize>,
    conditions: RefCell<Vec<Condition>>,
    filtered_rows: RefCell<Option<Vec<usize>>>,
    calls: CallLog,
}

impl MemoryFilters {
    /// Rows that passed the last `filter()` pass, or every row if none ran.
    pub fn filtered_rows(&self) -> Vec<usize> {
        self.filtered_rows
            .borrow()
            .clone()
            .unwrap_or_else(|| (0..self.data.len()).collect())
    }

    fn row_passes(&self, row: &[Value], conditions: &[Condition]) -> bool {
        let mut columns: Vec<usize> = conditions.iter().map(|c| c.column).collect();
        columns.sort_unstable();
        columns.dedup();

        columns.into_iter().all(|column| {
            let on_column: Vec<&Condition> =
                conditions.iter().filter(|c| c.column == column).collect();
            let cell = row.get(column).unwrap_or(&NULL_CELL);
            let test = |c: &&Condition| c.operator.matches(cell, &c.args);
            // The last condition added to a column decides how the column combines.
            let Some((last, rest)) = on_column.split_last() else {
                return true;
            };
            match last.operation {
                Some(OperationType::Disjunction) => on_column.iter().any(test),
                Some(OperationType::DisjunctionWithExtraCondition) => {
                    test(last) && (rest.is_empty() || rest.iter().any(test))
                }
                Some(OperationType::Conjunction) | None => on_column.iter().all(test),
            }
        })
    }
}

impl FilterPlugin for MemoryFilters {
    fn has_conditions(&self) -> bool {
        !self.conditions.borrow().is_empty()
    }

    fn clear_conditions(&self) {
        self.calls.borrow_mut().push(GridCall::ClearConditions);
        self.conditions.borrow_mut().clear();
    }

    fn add_condition(
        &self,
        column: usize,
        operator: &str,
        args: &[Value],
        operation: Option<OperationType>,
    ) -> Result<(), WidgetError> {
        self.calls
            .borrow_mut()
            .push(GridCall::AddCondition(ColumnFilter {
                column,
                operator: operator.to_string(),
                args: args.to_vec(),
                operation,
            }));

        let columns = self.columns.get();
        if column >= columns {
            return Err(WidgetError::ColumnOutOfRange { column, columns });
        }
        let parsed = Operator::parse(operator).ok_or_else(|| WidgetError::UnknownOperator {
            operator: operator.to_string(),
        })?;
        if args.len() < parsed.arity() {
            return Err(WidgetError::ArgumentCount {
                operator: operator.to_string(),
                expected: parsed.arity(),
                actual: args.len(),
            });
        }

        self.conditions.borrow_mut().push(Condition {
            column,
            name: operator.to_string(),
            operator: parsed,
            args: args.to_vec(),
            operation,
        });
        Ok(())
    }

    fn filter(&self) {
        self.calls.borrow_mut().push(GridCall::Filter);
        let conditions = self.conditions.borrow();
        let rows = if conditions.is_empty() {
            None
        } else {
            Some(
                self.data
                    .iter()
                    .enumerate()
                    .filter(|(_, row)| self.row_passes(row, &conditions))
                    .map(|(index, _)| index)
                    .collect(),
            )
        };
        trace!(conditions = conditions.len(), "memory grid filtered");
        *self.filtered_rows.borrow_mut() = rows;
    }
}

/// Hidden-columns plugin of a [`MemoryGrid`].
#[derive(Debug, Default)]
pub struct MemoryHiddenColumns {
    hidden: RefCell<Vec<usize>>,
}

impl MemoryHiddenColumns {
    fn hide(&self, column: usize) {
        let mut hidden = self.hidden.borrow_mut();
        if !hidden.contains(&column) {
            hidden.push(column);
        }
    }

    fn replace(&self, columns: &[usize]) {
        *self.hidden.borrow_mut() = columns.to_vec();
    }
}

impl HiddenColumnsPlugin for MemoryHiddenColumns {
    fn hidden_columns(&self) -> Vec<usize> {
        self.hidden.borrow().clone()
    }
}

/// A grid widget backed by an in-memory table.
#[derive(Debug)]
pub struct MemoryGrid {
    data: Rc<Vec<Vec<Value>>>,
    column_settings: Vec<ColumnSettings>,
    filters: Option<Rc<MemoryFilters>>,
    hidden_columns: Option<Rc<MemoryHiddenColumns>>,
    settings: RefCell<GridSettings>,
    calls: CallLog,
}

impl MemoryGrid {
    /// Build a grid over row-major cell data.
    ///
    /// The column count is the length of the longest row.
    pub fn new(data: Vec<Vec<Value>>) -> Self {
        let columns = data.iter().map(Vec::len).max().unwrap_or(0);
        let data = Rc::new(data);
        let calls: CallLog = Rc::default();
        let filters = MemoryFilters {
            data: Rc::clone(&data),
            columns: Cell::new(columns),
            conditions: RefCell::default(),
            filtered_rows: RefCell::default(),
            calls: Rc::clone(&calls),
        };
        Self {
            data,
            column_settings: vec![ColumnSettings::default(); columns],
            filters: Some(Rc::new(filters)),
            hidden_columns: Some(Rc::default()),
            settings: RefCell::default(),
            calls,
        }
    }

    /// A `rows` x `columns` grid of zeros.
    pub fn with_size(rows: usize, columns: usize) -> Self {
        Self::new(vec![vec![Value::from(0); columns]; rows])
    }

    /// A `rows` x `columns` grid of deterministic numbers in `0..100`.
    ///
    /// Cell `(r, c)` holds `(r * 7 + c * 13) % 100`, which gives filters something to
    /// bite on without pulling in a random source.
    pub fn sample(rows: usize, columns: usize) -> Self {
        let data = (0..rows)
            .map(|r| {
                (0..columns)
                    .map(|c| Value::from((r * 7 + c * 13) % 100))
                    .collect()
            })
            .collect();
        Self::new(data)
    }

    /// Replace the column settings the grid reports.
    ///
    /// The settings define the column count. Columns past the end of the data read as null.
    pub fn with_column_settings(mut self, settings: Vec<ColumnSettings>) -> Self {
        if let Some(filters) = &self.filters {
            filters.columns.set(settings.len());
        }
        self.column_settings = settings;
        self
    }

    /// Start with some columns already hidden inside the widget.
    pub fn with_hidden_columns(self, columns: &[usize]) -> Self {
        if let Some(plugin) = &self.hidden_columns {
            plugin.replace(columns);
        }
        self
    }

    /// Disable the filter plugin.
    pub fn without_filters(mut self) -> Self {
        self.filters = None;
        self
    }

    /// Disable the hidden-columns plugin.
    pub fn without_hidden_columns(mut self) -> Self {
        self.hidden_columns = None;
        self
    }

    /// Wrap into a shareable handle.
    pub fn into_handle(self) -> Rc<dyn GridHandle> {
        Rc::new(self)
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.column_settings.len()
    }

    /// Hide a column from inside the widget, as a user interaction would.
    pub fn hide_column_internally(&self, column: usize) {
        if let Some(plugin) = &self.hidden_columns {
            plugin.hide(column);
        }
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<GridCall> {
        self.calls.borrow().clone()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Settings last pushed through `update_settings`.
    pub fn settings(&self) -> GridSettings {
        self.settings.borrow().clone()
    }

    /// Conditions currently registered with the filter plugin.
    pub fn conditions(&self) -> Vec<ColumnFilter> {
        self.filters
            .as_ref()
            .map(|filters| {
                filters
                    .conditions
                    .borrow()
                    .iter()
                    .map(|c| ColumnFilter {
                        column: c.column,
                        operator: c.name.clone(),
                        args: c.args.clone(),
                        operation: c.operation,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Rows that pass the filters and are not hidden.
    pub fn visible_rows(&self) -> Vec<usize> {
        let filtered = match &self.filters {
            Some(filters) => filters.filtered_rows(),
            None => (0..self.data.len()).collect(),
        };
        let settings = self.settings.borrow();
        filtered
            .into_iter()
            .filter(|row| !settings.hidden_rows.rows.contains(row))
            .collect()
    }
}

impl GridHandle for MemoryGrid {
    fn filters_plugin(&self) -> Option<Rc<dyn FilterPlugin>> {
        self.filters
            .as_ref()
            .map(|filters| Rc::clone(filters) as Rc<dyn FilterPlugin>)
    }

    fn hidden_columns_plugin(&self) -> Option<Rc<dyn HiddenColumnsPlugin>> {
        self.hidden_columns
            .as_ref()
            .map(|plugin| Rc::clone(plugin) as Rc<dyn HiddenColumnsPlugin>)
    }

    fn column_settings(&self) -> Vec<ColumnSettings> {
        self.column_settings.clone()
    }

    fn update_settings(&self, settings: &GridSettings) {
        self.calls
            .borrow_mut()
            .push(GridCall::UpdateSettings(settings.clone()));
        if let Some(plugin) = &self.hidden_columns {
            plugin.replace(&settings.hidden_columns.columns);
        }
        *self.settings.borrow_mut() = settings.clone();
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
