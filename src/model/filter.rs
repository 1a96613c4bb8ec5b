//! Column filter conditions.
//!
//! A [`ColumnFilter`] is the declarative form of one condition the widget's
//! filter plugin applies to a column: `(column, operator, args, operation)`.
//! The store keeps at most one filter per column.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a condition combines with other conditions on the same column.
///
/// Mirrors the operation identifiers understood by the widget's filter plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationType {
    /// All conditions on the column must match.
    Conjunction,
    /// Any condition on the column may match.
    Disjunction,
    /// Any condition matches, with one extra condition that must always hold.
    DisjunctionWithExtraCondition,
}

impl OperationType {
    /// Identifier as the widget spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Conjunction => "conjunction",
            OperationType::Disjunction => "disjunction",
            OperationType::DisjunctionWithExtraCondition => "disjunctionWithExtraCondition",
        }
    }
}

/// A single filter condition bound to a column.
///
/// Arguments are left untyped (`serde_json::Value`); they are handed to the
/// widget unchanged and the widget decides whether they make sense for the
/// operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnFilter {
    /// Zero-based physical column index.
    pub column: usize,
    /// Operator name (e.g. `"eq"`, `"contains"`, `"between"`).
    pub operator: String,
    /// Operator arguments.
    #[serde(default)]
    pub args: Vec<Value>,
    /// Optional operation identifier forwarded to the widget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<OperationType>,
}

impl ColumnFilter {
    /// Create a filter with no explicit operation.
    pub fn new(column: usize, operator: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            column,
            operator: operator.into(),
            args,
            operation: None,
        }
    }

    /// Attach an operation identifier.
    pub fn with_operation(mut self, operation: OperationType) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Parse the compact `COL:OP[:JSONARGS]` form used on the command line.
    ///
    /// `JSONARGS` must be a JSON array; it defaults to `[]` when omitted.
    ///
    /// ```
    /// use tablesync::model::ColumnFilter;
    ///
    /// let filter = ColumnFilter::parse_compact("2:eq:[5]").unwrap();
    /// assert_eq!(filter.column, 2);
    /// assert_eq!(filter.operator, "eq");
    /// assert_eq!(filter.args, vec![serde_json::json!(5)]);
    /// ```
    pub fn parse_compact(input: &str) -> Result<Self, String> {
        let mut parts = input.splitn(3, ':');
        let column = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| format!("missing column in filter '{input}'"))?;
        let column: usize = column
            .trim()
            .parse()
            .map_err(|_| format!("invalid column '{column}' in filter '{input}'"))?;
        let operator = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| format!("missing operator in filter '{input}'"))?;
        let args = match parts.next() {
            None => Vec::new(),
            Some(raw) => serde_json::from_str::<Vec<Value>>(raw)
                .map_err(|e| format!("invalid arguments in filter '{input}': {e}"))?,
        };
        Ok(Self::new(column, operator, args))
    }
}
