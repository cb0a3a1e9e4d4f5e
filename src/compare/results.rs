use crate::diff::{ColumnAction, ColumnChange};
use serde::Serialize;

/// One column that differs between the compared tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnCompareResult {
    pub action: ColumnAction,
    pub column_name: String,
}

impl From<&ColumnChange> for ColumnCompareResult {
    fn from(change: &ColumnChange) -> Self {
        Self {
            action: change.action(),
            column_name: change.column_name().to_string(),
        }
    }
}

/// Outcome of an equality comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCompareResult {
    /// Whether schema, ansi-nulls setting and columns all match
    pub is_equal: bool,
    /// Per-column differences in report order; empty when equal
    pub columns: Vec<ColumnCompareResult>,
    /// Fingerprint of the source table
    pub source_fingerprint: String,
    /// Fingerprint of the destination table
    pub destination_fingerprint: String,
}

impl TableCompareResult {
    pub fn has_column_changes(&self) -> bool {
        !self.columns.is_empty()
    }
}
