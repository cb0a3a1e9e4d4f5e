//! Convenient re-exports for common dbcompare usage.

// Async functions
pub use crate::api::{compare, diff};

// Blocking functions
pub use crate::api::{compare_blocking, diff_blocking};

// Options
pub use crate::api::{CompareOptions, Endpoint};
pub use crate::config::Config;

// Results
pub use crate::compare::{ColumnCompareResult, TableCompareResult, TABLES_ARE_THE_SAME};
pub use crate::diff::{ColumnAction, ColumnChange, FieldChange};

// Error types
pub use crate::error::{Error, Result};

// Core types
pub use crate::compare::SchemaSource;
pub use crate::identifier::TableIdentifier;
pub use crate::model::{Column, ColumnCollection, DiffDirection, Table};
