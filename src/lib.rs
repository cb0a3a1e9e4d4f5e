//! dbcompare - compare the column schema of two SQL Server tables.
//!
//! Reads a source and a destination table and reports, column by column, how
//! the destination would have to change to match the source: either as an
//! equality verdict or as a readable diff.
//!
//! # Quick Start
//!
//! ```
//! use dbcompare::prelude::*;
//!
//! let source = Table::new("dbo", true).with_columns(
//!     ColumnCollection::new(vec![
//!         Column::new("id", "int").identity(),
//!         Column::new("name", "varchar").with_max_length(100),
//!     ])
//!     .unwrap(),
//! );
//! let destination = Table::new("dbo", true).with_columns(
//!     ColumnCollection::new(vec![Column::new("id", "int").identity()]).unwrap(),
//! );
//!
//! assert_eq!(
//!     source.diff(&destination).unwrap(),
//!     "Add [name] varchar(100) not null\n"
//! );
//! ```
//!
//! # Modules
//!
//! - [`model`] - Column, ColumnCollection and Table
//! - [`diff`] - Column and table change computation and rendering
//! - [`compare`] - Comparison results and the [`compare::SchemaSource`] seam
//! - [`mssql`] - SQL Server connection and introspection
//! - [`api`] - Connect, introspect and compare in one call
//! - [`config`] - Typed JSON configuration

pub mod api;
pub mod compare;
pub mod config;
pub mod diff;
pub mod error;
pub mod identifier;
pub mod model;
pub mod mssql;
pub mod prelude;

pub use error::{Error, Result};
