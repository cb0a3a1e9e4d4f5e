//! High-level API for embedding dbcompare in other applications.
//!
//! These functions connect to both servers, read the two tables and compare
//! them. Both async and blocking variants are available.
//!
//! # Example
//!
//! ```no_run
//! use dbcompare::api::{diff_blocking, CompareOptions};
//! use dbcompare::config::Config;
//!
//! let config = Config::load("config.json").unwrap();
//! let report = diff_blocking(CompareOptions::from_config(&config).unwrap()).unwrap();
//! print!("{report}");
//! ```
//!
//! Note: Blocking variants create a new tokio runtime per call.

mod options;

pub use options::{CompareOptions, Endpoint};

use crate::compare::{compare_tables, diff_tables, TableCompareResult};
use crate::error::{Error, Result};
use crate::mssql::MssqlConnection;

async fn connect_both(options: &CompareOptions) -> Result<(MssqlConnection, MssqlConnection)> {
    tokio::try_join!(
        MssqlConnection::connect(&options.source.connection_string),
        MssqlConnection::connect(&options.destination.connection_string)
    )
}

/// Close failures are logged; they never replace the comparison outcome.
async fn close_both(source: MssqlConnection, destination: MssqlConnection) {
    let (source_closed, destination_closed) = tokio::join!(source.close(), destination.close());
    for closed in [source_closed, destination_closed] {
        if let Err(e) = closed {
            tracing::warn!(error = %e, "failed to close connection");
        }
    }
}

/// Compare the two tables and return an equality verdict with column detail.
pub async fn compare(options: CompareOptions) -> Result<TableCompareResult> {
    let (mut source, mut destination) = connect_both(&options).await?;

    let outcome = compare_tables(
        &mut source,
        &options.source.table,
        &mut destination,
        &options.destination.table,
    )
    .await;

    close_both(source, destination).await;
    outcome
}

/// Compare the two tables and return the human-readable diff report.
pub async fn diff(options: CompareOptions) -> Result<String> {
    let (mut source, mut destination) = connect_both(&options).await?;

    let outcome = diff_tables(
        &mut source,
        &options.source.table,
        &mut destination,
        &options.destination.table,
    )
    .await;

    close_both(source, destination).await;
    outcome
}

fn create_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().map_err(|e| Error::runtime(e.to_string()))
}

/// Blocking variant of [`compare`].
pub fn compare_blocking(options: CompareOptions) -> Result<TableCompareResult> {
    create_runtime()?.block_on(compare(options))
}

/// Blocking variant of [`diff`].
pub fn diff_blocking(options: CompareOptions) -> Result<String> {
    create_runtime()?.block_on(diff(options))
}
