//! Table comparison: fetches both sides, then compares them.

mod results;

pub use results::{ColumnCompareResult, TableCompareResult};

use crate::diff::render_changes;
use crate::error::Result;
use crate::identifier::TableIdentifier;
use crate::model::{DiffDirection, Table};
use async_trait::async_trait;

/// Text returned by [`diff_loaded`] when there is nothing to report.
pub const TABLES_ARE_THE_SAME: &str = "Tables are the same.";

/// Anything that can produce a populated [`Table`] for an identifier.
///
/// Implementations must return an error rather than an empty table when the
/// table cannot be read.
#[async_trait]
pub trait SchemaSource: Send {
    async fn load_table(&mut self, table: &TableIdentifier) -> Result<Table>;
}

/// Loads both tables concurrently. Fails if either load fails.
pub async fn fetch_tables<S, D>(
    source: &mut S,
    source_table: &TableIdentifier,
    destination: &mut D,
    destination_table: &TableIdentifier,
) -> Result<(Table, Table)>
where
    S: SchemaSource + ?Sized,
    D: SchemaSource + ?Sized,
{
    tracing::debug!(%source_table, %destination_table, "fetching table schemas");
    tokio::try_join!(
        source.load_table(source_table),
        destination.load_table(destination_table)
    )
}

/// Equality verdict with per-column detail. `destination` is evaluated against `source`.
pub fn compare_loaded(source: &Table, destination: &Table) -> Result<TableCompareResult> {
    let changes = source.column_changes(destination)?;
    let is_equal = source == destination;

    Ok(TableCompareResult {
        is_equal,
        columns: changes.iter().map(Into::into).collect(),
        source_fingerprint: source.fingerprint(),
        destination_fingerprint: destination.fingerprint(),
    })
}

/// Report of how `destination` must change to match `source`:
/// table-level settings first, then column changes.
pub fn diff_loaded(source: &Table, destination: &Table) -> Result<String> {
    let changes = source.column_changes(destination)?;
    if source == destination {
        return Ok(TABLES_ARE_THE_SAME.to_string());
    }

    let mut report: String = source
        .property_changes(destination)
        .iter()
        .map(|change| change.render(DiffDirection::Forward))
        .collect();
    report.push_str(&render_changes(&changes));
    Ok(report)
}

pub async fn compare_tables<S, D>(
    source: &mut S,
    source_table: &TableIdentifier,
    destination: &mut D,
    destination_table: &TableIdentifier,
) -> Result<TableCompareResult>
where
    S: SchemaSource + ?Sized,
    D: SchemaSource + ?Sized,
{
    let (src, dest) = fetch_tables(source, source_table, destination, destination_table).await?;
    let result = compare_loaded(&src, &dest)?;
    tracing::info!(
        is_equal = result.is_equal,
        column_changes = result.columns.len(),
        "compared {source_table} with {destination_table}"
    );
    Ok(result)
}

pub async fn diff_tables<S, D>(
    source: &mut S,
    source_table: &TableIdentifier,
    destination: &mut D,
    destination_table: &TableIdentifier,
) -> Result<String>
where
    S: SchemaSource + ?Sized,
    D: SchemaSource + ?Sized,
{
    let (src, dest) = fetch_tables(source, source_table, destination, destination_table).await?;
    diff_loaded(&src, &dest)
}
