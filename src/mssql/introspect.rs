use crate::compare::SchemaSource;
use crate::error::{Error, Result};
use crate::identifier::TableIdentifier;
use crate::model::{Column, ColumnCollection, Table};
use crate::mssql::connection::MssqlConnection;
use async_trait::async_trait;
use tiberius::Row;

const TABLE_BY_NAME: &str = r#"
    SELECT TOP (1) t.object_id, s.name AS schema_name, t.uses_ansi_nulls
    FROM sys.tables t
    JOIN sys.schemas s ON t.schema_id = s.schema_id
    WHERE t.name = @P1
    ORDER BY CASE WHEN s.name = SCHEMA_NAME() THEN 0 ELSE 1 END, s.name
"#;

const TABLE_BY_QUALIFIED_NAME: &str = r#"
    SELECT t.object_id, s.name AS schema_name, t.uses_ansi_nulls
    FROM sys.tables t
    JOIN sys.schemas s ON t.schema_id = s.schema_id
    WHERE t.name = @P1 AND s.name = @P2
"#;

const COLUMNS: &str = r#"
    SELECT
        c.name,
        ut.name AS type_name,
        COALESCE(st.name, ut.name) AS system_type_name,
        c.max_length,
        c.precision,
        c.is_nullable,
        c.is_identity
    FROM sys.columns c
    JOIN sys.types ut ON c.user_type_id = ut.user_type_id
    -- CLR types (geography, geometry, hierarchyid) have no system type row
    LEFT JOIN sys.types st ON c.system_type_id = st.user_type_id
    WHERE c.object_id = @P1
    ORDER BY c.column_id
"#;

struct TableHeader {
    object_id: i32,
    schema: String,
    uses_ansi_nulls: bool,
}

/// Reads the schema name, ansi-nulls setting and columns of one table.
///
/// An unqualified name resolves to the login's default schema when the table
/// exists there, otherwise to the first matching schema by name.
pub async fn introspect_table(
    connection: &mut MssqlConnection,
    table: &TableIdentifier,
) -> Result<Table> {
    let header = fetch_header(connection, table).await?;
    let columns = fetch_columns(connection, header.object_id).await?;

    tracing::debug!(
        server = connection.address(),
        %table,
        schema = %header.schema,
        columns = columns.len(),
        "introspected table"
    );

    Ok(Table::new(header.schema, header.uses_ansi_nulls)
        .with_columns(ColumnCollection::new(columns)?))
}

async fn fetch_header(
    connection: &mut MssqlConnection,
    table: &TableIdentifier,
) -> Result<TableHeader> {
    let name = table.name.as_str();
    let client = connection.client();
    let stream = match table.schema.as_deref() {
        Some(schema) => client.query(TABLE_BY_QUALIFIED_NAME, &[&name, &schema]).await,
        None => client.query(TABLE_BY_NAME, &[&name]).await,
    }
    .map_err(|e| Error::introspection(format!("Failed to look up table {table}: {e}")))?;

    let row = stream
        .into_row()
        .await
        .map_err(|e| Error::introspection(format!("Failed to look up table {table}: {e}")))?
        .ok_or_else(|| Error::table_not_found(table.to_string()))?;

    Ok(TableHeader {
        object_id: required(&row, "object_id")?,
        schema: required_str(&row, "schema_name")?,
        uses_ansi_nulls: optional(&row, "uses_ansi_nulls")?.unwrap_or(false),
    })
}

async fn fetch_columns(connection: &mut MssqlConnection, object_id: i32) -> Result<Vec<Column>> {
    let rows = connection
        .client()
        .query(COLUMNS, &[&object_id])
        .await
        .map_err(|e| Error::introspection(format!("Failed to fetch columns: {e}")))?
        .into_first_result()
        .await
        .map_err(|e| Error::introspection(format!("Failed to fetch columns: {e}")))?;

    rows.iter().map(column_from_row).collect()
}

fn column_from_row(row: &Row) -> Result<Column> {
    Ok(Column {
        name: required_str(row, "name")?,
        data_type: required_str(row, "type_name")?,
        system_type: required_str(row, "system_type_name")?,
        max_length: i32::from(required::<i16>(row, "max_length")?),
        precision: i32::from(required::<u8>(row, "precision")?),
        nullable: optional(row, "is_nullable")?.unwrap_or(false),
        identity: required(row, "is_identity")?,
    })
}

fn optional<'a, T>(row: &'a Row, column: &str) -> Result<Option<T>>
where
    T: tiberius::FromSql<'a>,
{
    row.try_get::<T, _>(column)
        .map_err(|e| Error::introspection(format!("Unexpected value in {column}: {e}")))
}

fn required<'a, T>(row: &'a Row, column: &str) -> Result<T>
where
    T: tiberius::FromSql<'a>,
{
    optional(row, column)?
        .ok_or_else(|| Error::introspection(format!("Unexpected NULL in {column}")))
}

fn required_str(row: &Row, column: &str) -> Result<String> {
    required::<&str>(row, column).map(str::to_string)
}

#[async_trait]
impl SchemaSource for MssqlConnection {
    async fn load_table(&mut self, table: &TableIdentifier) -> Result<Table> {
        introspect_table(self, table).await
    }
}
