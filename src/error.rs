use thiserror::Error;

/// Structured error type for dbcompare library operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Duplicate column name: {name}")]
    DuplicateColumnName { name: String },

    #[error("Column at position {index} has an empty name")]
    EmptyColumnName { index: usize },

    #[error("Column not found: {name}")]
    ColumnNotFound { name: String },

    #[error("Column index {index} out of range for {len} column(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Columns of table {table} have not been loaded")]
    SchemaNotLoaded { table: String },

    #[error("Table not found: {table}")]
    TableNotFound { table: String },

    #[error("Database connection failed: {message}")]
    Connection { message: String },

    #[error("Introspection failed: {message}")]
    Introspection { message: String },

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Invalid table identifier: {identifier:?}")]
    InvalidIdentifier { identifier: String },

    #[error("Runtime error: {message}")]
    Runtime { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn duplicate_column(name: impl Into<String>) -> Self {
        Self::DuplicateColumnName { name: name.into() }
    }

    pub fn column_not_found(name: impl Into<String>) -> Self {
        Self::ColumnNotFound { name: name.into() }
    }

    pub fn schema_not_loaded(table: impl Into<String>) -> Self {
        Self::SchemaNotLoaded {
            table: table.into(),
        }
    }

    pub fn table_not_found(table: impl Into<String>) -> Self {
        Self::TableNotFound {
            table: table.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn introspection(message: impl Into<String>) -> Self {
        Self::Introspection {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_identifier(identifier: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.into(),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }
}
