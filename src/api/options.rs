use crate::config::{Config, EndpointConfig};
use crate::error::Result;
use crate::identifier::TableIdentifier;

/// Where one side of the comparison lives.
#[derive(Clone)]
pub struct Endpoint {
    /// ADO.NET style connection string
    pub connection_string: String,
    /// Table to read on that server
    pub table: TableIdentifier,
}

impl Endpoint {
    pub fn new(connection_string: impl Into<String>, table: TableIdentifier) -> Self {
        Self {
            connection_string: connection_string.into(),
            table,
        }
    }

    fn from_config(config: &EndpointConfig) -> Result<Self> {
        Ok(Self::new(
            config.connection_string.clone(),
            config.table_identifier()?,
        ))
    }
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("connection_string", &"<redacted>")
            .field("table", &self.table)
            .finish()
    }
}

/// Options for comparing a source table with a destination table.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// The table to change to
    pub source: Endpoint,
    /// The table to be changed
    pub destination: Endpoint,
}

impl CompareOptions {
    pub fn new(source: Endpoint, destination: Endpoint) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Build options from a loaded configuration file.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Endpoint::from_config(&config.db.source)?,
            Endpoint::from_config(&config.db.destination)?,
        ))
    }

    /// Override the source table.
    pub fn with_source_table(mut self, table: TableIdentifier) -> Self {
        self.source.table = table;
        self
    }

    /// Override the destination table.
    pub fn with_destination_table(mut self, table: TableIdentifier) -> Self {
        self.destination.table = table;
        self
    }
}
