//! Typed configuration loaded from a JSON settings file.
//!
//! ```json
//! {
//!   "db": {
//!     "source": { "connectionString": "server=tcp:localhost,1433;...", "table": "users" },
//!     "destination": { "connectionString": "server=tcp:replica,1433;...", "table": "dbo.users" }
//!   }
//! }
//! ```

use crate::error::{Error, Result};
use crate::identifier::TableIdentifier;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub db: DbConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DbConfig {
    pub source: EndpointConfig,
    pub destination: EndpointConfig,
}

/// One side of the comparison: where to connect and which table to read.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
    /// ADO.NET style connection string.
    pub connection_string: String,
    pub table: String,
}

// Connection strings carry passwords.
impl std::fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("connection_string", &"<redacted>")
            .field("table", &self.table)
            .finish()
    }
}

impl EndpointConfig {
    pub fn table_identifier(&self) -> Result<TableIdentifier> {
        TableIdentifier::parse(&self.table)
    }

    fn validate(&self, side: &str) -> Result<()> {
        if self.connection_string.trim().is_empty() {
            return Err(Error::config(format!(
                "db.{side}.connectionString must not be empty"
            )));
        }
        if self.table.trim().is_empty() {
            return Err(Error::config(format!("db.{side}.table must not be empty")));
        }
        self.table_identifier()
            .map_err(|e| Error::config(format!("db.{side}.table: {e}")))?;
        Ok(())
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_json(&text).map_err(|e| match e {
            Error::Config { message } => Error::config(format!("{}: {message}", path.display())),
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(text).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.db.source.validate("source")?;
        self.db.destination.validate("destination")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID: &str = r#"{
        "db": {
            "source": { "connectionString": "server=tcp:src,1433;user=sa;password=secret", "table": "users" },
            "destination": { "connectionString": "server=tcp:dst,1433", "table": "[dbo].[users]" }
        }
    }"#;

    #[test]
    fn parses_valid_config() {
        let config = Config::from_json(VALID).unwrap();
        assert_eq!(config.db.source.table, "users");
        assert_eq!(
            config.db.destination.table_identifier().unwrap(),
            TableIdentifier::qualified("dbo", "users")
        );
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.db.destination.connection_string, "server=tcp:dst,1433");
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn missing_field_is_rejected() {
        let json = r#"{ "db": { "source": { "connectionString": "x", "table": "t" } } }"#;
        let err = Config::from_json(json).unwrap_err();
        assert!(err.to_string().contains("destination"));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            Config::from_json("{ db: }"),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn blank_values_are_rejected() {
        let json = r#"{
            "db": {
                "source": { "connectionString": "   ", "table": "users" },
                "destination": { "connectionString": "x", "table": "users" }
            }
        }"#;
        let err = Config::from_json(json).unwrap_err();
        assert!(err.to_string().contains("db.source.connectionString"));
    }

    #[test]
    fn invalid_table_identifier_is_rejected() {
        let json = r#"{
            "db": {
                "source": { "connectionString": "x", "table": "users" },
                "destination": { "connectionString": "x", "table": "a.b.c" }
            }
        }"#;
        let err = Config::from_json(json).unwrap_err();
        assert!(err.to_string().contains("db.destination.table"));
    }

    #[test]
    fn debug_output_hides_connection_strings() {
        let config = Config::from_json(VALID).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
    }
}
