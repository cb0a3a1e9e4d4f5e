use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A table name, optionally qualified with its schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableIdentifier {
    pub schema: Option<String>,
    pub name: String,
}

impl TableIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    /// Accepts `table`, `schema.table` and the bracketed forms `[schema].[table]`.
    pub fn parse(input: &str) -> Result<Self> {
        let part = r"(?:\[([^\]]+)\]|([^.\[\]\s]+))";
        let re = Regex::new(&format!(r"^\s*(?:{part}\.)?{part}\s*$"))
            .map_err(|e| Error::runtime(e.to_string()))?;

        let caps = re
            .captures(input)
            .ok_or_else(|| Error::invalid_identifier(input))?;

        let schema = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string());
        let name = caps
            .get(3)
            .or_else(|| caps.get(4))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| Error::invalid_identifier(input))?;

        Ok(Self { schema, name })
    }
}

impl FromStr for TableIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TableIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_name() {
        assert_eq!(
            TableIdentifier::parse("users").unwrap(),
            TableIdentifier::new("users")
        );
    }

    #[test]
    fn parses_schema_qualified_name() {
        assert_eq!(
            TableIdentifier::parse("sales.orders").unwrap(),
            TableIdentifier::qualified("sales", "orders")
        );
    }

    #[test]
    fn parses_bracketed_names() {
        assert_eq!(
            TableIdentifier::parse("[dbo].[Order Details]").unwrap(),
            TableIdentifier::qualified("dbo", "Order Details")
        );
        assert_eq!(
            TableIdentifier::parse("[My Table]").unwrap(),
            TableIdentifier::new("My Table")
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(
            TableIdentifier::parse("  dbo.users ").unwrap(),
            TableIdentifier::qualified("dbo", "users")
        );
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for input in ["", "   ", "a.b.c", "dbo.", ".users", "[unclosed", "two words"] {
            assert!(
                matches!(
                    TableIdentifier::parse(input),
                    Err(Error::InvalidIdentifier { .. })
                ),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn display_round_trips_qualification() {
        assert_eq!(TableIdentifier::qualified("dbo", "users").to_string(), "dbo.users");
        assert_eq!(TableIdentifier::new("users").to_string(), "users");
    }
}
