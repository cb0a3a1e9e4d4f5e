mod collection;

pub use collection::ColumnCollection;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single table column as reported by schema introspection.
///
/// Equality is structural over all seven attributes; string attributes
/// compare exactly (case-sensitive, ordinal).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Column {
    pub name: String,
    /// Declared (user) type name, e.g. `nvarchar` or an alias type.
    pub data_type: String,
    /// Underlying system type name.
    pub system_type: String,
    /// Length in bytes; `-1` for `max` types.
    pub max_length: i32,
    pub precision: i32,
    pub nullable: bool,
    pub identity: bool,
}

impl Column {
    /// Creates a non-nullable, non-identity column whose system type equals its declared type.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        let data_type = data_type.into();
        Self {
            name: name.into(),
            system_type: data_type.clone(),
            data_type,
            max_length: 0,
            precision: 0,
            nullable: false,
            identity: false,
        }
    }

    pub fn with_system_type(mut self, system_type: impl Into<String>) -> Self {
        self.system_type = system_type.into();
        self
    }

    pub fn with_max_length(mut self, max_length: i32) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_precision(mut self, precision: i32) -> Self {
        self.precision = precision;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn identity(mut self) -> Self {
        self.identity = true;
        self
    }
}

/// Which side of a change line is the current value and which is the target.
///
/// Passed explicitly to every diff call; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffDirection {
    /// `self` becomes `other`.
    Forward,
    /// `self` comes from `other`.
    Backward,
}

impl DiffDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            DiffDirection::Forward => "-->",
            DiffDirection::Backward => "<--",
        }
    }
}

impl fmt::Display for DiffDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.arrow())
    }
}

/// A table's column schema together with its table-level settings.
///
/// `columns` is `None` until introspection has populated it.
/// An unloaded table and a loaded table with zero columns are different things.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    pub schema: String,
    pub uses_ansi_nulls: bool,
    pub columns: Option<ColumnCollection>,
}

impl Table {
    pub fn new(schema: impl Into<String>, uses_ansi_nulls: bool) -> Self {
        Self {
            schema: schema.into(),
            uses_ansi_nulls,
            columns: None,
        }
    }

    pub fn with_columns(mut self, columns: ColumnCollection) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.columns.is_some()
    }

    /// Returns the loaded columns, or `SchemaNotLoaded` naming `role` in the error.
    pub fn loaded_columns(&self, role: &str) -> crate::Result<&ColumnCollection> {
        self.columns
            .as_ref()
            .ok_or_else(|| crate::Error::schema_not_loaded(role))
    }

    /// SHA-256 over the schema name, ansi-nulls flag and columns in name order.
    ///
    /// Tables that compare equal produce the same fingerprint.
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};

        #[derive(Serialize)]
        struct Canonical<'a> {
            schema: &'a str,
            uses_ansi_nulls: bool,
            columns: Option<Vec<&'a Column>>,
        }

        let columns = self.columns.as_ref().map(|columns| {
            let mut sorted: Vec<&Column> = columns.iter().collect();
            sorted.sort_by(|a, b| a.name.cmp(&b.name));
            sorted
        });
        let canonical = Canonical {
            schema: &self.schema,
            uses_ansi_nulls: self.uses_ansi_nulls,
            columns,
        };
        let json = serde_json::to_string(&canonical).expect("Table must serialize");
        hex::encode(Sha256::digest(json.as_bytes()))
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema
            && self.uses_ansi_nulls == other.uses_ansi_nulls
            && self.columns == other.columns
    }
}

impl Eq for Table {}
