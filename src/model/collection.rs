use super::Column;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Columns in introspection order with constant-time lookup by name.
///
/// Built once from a finished list and read-only afterwards. Column names
/// are unique within a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Column>", into = "Vec<Column>")]
pub struct ColumnCollection {
    columns: Vec<Column>,
    positions: HashMap<String, usize>,
}

impl ColumnCollection {
    /// Builds the collection, failing on the first empty or repeated name.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            if column.name.is_empty() {
                return Err(Error::EmptyColumnName { index });
            }
            if positions.insert(column.name.clone(), index).is_some() {
                return Err(Error::duplicate_column(&column.name));
            }
        }
        Ok(Self { columns, positions })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Column> {
        self.columns.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.columns.len(),
        })
    }

    pub fn get_by_name(&self, name: &str) -> Result<&Column> {
        self.position(name)
            .map(|index| &self.columns[index])
            .ok_or_else(|| Error::column_not_found(name))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// Name-based: same count, and each column has an equal column under its name
/// in the other collection. Position does not matter.
impl PartialEq for ColumnCollection {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .columns
                .iter()
                .all(|column| matches!(other.get_by_name(&column.name), Ok(c) if c == column))
    }
}

impl Eq for ColumnCollection {}

impl TryFrom<Vec<Column>> for ColumnCollection {
    type Error = Error;

    fn try_from(columns: Vec<Column>) -> Result<Self> {
        Self::new(columns)
    }
}

impl From<ColumnCollection> for Vec<Column> {
    fn from(collection: ColumnCollection) -> Self {
        collection.columns
    }
}

impl<'a> IntoIterator for &'a ColumnCollection {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
