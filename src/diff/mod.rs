use crate::error::Result;
use crate::model::{Column, DiffDirection, Table};
use serde::Serialize;
use std::fmt;

/// One differing attribute, rendered as `<label>: <from> <arrow> <to>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub label: &'static str,
    pub from: String,
    pub to: String,
}

impl FieldChange {
    fn new(label: &'static str, from: impl ToString, to: impl ToString) -> Self {
        Self {
            label,
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn render(&self, direction: DiffDirection) -> String {
        format!(
            "{}: {} {} {}\n",
            self.label,
            self.from,
            direction.arrow(),
            self.to
        )
    }
}

/// What a change does to a destination column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAction {
    Add,
    Remove,
    Modify,
}

impl fmt::Display for ColumnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColumnAction::Add => "add",
            ColumnAction::Remove => "remove",
            ColumnAction::Modify => "modify",
        })
    }
}

/// A change the destination table needs to match the source, in report order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnChange {
    Add(Column),
    Modify {
        column: String,
        changes: Vec<FieldChange>,
    },
    Remove(String),
}

impl ColumnChange {
    pub fn action(&self) -> ColumnAction {
        match self {
            ColumnChange::Add(_) => ColumnAction::Add,
            ColumnChange::Modify { .. } => ColumnAction::Modify,
            ColumnChange::Remove(_) => ColumnAction::Remove,
        }
    }

    pub fn column_name(&self) -> &str {
        match self {
            ColumnChange::Add(column) => &column.name,
            ColumnChange::Modify { column, .. } => column,
            ColumnChange::Remove(name) => name,
        }
    }

    fn render_into(&self, out: &mut String) {
        match self {
            ColumnChange::Add(column) => out.push_str(&addition_line(column)),
            ColumnChange::Modify { column, changes } => {
                out.push_str(&format!("Column '{column}':\n"));
                for change in changes {
                    out.push_str(&change.render(DiffDirection::Forward));
                }
            }
            ColumnChange::Remove(name) => {
                out.push_str(&format!("Remove column '{name}'.\n"));
            }
        }
    }
}

/// Renders a list of changes with the report's literal line formats.
pub fn render_changes(changes: &[ColumnChange]) -> String {
    let mut out = String::new();
    for change in changes {
        change.render_into(&mut out);
    }
    out
}

/// Booleans render as `True` / `False` in reports and verdicts.
pub fn bool_text(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

impl Column {
    /// Attributes of `self` that differ from `other`, in fixed field order.
    /// `from` holds `self`'s value, `to` holds `other`'s.
    pub fn field_changes(&self, other: &Column) -> Vec<FieldChange> {
        let mut changes = Vec::new();

        if self.name != other.name {
            changes.push(FieldChange::new("Name", &self.name, &other.name));
        }
        if self.data_type != other.data_type {
            changes.push(FieldChange::new("Type", &self.data_type, &other.data_type));
        }
        if self.system_type != other.system_type {
            changes.push(FieldChange::new(
                "System type",
                &self.system_type,
                &other.system_type,
            ));
        }
        if self.max_length != other.max_length {
            changes.push(FieldChange::new(
                "Max length",
                self.max_length,
                other.max_length,
            ));
        }
        if self.precision != other.precision {
            changes.push(FieldChange::new(
                "Precision",
                self.precision,
                other.precision,
            ));
        }
        if self.nullable != other.nullable {
            changes.push(FieldChange::new(
                "IsNullable",
                bool_text(self.nullable),
                bool_text(other.nullable),
            ));
        }
        if self.identity != other.identity {
            changes.push(FieldChange::new(
                "IsIdentity",
                bool_text(self.identity),
                bool_text(other.identity),
            ));
        }

        changes
    }

    /// One line per differing attribute; empty when the columns are equal.
    pub fn diff(&self, other: &Column, direction: DiffDirection) -> String {
        self.field_changes(other)
            .iter()
            .map(|change| change.render(direction))
            .collect()
    }
}

/// `Add [<name>] <type>[(<length>)] [identity(1, 1) ]null|not null`
fn addition_line(column: &Column) -> String {
    let mut line = format!("Add [{}] {}", column.name, column.data_type);
    match column.data_type.as_str() {
        "nvarchar" => line.push_str(&length_suffix(column.max_length, 2)),
        "varchar" => line.push_str(&length_suffix(column.max_length, 1)),
        _ => {}
    }
    line.push(' ');
    if column.identity {
        line.push_str("identity(1, 1) ");
    }
    line.push_str(if column.nullable { "null" } else { "not null" });
    line.push('\n');
    line
}

/// `max_length` is in bytes; nvarchar stores two bytes per character.
fn length_suffix(max_length: i32, bytes_per_char: i32) -> String {
    if max_length == -1 {
        "(max)".to_string()
    } else {
        format!("({})", max_length / bytes_per_char)
    }
}

impl Table {
    /// Changes that turn `other` (the destination) into the column shape of `self`
    /// (the source). Columns are matched by name. Additions and modifications
    /// follow source order; removals follow, in destination order.
    pub fn column_changes(&self, other: &Table) -> Result<Vec<ColumnChange>> {
        let source = self.loaded_columns("source")?;
        let destination = other.loaded_columns("destination")?;

        let mut unmatched: Vec<&str> = destination.names().collect();
        let mut changes = Vec::new();

        for (index, src_column) in source.iter().enumerate() {
            if unmatched.is_empty() {
                changes.extend(source.iter().skip(index).cloned().map(ColumnChange::Add));
                break;
            }

            match unmatched.iter().position(|name| *name == src_column.name) {
                Some(position) => {
                    unmatched.remove(position);
                    let dest_column = destination.get_by_name(&src_column.name)?;
                    let field_changes = dest_column.field_changes(src_column);
                    if !field_changes.is_empty() {
                        changes.push(ColumnChange::Modify {
                            column: src_column.name.clone(),
                            changes: field_changes,
                        });
                    }
                }
                None => changes.push(ColumnChange::Add(src_column.clone())),
            }
        }

        changes.extend(
            unmatched
                .into_iter()
                .map(|name| ColumnChange::Remove(name.to_string())),
        );

        Ok(changes)
    }

    /// Column-scoped report of what `other` needs to match `self`.
    /// Schema and ansi-nulls differences are reported by [`Table::property_changes`].
    pub fn diff(&self, other: &Table) -> Result<String> {
        Ok(render_changes(&self.column_changes(other)?))
    }

    /// Table-level settings of `other` that differ from `self`, destination value first.
    pub fn property_changes(&self, other: &Table) -> Vec<FieldChange> {
        let mut changes = Vec::new();
        if self.schema != other.schema {
            changes.push(FieldChange::new("Schema", &other.schema, &self.schema));
        }
        if self.uses_ansi_nulls != other.uses_ansi_nulls {
            changes.push(FieldChange::new(
                "UsesAnsiNulls",
                bool_text(other.uses_ansi_nulls),
                bool_text(self.uses_ansi_nulls),
            ));
        }
        changes
    }
}
