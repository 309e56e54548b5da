//! Core data model types.
//!
//! Everything in this crate operates on an in-memory [`Table`]: an ordered list of typed,
//! named columns (a [`Schema`]) over row-major [`Value`] storage. Tables are immutable
//! values; every transform returns a new table and never mutates its input.

use crate::error::{TableError, TableResult};

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// An ordered list of fields describing a table's columns.
///
/// Column names are unique within a schema; joins keep them unique by table-qualifying
/// colliding names (see [`Table::resolve_column`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by exact name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Verify that every column name is unique, as the table invariant requires.
    ///
    /// Transforms that assemble new schemas (aggregate, melt, pivot, join) call this
    /// before building any rows, so a caller-supplied name clash surfaces as a
    /// [`TableError::Shape`] naming the duplicate instead of a table whose lookups
    /// silently resolve to the first occurrence.
    pub fn ensure_unique_names(&self) -> TableResult<()> {
        let mut seen = std::collections::HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(TableError::Shape {
                    message: format!("duplicate column name '{}' in output", field.name),
                });
            }
        }
        Ok(())
    }
}

/// A single typed value in a [`Table`] cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render the value as a plain label, or `None` for null.
    ///
    /// Labels are what category comparison and pivot column naming operate on, so two values
    /// that render identically are the same category.
    pub fn label(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Int64(v) => Some(v.to_string()),
            Value::Float64(v) => Some(v.to_string()),
            Value::Bool(v) => Some(v.to_string()),
            Value::Utf8(v) => Some(v.clone()),
        }
    }

    /// Parse a raw string into a typed value.
    ///
    /// Empty (or whitespace-only) input becomes [`Value::Null`] regardless of type.
    pub fn parse_typed(data_type: DataType, raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Value::Null);
        }

        match data_type {
            DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
            DataType::Int64 => trimmed
                .parse::<i64>()
                .map(Value::Int64)
                .map_err(|e| e.to_string()),
            DataType::Float64 => trimmed
                .parse::<f64>()
                .map(Value::Float64)
                .map_err(|e| e.to_string()),
            DataType::Bool => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "t" | "1" | "yes" | "y" => Ok(Value::Bool(true)),
                "false" | "f" | "0" | "no" | "n" => Ok(Value::Bool(false)),
                _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
            },
        }
    }
}

/// In-memory table: a [`Schema`] over row-major [`Value`] storage.
///
/// Invariant: every row's length equals the schema's field count, so the row count is the
/// same for all columns at all times.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from schema and rows.
    ///
    /// Callers constructing rows by hand should prefer [`Table::try_new`], which checks the
    /// row-width invariant.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Create a table, verifying that every row matches the schema width.
    pub fn try_new(schema: Schema, rows: Vec<Vec<Value>>) -> TableResult<Self> {
        let width = schema.fields.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(TableError::Shape {
                    message: format!(
                        "row {i} has {} values but the schema has {width} columns",
                        row.len()
                    ),
                });
            }
        }
        Ok(Self { schema, rows })
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<&str> {
        self.schema.field_names().collect()
    }

    /// Resolve a column reference to its index.
    ///
    /// Resolution order:
    ///
    /// 1. exact name match (including already-qualified names like `"people.code"`);
    /// 2. otherwise, an unqualified name matches qualified columns ending in `".{name}"`.
    ///
    /// An unqualified name matching more than one qualified column (a post-join collision)
    /// is an [`TableError::AmbiguousColumn`]; no match at all is a [`TableError::Shape`].
    pub fn resolve_column(&self, name: &str) -> TableResult<usize> {
        if let Some(idx) = self.schema.index_of(name) {
            return Ok(idx);
        }

        let suffix = format!(".{name}");
        let candidates: Vec<usize> = self
            .schema
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.name.ends_with(&suffix))
            .map(|(i, _)| i)
            .collect();

        match candidates.as_slice() {
            [] => Err(TableError::Shape {
                message: format!("unknown column '{name}'"),
            }),
            [idx] => Ok(*idx),
            _ => Err(TableError::AmbiguousColumn {
                name: name.to_owned(),
                candidates: candidates
                    .iter()
                    .map(|&i| self.schema.fields[i].name.clone())
                    .collect(),
            }),
        }
    }

    /// Create a new table containing only rows that match `predicate`.
    ///
    /// The returned table preserves the original schema and row order.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DataType, Field, Schema, Table, Value};
    use crate::error::TableError;

    fn qualified_table() -> Table {
        Table::new(
            Schema::new(vec![
                Field::new("people.code", DataType::Utf8),
                Field::new("places.code", DataType::Utf8),
                Field::new("name", DataType::Utf8),
            ]),
            vec![],
        )
    }

    #[test]
    fn try_new_rejects_ragged_rows() {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("name", DataType::Utf8),
        ]);
        let err = Table::try_new(
            schema,
            vec![vec![Value::Int64(1), Value::Utf8("a".into())], vec![Value::Int64(2)]],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::Shape { .. }));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn resolve_prefers_exact_match() {
        let t = qualified_table();
        assert_eq!(t.resolve_column("people.code").unwrap(), 0);
        assert_eq!(t.resolve_column("name").unwrap(), 2);
    }

    #[test]
    fn resolve_unqualified_collision_is_ambiguous() {
        let t = qualified_table();
        let err = t.resolve_column("code").unwrap_err();
        match err {
            TableError::AmbiguousColumn { name, candidates } => {
                assert_eq!(name, "code");
                assert_eq!(candidates, vec!["people.code", "places.code"]);
            }
            other => panic!("expected AmbiguousColumn, got {other:?}"),
        }
    }

    #[test]
    fn resolve_unknown_column_is_shape_error() {
        let t = qualified_table();
        assert!(matches!(
            t.resolve_column("missing"),
            Err(TableError::Shape { .. })
        ));
    }

    #[test]
    fn ensure_unique_names_catches_duplicates() {
        let schema = Schema::new(vec![
            Field::new("x", DataType::Int64),
            Field::new("y", DataType::Int64),
            Field::new("x", DataType::Utf8),
        ]);
        let err = schema.ensure_unique_names().unwrap_err();
        assert!(matches!(err, TableError::Shape { .. }));
        assert!(err.to_string().contains("'x'"));

        let ok = Schema::new(vec![Field::new("x", DataType::Int64)]);
        assert!(ok.ensure_unique_names().is_ok());
    }

    #[test]
    fn parse_typed_empty_is_null() {
        assert_eq!(Value::parse_typed(DataType::Int64, "  ").unwrap(), Value::Null);
        assert_eq!(Value::parse_typed(DataType::Utf8, "").unwrap(), Value::Null);
    }
}
