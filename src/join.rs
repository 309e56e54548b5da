//! Equality joins between two tables.
//!
//! Joins compare key columns for equality with standard SQL null semantics: a null key on
//! either side matches nothing, including another null. Duplicate key values are fully
//! expanded: every matching pair of rows is emitted, never deduplicated.

use std::collections::HashMap;

use crate::error::{TableError, TableResult};
use crate::types::{Field, Schema, Table, Value};

/// Which unmatched rows survive the join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Only matched pairs.
    Inner,
    /// Matched pairs plus unmatched left rows (right columns null).
    Left,
    /// Matched pairs plus unmatched right rows (left columns null).
    Right,
    /// Matched pairs plus unmatched rows from both sides.
    Full,
}

/// Options controlling join behavior and output naming.
#[derive(Debug, Clone)]
pub struct JoinOptions {
    /// Join kind.
    pub kind: JoinKind,
    /// Qualifier applied to left-side columns whose name also appears on the right.
    pub left_name: String,
    /// Qualifier applied to right-side columns whose name also appears on the left.
    pub right_name: String,
}

impl JoinOptions {
    /// Options for `kind` with the default `"left"`/`"right"` qualifiers.
    pub fn new(kind: JoinKind) -> Self {
        Self {
            kind,
            left_name: "left".to_string(),
            right_name: "right".to_string(),
        }
    }

    /// Set the table names used to qualify colliding column names.
    pub fn with_names(mut self, left_name: impl Into<String>, right_name: impl Into<String>) -> Self {
        self.left_name = left_name.into();
        self.right_name = right_name.into();
        self
    }
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self::new(JoinKind::Inner)
    }
}

// Hashable normalization of a non-null key value. Floats compare by exact bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeyPart {
    Int(i64),
    Float(u64),
    Bool(bool),
    Str(String),
}

fn row_key(row: &[Value], idxs: &[usize]) -> Option<Vec<KeyPart>> {
    idxs.iter()
        .map(|&idx| match &row[idx] {
            Value::Null => None,
            Value::Int64(v) => Some(KeyPart::Int(*v)),
            Value::Float64(v) => Some(KeyPart::Float(v.to_bits())),
            Value::Bool(v) => Some(KeyPart::Bool(*v)),
            Value::Utf8(v) => Some(KeyPart::Str(v.clone())),
        })
        .collect()
}

/// Join two tables on equality of their key columns.
///
/// Output columns are all left columns followed by all right columns, in their original
/// orders. A column name present in both tables is emitted table-qualified on both sides
/// (`"{table}.{name}"`, using [`JoinOptions::left_name`]/[`JoinOptions::right_name`]); an
/// unqualified reference to such a name later fails via
/// [`Table::resolve_column`](crate::types::Table::resolve_column).
///
/// Row order: [`JoinKind::Inner`], [`JoinKind::Left`], and [`JoinKind::Full`] are driven by
/// left row order (matches expand in right row order); [`JoinKind::Right`] is driven by
/// right row order; [`JoinKind::Full`] appends unmatched right rows after the left-driven
/// result.
///
/// Key columns absent from a side fail with [`TableError::KeyMismatch`]; `left_on` and
/// `right_on` of different lengths are a [`TableError::Shape`].
pub fn join(
    left: &Table,
    right: &Table,
    left_on: &[&str],
    right_on: &[&str],
    options: &JoinOptions,
) -> TableResult<Table> {
    if left_on.len() != right_on.len() {
        return Err(TableError::Shape {
            message: format!(
                "join key lists differ in length: {} left vs {} right",
                left_on.len(),
                right_on.len()
            ),
        });
    }

    let left_idxs = resolve_keys(left, left_on, "left")?;
    let right_idxs = resolve_keys(right, right_on, "right")?;

    let schema = joined_schema(left, right, options);
    // Qualification keeps collisions apart unless the two qualifiers are themselves equal.
    schema.ensure_unique_names()?;
    let left_width = left.schema.fields.len();
    let right_width = right.schema.fields.len();

    let mut rows: Vec<Vec<Value>> = Vec::new();

    match options.kind {
        JoinKind::Inner | JoinKind::Left | JoinKind::Full => {
            let right_index = build_index(right, &right_idxs);
            let mut right_matched = vec![false; right.row_count()];

            for left_row in &left.rows {
                let matches = row_key(left_row, &left_idxs)
                    .and_then(|key| right_index.get(&key))
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);

                if matches.is_empty() {
                    if matches!(options.kind, JoinKind::Left | JoinKind::Full) {
                        rows.push(pad_right(left_row, right_width));
                    }
                } else {
                    for &right_pos in matches {
                        right_matched[right_pos] = true;
                        let mut row = left_row.clone();
                        row.extend(right.rows[right_pos].iter().cloned());
                        rows.push(row);
                    }
                }
            }

            if options.kind == JoinKind::Full {
                for (right_pos, matched) in right_matched.iter().enumerate() {
                    if !matched {
                        rows.push(pad_left(&right.rows[right_pos], left_width));
                    }
                }
            }
        }
        JoinKind::Right => {
            let left_index = build_index(left, &left_idxs);

            for right_row in &right.rows {
                let matches = row_key(right_row, &right_idxs)
                    .and_then(|key| left_index.get(&key))
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);

                if matches.is_empty() {
                    rows.push(pad_left(right_row, left_width));
                } else {
                    for &left_pos in matches {
                        let mut row = left.rows[left_pos].clone();
                        row.extend(right_row.iter().cloned());
                        rows.push(row);
                    }
                }
            }
        }
    }

    Ok(Table::new(schema, rows))
}

fn resolve_keys(table: &Table, keys: &[&str], side: &str) -> TableResult<Vec<usize>> {
    keys.iter()
        .map(|&column| {
            table
                .schema
                .index_of(column)
                .ok_or_else(|| TableError::KeyMismatch {
                    column: column.to_owned(),
                    side: side.to_owned(),
                })
        })
        .collect()
}

fn build_index(table: &Table, key_idxs: &[usize]) -> HashMap<Vec<KeyPart>, Vec<usize>> {
    let mut index: HashMap<Vec<KeyPart>, Vec<usize>> = HashMap::new();
    for (pos, row) in table.rows.iter().enumerate() {
        if let Some(key) = row_key(row, key_idxs) {
            index.entry(key).or_default().push(pos);
        }
    }
    index
}

fn joined_schema(left: &Table, right: &Table, options: &JoinOptions) -> Schema {
    let collides = |name: &str| {
        left.schema.index_of(name).is_some() && right.schema.index_of(name).is_some()
    };

    let mut fields = Vec::with_capacity(left.schema.fields.len() + right.schema.fields.len());
    for field in &left.schema.fields {
        let name = if collides(&field.name) {
            format!("{}.{}", options.left_name, field.name)
        } else {
            field.name.clone()
        };
        fields.push(Field::new(name, field.data_type));
    }
    for field in &right.schema.fields {
        let name = if collides(&field.name) {
            format!("{}.{}", options.right_name, field.name)
        } else {
            field.name.clone()
        };
        fields.push(Field::new(name, field.data_type));
    }
    Schema::new(fields)
}

fn pad_right(left_row: &[Value], right_width: usize) -> Vec<Value> {
    let mut row = left_row.to_vec();
    row.extend(std::iter::repeat_n(Value::Null, right_width));
    row
}

fn pad_left(right_row: &[Value], left_width: usize) -> Vec<Value> {
    let mut row: Vec<Value> = std::iter::repeat_n(Value::Null, left_width).collect();
    row.extend(right_row.iter().cloned());
    row
}
