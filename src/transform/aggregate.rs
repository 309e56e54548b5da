//! Row-wise aggregation groups.

use crate::error::{TableError, TableResult};
use crate::types::{DataType, Field, Schema, Table, Value};

/// A pass-through column, optionally renamed in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepColumn {
    /// Input column name.
    pub source: String,
    /// Output name; `None` keeps the input name.
    pub rename: Option<String>,
}

impl KeepColumn {
    /// Keep a column under its input name.
    pub fn named(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            rename: None,
        }
    }

    /// Keep a column under a new name (e.g. `"Code"` → `"lad_code"`).
    pub fn renamed(source: impl Into<String>, rename: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            rename: Some(rename.into()),
        }
    }

    fn output_name(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.source)
    }
}

/// A named set of input columns summed row-wise into one output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationGroup {
    /// Output column name.
    pub name: String,
    /// Input columns contributing to the sum.
    pub columns: Vec<String>,
}

impl AggregationGroup {
    /// Create a group from an output name and input column names.
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

// Per-group accumulator; the variant is fixed up front by the group's output type.
enum Acc {
    Int(Option<i64>),
    Float(Option<f64>),
}

/// Select (and optionally rename) pass-through columns and compute one row-wise sum per
/// aggregation group.
///
/// Output columns are the kept columns in caller order, then one column per group in
/// declaration order. Row count and row order are preserved. Within a group, nulls are
/// skipped; a row where every contributing value is null yields null.
///
/// A group over `Int64` columns produces an `Int64` column; any `Float64` contributor
/// promotes the output to `Float64`. Groups over `Bool`/`Utf8` columns, or naming a column
/// the table does not have, fail with [`TableError::Shape`], as do output names (kept
/// renames plus group names) that are not unique, and `Int64` sums that would overflow.
///
/// # Examples
///
/// ```rust
/// use table_reshape::transform::{aggregate, AggregationGroup, KeepColumn};
/// use table_reshape::types::{DataType, Field, Schema, Table, Value};
///
/// let wide = Table::new(
///     Schema::new(vec![
///         Field::new("Code", DataType::Utf8),
///         Field::new("17", DataType::Int64),
///         Field::new("18", DataType::Int64),
///     ]),
///     vec![vec![
///         Value::Utf8("E08000035".to_string()),
///         Value::Int64(9_000),
///         Value::Int64(8_500),
///     ]],
/// );
///
/// let out = aggregate(
///     &wide,
///     &[KeepColumn::renamed("Code", "lad_code")],
///     &[AggregationGroup::new("over_16", ["17", "18"])],
/// )
/// .unwrap();
///
/// assert_eq!(out.column_names(), vec!["lad_code", "over_16"]);
/// assert_eq!(out.rows[0][1], Value::Int64(17_500));
/// ```
pub fn aggregate(
    table: &Table,
    keep: &[KeepColumn],
    groups: &[AggregationGroup],
) -> TableResult<Table> {
    let keep_idxs = keep
        .iter()
        .map(|k| {
            table.schema.index_of(&k.source).ok_or_else(|| TableError::Shape {
                message: format!("kept column '{}' is not in the table", k.source),
            })
        })
        .collect::<TableResult<Vec<usize>>>()?;

    // Resolve every group's inputs and decide its output type before touching any row.
    let mut group_plans: Vec<(Vec<usize>, DataType)> = Vec::with_capacity(groups.len());
    for group in groups {
        let mut idxs = Vec::with_capacity(group.columns.len());
        let mut output_type = DataType::Int64;
        for column in &group.columns {
            let idx = table.schema.index_of(column).ok_or_else(|| TableError::Shape {
                message: format!(
                    "aggregation group '{}' names column '{column}', which is not in the table",
                    group.name
                ),
            })?;
            match table.schema.fields[idx].data_type {
                DataType::Int64 => {}
                DataType::Float64 => output_type = DataType::Float64,
                other => {
                    return Err(TableError::Shape {
                        message: format!(
                            "aggregation group '{}' includes non-numeric column '{column}' ({other:?})",
                            group.name
                        ),
                    });
                }
            }
            idxs.push(idx);
        }
        group_plans.push((idxs, output_type));
    }

    let mut fields: Vec<Field> = keep
        .iter()
        .zip(&keep_idxs)
        .map(|(k, &idx)| Field::new(k.output_name(), table.schema.fields[idx].data_type))
        .collect();
    for (group, (_, output_type)) in groups.iter().zip(&group_plans) {
        fields.push(Field::new(group.name.clone(), *output_type));
    }

    let schema = Schema::new(fields);
    schema.ensure_unique_names()?;

    let mut rows = Vec::with_capacity(table.row_count());
    for row in &table.rows {
        let mut out: Vec<Value> = keep_idxs.iter().map(|&idx| row[idx].clone()).collect();
        for (group, (idxs, output_type)) in groups.iter().zip(&group_plans) {
            out.push(sum_row(row, idxs, *output_type, &group.name)?);
        }
        rows.push(out);
    }

    Ok(Table::new(schema, rows))
}

fn sum_row(row: &[Value], idxs: &[usize], output_type: DataType, name: &str) -> TableResult<Value> {
    let mut acc = match output_type {
        DataType::Int64 => Acc::Int(None),
        _ => Acc::Float(None),
    };

    for &idx in idxs {
        match (&mut acc, &row[idx]) {
            (_, Value::Null) => {}
            (Acc::Int(a), Value::Int64(v)) => {
                let sum = a.unwrap_or(0).checked_add(*v).ok_or_else(|| TableError::Shape {
                    message: format!("integer overflow summing group '{name}'"),
                })?;
                *a = Some(sum);
            }
            (Acc::Float(a), Value::Int64(v)) => *a = Some(a.unwrap_or(0.0) + *v as f64),
            (Acc::Float(a), Value::Float64(v)) => *a = Some(a.unwrap_or(0.0) + v),
            (_, other) => {
                return Err(TableError::Shape {
                    message: format!("cannot sum non-numeric value {other:?}"),
                });
            }
        }
    }

    Ok(match acc {
        Acc::Int(Some(v)) => Value::Int64(v),
        Acc::Float(Some(v)) => Value::Float64(v),
        Acc::Int(None) | Acc::Float(None) => Value::Null,
    })
}
