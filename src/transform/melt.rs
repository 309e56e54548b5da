//! Wide-to-long reshaping.

use crate::error::{TableError, TableResult};
use crate::types::{DataType, Field, Schema, Table, Value};

/// Reshape a wide table into long format.
///
/// Every column not named in `id_columns` becomes a (category, value) pair: the output has
/// columns `id_columns + [category_name, value_name]` and one row per (input row × non-id
/// column). Input row order is preserved, and within each input row the non-id columns are
/// emitted in their original left-to-right order. The category cell holds the melted
/// column's name.
///
/// The value column takes the shared type of the melted columns; an `Int64`/`Float64` mix
/// promotes to `Float64`. Any other mixture is a [`TableError::Shape`], as is an id column
/// the table does not have, or a `category_name`/`value_name` that clashes with an id
/// column (output names must be unique).
///
/// # Examples
///
/// ```rust
/// use table_reshape::transform::melt;
/// use table_reshape::types::{DataType, Field, Schema, Table, Value};
///
/// let wide = Table::new(
///     Schema::new(vec![
///         Field::new("area", DataType::Utf8),
///         Field::new("2015-2017", DataType::Float64),
///         Field::new("2018-2020", DataType::Float64),
///     ]),
///     vec![vec![
///         Value::Utf8("Leeds".to_string()),
///         Value::Float64(81.1),
///         Value::Float64(81.5),
///     ]],
/// );
///
/// let long = melt(&wide, &["area"], "period", "life_expectancy").unwrap();
/// assert_eq!(long.column_names(), vec!["area", "period", "life_expectancy"]);
/// assert_eq!(long.row_count(), 2);
/// assert_eq!(long.rows[0][1], Value::Utf8("2015-2017".to_string()));
/// ```
pub fn melt(
    table: &Table,
    id_columns: &[&str],
    category_name: &str,
    value_name: &str,
) -> TableResult<Table> {
    let id_idxs = id_columns
        .iter()
        .map(|name| {
            table.schema.index_of(name).ok_or_else(|| TableError::Shape {
                message: format!("id column '{name}' is not in the table"),
            })
        })
        .collect::<TableResult<Vec<usize>>>()?;

    let melted_idxs: Vec<usize> = (0..table.schema.fields.len())
        .filter(|idx| !id_idxs.contains(idx))
        .collect();

    let value_type = unified_value_type(table, &melted_idxs)?;

    let mut fields: Vec<Field> = id_idxs
        .iter()
        .map(|&idx| table.schema.fields[idx].clone())
        .collect();
    fields.push(Field::new(category_name, DataType::Utf8));
    fields.push(Field::new(value_name, value_type));
    let schema = Schema::new(fields);
    schema.ensure_unique_names()?;

    let mut rows = Vec::with_capacity(table.row_count() * melted_idxs.len());
    for row in &table.rows {
        for &melted in &melted_idxs {
            let mut out: Vec<Value> = id_idxs.iter().map(|&idx| row[idx].clone()).collect();
            out.push(Value::Utf8(table.schema.fields[melted].name.clone()));
            out.push(coerce(&row[melted], value_type));
            rows.push(out);
        }
    }

    Ok(Table::new(schema, rows))
}

/// Retain only rows whose category equals the maximum category in the table.
///
/// "Maximum" compares the rendered labels of the category values (see [`Value::label`]),
/// matching the convention of comparing formatted period labels, so `"2018-2020"` beats
/// `"2015-2017"`. Null categories never win; a table whose categories are all null comes
/// back empty. This is the "keep the latest period only" step before pivoting.
pub fn filter_to_max_category(table: &Table, category_column: &str) -> TableResult<Table> {
    let idx = table.resolve_column(category_column)?;

    let max_label = table
        .rows
        .iter()
        .filter_map(|row| row[idx].label())
        .max();

    Ok(match max_label {
        Some(max) => table.filter_rows(|row| row[idx].label().as_deref() == Some(&max)),
        None => Table::new(table.schema.clone(), Vec::new()),
    })
}

fn unified_value_type(table: &Table, melted_idxs: &[usize]) -> TableResult<DataType> {
    let mut unified: Option<DataType> = None;
    for &idx in melted_idxs {
        let field = &table.schema.fields[idx];
        unified = Some(match (unified, field.data_type) {
            (None, t) => t,
            (Some(t), u) if t == u => t,
            (Some(DataType::Int64), DataType::Float64)
            | (Some(DataType::Float64), DataType::Int64) => DataType::Float64,
            (Some(t), u) => {
                return Err(TableError::Shape {
                    message: format!(
                        "cannot melt column '{}' ({u:?}) into a value column of {t:?}",
                        field.name
                    ),
                });
            }
        });
    }
    // A table with no non-id columns melts to zero rows; the value type is arbitrary then.
    Ok(unified.unwrap_or(DataType::Utf8))
}

fn coerce(value: &Value, target: DataType) -> Value {
    match (value, target) {
        (Value::Int64(v), DataType::Float64) => Value::Float64(*v as f64),
        (v, _) => v.clone(),
    }
}
