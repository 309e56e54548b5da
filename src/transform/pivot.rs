//! Long-to-wide reshaping.

use std::collections::HashMap;

use crate::error::{TableError, TableResult};
use crate::types::{Field, Schema, Table, Value};

/// Reshape a long table back into wide format.
///
/// One output row per distinct `id_columns` tuple (in first-appearance order); one output
/// column per distinct category, named `name_prefix + category_label`, also in
/// first-appearance order. An (id, category) combination with no row yields null; rows
/// whose category is null carry no column name and are skipped. A generated column name
/// that clashes with an id column (or another category) is a [`TableError::Shape`].
///
/// Id tuples and categories are identified by their rendered labels (see
/// [`Value::label`]): id cells that render identically, such as `Int64(1)` and
/// `Utf8("1")`, belong to the same output row.
///
/// Two rows sharing the same id tuple and category would both claim one output cell, so
/// that fails with [`TableError::AmbiguousPivot`]; filter to uniqueness first, e.g. with
/// [`super::filter_to_max_category`].
///
/// # Examples
///
/// ```rust
/// use table_reshape::transform::pivot;
/// use table_reshape::types::{DataType, Field, Schema, Table, Value};
///
/// let long = Table::new(
///     Schema::new(vec![
///         Field::new("code", DataType::Utf8),
///         Field::new("period", DataType::Utf8),
///         Field::new("value", DataType::Float64),
///     ]),
///     vec![vec![
///         Value::Utf8("E1".to_string()),
///         Value::Utf8("2018-2020".to_string()),
///         Value::Float64(81.5),
///     ]],
/// );
///
/// let wide = pivot(&long, &["code"], "period", "value", "le_").unwrap();
/// assert_eq!(wide.column_names(), vec!["code", "le_2018-2020"]);
/// assert_eq!(wide.rows[0][1], Value::Float64(81.5));
/// ```
pub fn pivot(
    table: &Table,
    id_columns: &[&str],
    category_column: &str,
    value_column: &str,
    name_prefix: &str,
) -> TableResult<Table> {
    let id_idxs = id_columns
        .iter()
        .map(|name| {
            table.schema.index_of(name).ok_or_else(|| TableError::Shape {
                message: format!("id column '{name}' is not in the table"),
            })
        })
        .collect::<TableResult<Vec<usize>>>()?;
    let category_idx = table.schema.index_of(category_column).ok_or_else(|| {
        TableError::Shape {
            message: format!("category column '{category_column}' is not in the table"),
        }
    })?;
    let value_idx = table.schema.index_of(value_column).ok_or_else(|| TableError::Shape {
        message: format!("value column '{value_column}' is not in the table"),
    })?;

    // Ids are keyed by their rendered labels; two id tuples that render identically are the
    // same entity.
    let mut id_order: Vec<Vec<Value>> = Vec::new();
    let mut id_lookup: HashMap<Vec<Option<String>>, usize> = HashMap::new();
    let mut category_order: Vec<String> = Vec::new();
    let mut category_lookup: HashMap<String, usize> = HashMap::new();
    let mut cells: HashMap<(usize, usize), Value> = HashMap::new();

    for row in &table.rows {
        let Some(category) = row[category_idx].label() else {
            continue;
        };

        let id_key: Vec<Option<String>> = id_idxs.iter().map(|&idx| row[idx].label()).collect();
        let id_pos = *id_lookup.entry(id_key).or_insert_with(|| {
            id_order.push(id_idxs.iter().map(|&idx| row[idx].clone()).collect());
            id_order.len() - 1
        });
        let category_pos = *category_lookup.entry(category.clone()).or_insert_with(|| {
            category_order.push(category.clone());
            category_order.len() - 1
        });

        if cells
            .insert((id_pos, category_pos), row[value_idx].clone())
            .is_some()
        {
            let id = id_order[id_pos]
                .iter()
                .map(|v| v.label().unwrap_or_else(|| "null".to_string()))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(TableError::AmbiguousPivot { id, category });
        }
    }

    let value_type = table.schema.fields[value_idx].data_type;
    let mut fields: Vec<Field> = id_idxs
        .iter()
        .map(|&idx| table.schema.fields[idx].clone())
        .collect();
    for category in &category_order {
        fields.push(Field::new(format!("{name_prefix}{category}"), value_type));
    }
    let schema = Schema::new(fields);
    schema.ensure_unique_names()?;

    let rows = id_order
        .into_iter()
        .enumerate()
        .map(|(id_pos, mut row)| {
            for category_pos in 0..category_order.len() {
                row.push(
                    cells
                        .get(&(id_pos, category_pos))
                        .cloned()
                        .unwrap_or(Value::Null),
                );
            }
            row
        })
        .collect();

    Ok(Table::new(schema, rows))
}
