//! Schema-driven CSV loading.

use std::path::Path;

use crate::error::{TableError, TableResult};
use crate::types::{Schema, Table, Value};

/// Load a CSV file into an in-memory [`Table`].
///
/// Rules:
///
/// - The CSV must have headers.
/// - Headers must contain all schema fields (order can differ; extra columns are ignored).
/// - Each value is parsed according to the schema field type; empty cells become null.
pub fn load_csv_from_path(path: impl AsRef<Path>, schema: &Schema) -> TableResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    load_csv_from_reader(&mut rdr, schema)
}

/// Load CSV data from an existing CSV reader.
pub fn load_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> TableResult<Table> {
    let headers = rdr.headers()?.clone();

    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| h == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(TableError::Shape {
                    message: format!(
                        "missing required column '{field}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            let value =
                Value::parse_typed(field.data_type, raw).map_err(|message| TableError::Parse {
                    row: user_row,
                    column: field.name.clone(),
                    raw: raw.to_owned(),
                    message,
                })?;
            row.push(value);
        }
        rows.push(row);
    }

    Ok(Table::new(schema.clone(), rows))
}
