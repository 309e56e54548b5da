use table_reshape::loading::{load_csv_from_path, load_csv_from_reader};
use table_reshape::types::{DataType, Field, Schema, Value};

fn population_schema() -> Schema {
    Schema::new(vec![
        Field::new("Code", DataType::Utf8),
        Field::new("Name", DataType::Utf8),
        Field::new("Geography", DataType::Utf8),
        Field::new("All ages", DataType::Int64),
        Field::new("17", DataType::Int64),
        Field::new("18", DataType::Int64),
        Field::new("19", DataType::Int64),
    ])
}

#[test]
fn load_csv_from_path_happy_path() {
    let schema = population_schema();
    let table = load_csv_from_path("tests/fixtures/population.csv", &schema).unwrap();

    assert_eq!(table.row_count(), 3);
    assert_eq!(
        table.rows[0],
        vec![
            Value::Utf8("E08000035".to_string()),
            Value::Utf8("Leeds".to_string()),
            Value::Utf8("Metropolitan District".to_string()),
            Value::Int64(793_139),
            Value::Int64(8_762),
            Value::Int64(9_079),
            Value::Int64(12_283),
        ]
    );
}

#[test]
fn load_csv_allows_reordered_and_extra_columns() {
    let schema = Schema::new(vec![
        Field::new("Code", DataType::Utf8),
        Field::new("All ages", DataType::Int64),
    ]);
    let input = "Name,All ages,Code\nLeeds,793139,E08000035\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let table = load_csv_from_reader(&mut rdr, &schema).unwrap();
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.rows[0][0], Value::Utf8("E08000035".to_string()));
    assert_eq!(table.rows[0][1], Value::Int64(793_139));
}

#[test]
fn load_csv_maps_empty_cells_to_null() {
    let schema = Schema::new(vec![
        Field::new("Code", DataType::Utf8),
        Field::new("18", DataType::Int64),
    ]);
    let input = "Code,18\nE1,\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let table = load_csv_from_reader(&mut rdr, &schema).unwrap();
    assert!(table.rows[0][1].is_null());
    assert_eq!(table.rows[0][1], Value::Null);
}

#[test]
fn load_csv_errors_on_missing_required_column() {
    let schema = population_schema();
    let input = "Code,Name\nE08000035,Leeds\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = load_csv_from_reader(&mut rdr, &schema).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("shape error"));
    assert!(msg.contains("missing required column 'Geography'"));
}

#[test]
fn load_csv_errors_on_type_parse() {
    let schema = Schema::new(vec![Field::new("18", DataType::Int64)]);
    let input = "18\nnot_a_count\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = load_csv_from_reader(&mut rdr, &schema).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("failed to parse value at row 2"));
    assert!(msg.contains("column '18'"));
}
