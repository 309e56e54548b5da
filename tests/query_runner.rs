use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use table_reshape::query::{QueryContext, QueryEngine, QueryObserver, QueryRunner, QueryStats};
use table_reshape::types::{DataType, Field, Schema, Table, Value};
use table_reshape::{TableError, TableResult};

/// A stand-in for the external SQL capability: holds named tables and understands exactly
/// the `SELECT * FROM <table> WHERE geo_type = '<value>'` shape the templates produce.
struct GeoFilterEngine {
    tables: HashMap<String, Table>,
}

impl QueryEngine for GeoFilterEngine {
    fn execute(&mut self, sql: &str) -> TableResult<Table> {
        let (_, rest) = sql
            .split_once(" FROM ")
            .ok_or_else(|| TableError::Shape {
                message: format!("unsupported query: {sql}"),
            })?;
        let (table_name, filter) = rest.split_once(" WHERE geo_type = ").unwrap_or((rest, ""));

        let table = self
            .tables
            .get(table_name.trim())
            .ok_or_else(|| TableError::Shape {
                message: format!("unknown table '{table_name}'"),
            })?;

        if filter.is_empty() {
            return Ok(table.clone());
        }
        let wanted = filter.trim().trim_matches('\'').to_string();
        let idx = table.resolve_column("geo_type")?;
        Ok(table.filter_rows(|row| row[idx] == Value::Utf8(wanted.clone())))
    }
}

fn ons_out() -> Table {
    let row = |code: &str, geo: &str, over_18: i64| {
        vec![
            Value::Utf8(code.to_string()),
            Value::Utf8(geo.to_string()),
            Value::Int64(over_18),
        ]
    };
    Table::new(
        Schema::new(vec![
            Field::new("lad_code", DataType::Utf8),
            Field::new("geo_type", DataType::Utf8),
            Field::new("over_18", DataType::Int64),
        ]),
        vec![
            row("E92000001", "Country", 44_502_991),
            row("E12000003", "Region", 4_288_244),
            row("E08000035", "Metropolitan District", 611_663),
            row("E06000014", "Unitary Authority", 166_092),
        ],
    )
}

fn engine() -> GeoFilterEngine {
    GeoFilterEngine {
        tables: HashMap::from([("ons_out".to_string(), ons_out())]),
    }
}

#[test]
fn one_result_table_per_value_in_order() {
    let mut runner = QueryRunner::new(engine());
    let results = runner
        .run_parameterized(
            "SELECT * FROM ons_out WHERE geo_type = '{}'",
            &["Country", "Region", "Unitary Authority"],
        )
        .unwrap();

    assert_eq!(results.len(), 3);
    let expected = ["Country", "Region", "Unitary Authority"];
    for (table, geo) in results.iter().zip(expected) {
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.rows[0][1], Value::Utf8(geo.to_string()));
    }
}

#[test]
fn values_with_no_matching_rows_yield_empty_tables() {
    let mut runner = QueryRunner::new(engine());
    let results = runner
        .run_parameterized(
            "SELECT * FROM ons_out WHERE geo_type = '{}'",
            &["Region", "Parish"],
        )
        .unwrap();

    assert_eq!(results[0].row_count(), 1);
    assert_eq!(results[1].row_count(), 0);
}

#[derive(Default)]
struct SqlAudit {
    log: Mutex<Vec<String>>,
}

impl QueryObserver for SqlAudit {
    fn on_query(&self, ctx: &QueryContext) {
        self.log.lock().unwrap().push(ctx.sql.clone());
    }

    fn on_success(&self, _ctx: &QueryContext, _stats: QueryStats) {}
}

#[test]
fn observer_captures_substituted_sql() {
    let audit = Arc::new(SqlAudit::default());
    let mut runner = QueryRunner::new(engine()).with_observer(audit.clone());

    runner
        .run_parameterized("SELECT * FROM ons_out WHERE geo_type = '{}'", &["Country"])
        .unwrap();

    assert_eq!(
        *audit.log.lock().unwrap(),
        vec!["SELECT * FROM ons_out WHERE geo_type = 'Country'"]
    );
}
