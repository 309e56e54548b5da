//! `table-reshape` is a small toolkit for preparing and reporting over in-memory tables:
//! typed columns with nulls, column classification by numeric label, row-wise aggregation
//! groups, wide↔long reshaping, equality joins, and a parameterized query runner.
//!
//! It grew out of a demographic reporting workflow: two spreadsheets (single-year-of-age
//! population counts, and life expectancy per period) are loaded, reshaped into one table
//! per area, joined, and then queried repeatedly for presentation. The toolkit covers the
//! loading/reshaping/joining half of that; the SQL half stays in an external evaluator
//! reached through the narrow [`query::QueryEngine`] trait.
//!
//! Tables are immutable values: every transform returns a new [`types::Table`], so
//! intermediate tables can feed any number of downstream transforms and queries.
//!
//! ## Quick example: age bands from a wide population table
//!
//! ```rust
//! use table_reshape::transform::{aggregate, classify_numeric_labels, AggregationGroup, KeepColumn};
//! use table_reshape::types::{DataType, Field, Schema, Table, Value};
//!
//! # fn main() -> Result<(), table_reshape::TableError> {
//! // One column per single year of age, plus summary columns that must not be summed.
//! let ons = Table::new(
//!     Schema::new(vec![
//!         Field::new("Code", DataType::Utf8),
//!         Field::new("All ages", DataType::Int64),
//!         Field::new("64", DataType::Int64),
//!         Field::new("65", DataType::Int64),
//!     ]),
//!     vec![vec![
//!         Value::Utf8("E08000035".to_string()),
//!         Value::Int64(500),
//!         Value::Int64(30),
//!         Value::Int64(20),
//!     ]],
//! );
//!
//! let over_64 = classify_numeric_labels(ons.column_names(), 64);
//! let out = aggregate(
//!     &ons,
//!     &[KeepColumn::renamed("Code", "lad_code")],
//!     &[AggregationGroup::new("over_65", over_64)],
//! )?;
//! assert_eq!(out.rows[0], vec![Value::Utf8("E08000035".to_string()), Value::Int64(20)]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema + in-memory table types
//! - [`loading`]: schema-driven CSV loading into tables
//! - [`transform`]: classify/aggregate/melt/pivot transforms
//! - [`join`]: inner/left/right/full equality joins
//! - [`query`]: parameterized query running over an external evaluator
//! - [`error`]: error types used across the crate

pub mod error;
pub mod join;
pub mod loading;
pub mod query;
pub mod transform;
pub mod types;

pub use error::{TableError, TableResult};
