//! In-memory table transformations.
//!
//! All transforms take a [`crate::types::Table`] by reference and return a new table (or
//! fail); inputs are never mutated, so pipelines can reuse intermediate tables freely.
//!
//! - [`classify_numeric_labels()`]: pick column labels by numeric band
//! - [`aggregate()`]: select/rename pass-through columns + row-wise sums per group
//! - [`melt()`]: wide → long, with [`filter_to_max_category()`] for "latest period only"
//! - [`pivot()`]: long → wide, the inverse of melt after filtering to one row per id
//!
//! ## Example: derive age-band totals from single-year-of-age columns
//!
//! ```rust
//! use table_reshape::transform::{aggregate, classify_numeric_labels, AggregationGroup, KeepColumn};
//! use table_reshape::types::{DataType, Field, Schema, Table, Value};
//!
//! let wide = Table::new(
//!     Schema::new(vec![
//!         Field::new("Code", DataType::Utf8),
//!         Field::new("All ages", DataType::Int64),
//!         Field::new("64", DataType::Int64),
//!         Field::new("65", DataType::Int64),
//!         Field::new("66", DataType::Int64),
//!     ]),
//!     vec![vec![
//!         Value::Utf8("E08000035".to_string()),
//!         Value::Int64(100),
//!         Value::Int64(30),
//!         Value::Int64(20),
//!         Value::Int64(10),
//!     ]],
//! );
//!
//! // "All ages" does not parse as an integer, so it never matches.
//! let over_64 = classify_numeric_labels(wide.column_names(), 64);
//! let out = aggregate(
//!     &wide,
//!     &[KeepColumn::renamed("Code", "lad_code")],
//!     &[AggregationGroup::new("over_65", over_64)],
//! )
//! .unwrap();
//!
//! assert_eq!(out.rows[0], vec![Value::Utf8("E08000035".to_string()), Value::Int64(30)]);
//! ```

pub mod aggregate;
pub mod classify;
pub mod melt;
pub mod pivot;

pub use aggregate::{aggregate, AggregationGroup, KeepColumn};
pub use classify::classify_numeric_labels;
pub use melt::{filter_to_max_category, melt};
pub use pivot::pivot;
