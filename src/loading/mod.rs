//! Loading raw rows into an in-memory [`crate::types::Table`].
//!
//! The transforms in this crate do not care where a table came from; this module is the
//! supplied "read rows from source" capability for the common case of CSV exports.
//! Loading is schema-driven: the caller says which columns it wants and at what type, and
//! the loader matches them to headers by name in any order.

pub mod csv;

pub use csv::{load_csv_from_path, load_csv_from_reader};
