use thiserror::Error;

/// Convenience result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Error type returned across loading, reshaping, joining, and query running.
///
/// Every variant carries enough context (offending column, key, or category) to diagnose the
/// failure without re-running the transform.
#[derive(Debug, Error)]
pub enum TableError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV loading error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A loaded value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    Parse {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A transform was given a column that does not exist, input of the wrong type, or a table
    /// whose rows do not all match the schema width.
    #[error("shape error: {message}")]
    Shape { message: String },

    /// A join key column is absent from one side, so the join cannot be evaluated.
    #[error("join key '{column}' is missing from the {side} table")]
    KeyMismatch { column: String, side: String },

    /// An unqualified column reference matched more than one table-qualified column.
    #[error("ambiguous column '{name}': matches {candidates:?}; qualify with a table name")]
    AmbiguousColumn {
        name: String,
        candidates: Vec<String>,
    },

    /// More than one long-format row shares the same id columns and category, so the pivot has
    /// no single value to place in the output cell.
    #[error("ambiguous pivot: id {id} has multiple rows for category '{category}'")]
    AmbiguousPivot { id: String, category: String },

    /// A parameterized query template has no `{}` placeholder to substitute into.
    #[error("query template has no '{{}}' placeholder: {template}")]
    Template { template: String },
}
