//! Parameterized query running over an external SQL-like evaluator.
//!
//! The crate never parses or evaluates SQL itself. Its whole contract with the query
//! capability is [`QueryEngine`]: pass a string, get back a table with named columns.
//! [`QueryRunner`] adds the two things the reporting workflow needs on top of that:
//! sequencing one query per parameter value, and observer hooks for logging/auditing.

mod observer;

use std::sync::Arc;

use crate::error::{TableError, TableResult};
use crate::types::Table;

pub use observer::{
    CompositeQueryObserver, QueryContext, QueryObserver, QueryStats, StdErrQueryObserver,
};

/// The external ad-hoc query capability.
///
/// Implementations are expected to resolve table names referenced in the SQL against their
/// own registry of in-memory tables. Execution is synchronous; there is no retry policy.
pub trait QueryEngine {
    /// Execute one query and return its result table.
    fn execute(&mut self, sql: &str) -> TableResult<Table>;
}

/// Sequences queries against a [`QueryEngine`], one at a time, in caller order.
///
/// Stateless between calls apart from the engine it wraps: no caching, no parallelism.
/// Document order is a presentation concern, so results always come back in the order the
/// parameter values were given.
pub struct QueryRunner<E: QueryEngine> {
    engine: E,
    observer: Option<Arc<dyn QueryObserver>>,
}

impl<E: QueryEngine> QueryRunner<E> {
    /// Create a runner over an engine.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            observer: None,
        }
    }

    /// Attach an observer for query events (logging/auditing).
    pub fn with_observer(mut self, observer: Arc<dyn QueryObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Execute a single query.
    pub fn run(&mut self, sql: &str) -> TableResult<Table> {
        self.run_indexed(0, sql)
    }

    /// Execute a templated query once per value, substituting each value verbatim into the
    /// template's single `{}` placeholder.
    ///
    /// Queries run in the given order and results come back in the same order, one table
    /// per value. A template without a `{}` placeholder is a [`TableError::Template`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use table_reshape::query::{QueryEngine, QueryRunner};
    /// use table_reshape::types::{Schema, Table};
    /// use table_reshape::TableResult;
    ///
    /// // A stand-in engine that returns an empty table and records what it was asked.
    /// struct Recorder(Vec<String>);
    /// impl QueryEngine for Recorder {
    ///     fn execute(&mut self, sql: &str) -> TableResult<Table> {
    ///         self.0.push(sql.to_string());
    ///         Ok(Table::new(Schema::new(vec![]), vec![]))
    ///     }
    /// }
    ///
    /// let mut runner = QueryRunner::new(Recorder(Vec::new()));
    /// let results = runner
    ///     .run_parameterized(
    ///         "SELECT * FROM ons_out WHERE geo_type = '{}'",
    ///         &["Country", "Region"],
    ///     )
    ///     .unwrap();
    /// assert_eq!(results.len(), 2);
    /// ```
    pub fn run_parameterized(
        &mut self,
        template: &str,
        values: &[&str],
    ) -> TableResult<Vec<Table>> {
        if !template.contains("{}") {
            return Err(TableError::Template {
                template: template.to_owned(),
            });
        }

        let mut results = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            let sql = template.replacen("{}", value, 1);
            results.push(self.run_indexed(index, &sql)?);
        }
        Ok(results)
    }

    fn run_indexed(&mut self, index: usize, sql: &str) -> TableResult<Table> {
        let ctx = QueryContext {
            index,
            sql: sql.to_owned(),
        };
        if let Some(obs) = self.observer.as_ref() {
            obs.on_query(&ctx);
        }

        let result = self.engine.execute(sql);

        if let Some(obs) = self.observer.as_ref() {
            match &result {
                Ok(table) => obs.on_success(&ctx, QueryStats { rows: table.row_count() }),
                Err(e) => obs.on_failure(&ctx, e),
            }
        }
        result
    }
}
