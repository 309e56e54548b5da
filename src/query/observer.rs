use std::sync::Arc;

use crate::error::TableError;

/// Context about a single query execution.
#[derive(Debug, Clone)]
pub struct QueryContext {
    /// Zero-based position of this query in the run (always 0 for single queries).
    pub index: usize,
    /// The exact SQL string handed to the engine, after placeholder substitution.
    pub sql: String,
}

/// Minimal stats reported on a successful query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryStats {
    /// Number of rows in the result table.
    pub rows: usize,
}

/// Observer interface for query outcomes.
///
/// Implementors can record metrics, logs, or capture the executed SQL for auditing.
pub trait QueryObserver: Send + Sync {
    /// Called just before a query is handed to the engine.
    fn on_query(&self, _ctx: &QueryContext) {}

    /// Called when a query succeeds.
    fn on_success(&self, _ctx: &QueryContext, _stats: QueryStats) {}

    /// Called when a query fails.
    fn on_failure(&self, _ctx: &QueryContext, _error: &TableError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeQueryObserver {
    observers: Vec<Arc<dyn QueryObserver>>,
}

impl CompositeQueryObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn QueryObserver>>) -> Self {
        Self { observers }
    }
}

impl std::fmt::Debug for CompositeQueryObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeQueryObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl QueryObserver for CompositeQueryObserver {
    fn on_query(&self, ctx: &QueryContext) {
        for o in &self.observers {
            o.on_query(ctx);
        }
    }

    fn on_success(&self, ctx: &QueryContext, stats: QueryStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &QueryContext, error: &TableError) {
        for o in &self.observers {
            o.on_failure(ctx, error);
        }
    }
}

/// Logs query events to stderr.
#[derive(Debug, Default)]
pub struct StdErrQueryObserver;

impl QueryObserver for StdErrQueryObserver {
    fn on_query(&self, ctx: &QueryContext) {
        eprintln!("[query][run] index={} sql={}", ctx.index, ctx.sql);
    }

    fn on_success(&self, ctx: &QueryContext, stats: QueryStats) {
        eprintln!("[query][ok] index={} rows={}", ctx.index, stats.rows);
    }

    fn on_failure(&self, ctx: &QueryContext, error: &TableError) {
        eprintln!("[query][err] index={} sql={} err={}", ctx.index, ctx.sql, error);
    }
}
