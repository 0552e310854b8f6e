// tally-core/src/application/runner.rs

use std::time::Instant;
use tracing::{debug, instrument};

use crate::domain::compiler::StatementGuard;
use crate::domain::table::ResultTable;
use crate::error::TallyError;
use crate::ports::connector::Connector;

/// Runs one read-only statement and returns its complete result set.
///
/// The statement is checked before it reaches the engine. Failures are
/// logged at debug level with their elapsed time and returned untouched.
/// There is no retry.
#[instrument(skip(connector, query), fields(engine = %connector.engine(), query.len = query.len()))]
pub fn run_query(connector: &dyn Connector, query: &str) -> Result<ResultTable, TallyError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query.trim());

    let result = StatementGuard::check(query, connector.engine())
        .map_err(TallyError::from)
        .and_then(|()| connector.query(query));

    let duration = start.elapsed();

    match result {
        Ok(table) => {
            debug!(rows = table.len(), "✅ Query finished in {:.2?}", duration);
            Ok(table)
        }
        Err(e) => {
            // reported to the user by the caller
            debug!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}

/// Display-only truncation to the first `n` rows.
pub fn truncate(table: &ResultTable, n: usize) -> ResultTable {
    table.head(n)
}
