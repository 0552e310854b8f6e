// tally-core/src/ports/connector.rs

// What the application needs from a database, without knowing which one:
// hand over one statement, get the whole result set back.

use crate::domain::project::Engine;
use crate::domain::table::ResultTable;
use crate::error::TallyError;

/// A single, exclusively owned database handle.
///
/// Calls are synchronous and block until the engine returns every row.
/// After `close`, every `query` fails with `ConnectionError::Closed`.
pub trait Connector {
    /// Executes one statement and materializes its full result set.
    /// Callers check the statement first (see `StatementGuard`); adapters
    /// that can tell a write from a read refuse writes too.
    fn query(&self, sql: &str) -> Result<ResultTable, TallyError>;

    /// Releases the underlying handle. Closing twice is a no-op.
    fn close(&mut self) -> Result<(), TallyError>;

    fn is_closed(&self) -> bool;

    fn engine(&self) -> Engine;
}
