// tally-core/src/application/connection.rs

use tracing::warn;

use crate::error::TallyError;
use crate::infrastructure::adapters::open_connector;
use crate::infrastructure::config::DatabaseConfig;
use crate::ports::connector::Connector;

/// Opens the configured database, hands it to `work`, then closes it
/// whatever `work` returned.
pub fn with_connection<T, F>(database: &DatabaseConfig, work: F) -> Result<T, TallyError>
where
    F: FnOnce(&dyn Connector) -> Result<T, TallyError>,
{
    let mut connector = open_connector(database)?;
    scoped(connector.as_mut(), work)
}

/// Runs `work` against an open connector and closes it afterwards.
/// The error from `work` takes precedence over a close failure.
pub fn scoped<T, F>(connector: &mut dyn Connector, work: F) -> Result<T, TallyError>
where
    F: FnOnce(&dyn Connector) -> Result<T, TallyError>,
{
    let result = work(&*connector);
    let closed = connector.close();

    match (result, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            warn!("Connection close failed after an earlier error: {}", close_err);
            Err(e)
        }
    }
}
