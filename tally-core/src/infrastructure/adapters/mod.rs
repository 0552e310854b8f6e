pub mod duckdb;
pub mod sqlite;

use tracing::info;

use crate::domain::project::Engine;
use crate::infrastructure::config::DatabaseConfig;
use crate::infrastructure::error::ConnectionError;
use crate::ports::connector::Connector;

/// Opens the connector matching the configured (or inferred) engine.
pub fn open_connector(database: &DatabaseConfig) -> Result<Box<dyn Connector>, ConnectionError> {
    let engine = database.resolved_engine();
    info!(path = %database.path, %engine, "Opening database");

    let connector: Box<dyn Connector> = match engine {
        Engine::Sqlite => Box::new(sqlite::SqliteConnector::open(&database.path)?),
        Engine::DuckDB => Box::new(duckdb::DuckDBConnector::open(&database.path)?),
    };
    Ok(connector)
}
