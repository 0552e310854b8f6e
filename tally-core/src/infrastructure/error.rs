// tally-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

/// The data source could not be reached, or the handle is no longer usable.
#[derive(Error, Debug, Diagnostic)]
pub enum ConnectionError {
    #[error("Database not found at: {0}")]
    #[diagnostic(
        code(tally::connection::not_found),
        help("Pass --db-path or set TALLY_DB_PATH.")
    )]
    NotFound(String),

    #[error("Failed to open {engine} database '{path}': {message}")]
    #[diagnostic(code(tally::connection::open))]
    Open {
        engine: String,
        path: String,
        message: String,
    },

    #[error("Database is unreachable: {0}")]
    #[diagnostic(
        code(tally::connection::unreachable),
        help("Check that the file is a valid database and is readable.")
    )]
    Unreachable(String),

    #[error("Connection is closed")]
    #[diagnostic(code(tally::connection::closed))]
    Closed,

    #[error("Failed to close connection: {0}")]
    #[diagnostic(code(tally::connection::close))]
    Close(String),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(tally::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error in '{path}': {source}")]
    #[diagnostic(
        code(tally::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(tally::infra::config))]
    ConfigError(String),

    #[error("File not found: '{0}'")]
    #[diagnostic(code(tally::infra::file_missing))]
    FileNotFound(String),

    // --- OUTPUT ---
    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(tally::infra::json))]
    Json(#[from] serde_json::Error),
}

impl From<validator::ValidationErrors> for InfrastructureError {
    fn from(err: validator::ValidationErrors) -> Self {
        InfrastructureError::ConfigError(err.to_string())
    }
}
