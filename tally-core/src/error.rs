// tally-core/src/error.rs

use crate::domain::error::{DomainError, QueryError};
use crate::infrastructure::error::{ConnectionError, InfrastructureError};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum TallyError {
    // --- RUNNER ERRORS (the two kinds a query can fail with) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Query(#[from] QueryError),

    // --- DOMAIN ERRORS (reports, tables) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, config parsing) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

impl TallyError {
    pub fn is_connection(&self) -> bool {
        matches!(self, TallyError::Connection(_))
    }

    pub fn is_query(&self) -> bool {
        matches!(self, TallyError::Query(_))
    }
}

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        TallyError::Infrastructure(InfrastructureError::Io(err))
    }
}
