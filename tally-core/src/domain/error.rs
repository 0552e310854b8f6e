// tally-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

/// A statement was rejected, either before reaching the engine or by it.
#[derive(Error, Debug, Diagnostic)]
pub enum QueryError {
    #[error("Query text is empty")]
    #[diagnostic(code(tally::query::empty))]
    Empty,

    #[error("Expected a single statement, found {0}")]
    #[diagnostic(
        code(tally::query::multiple_statements),
        help("Run each statement separately.")
    )]
    MultipleStatements(usize),

    #[error("Only read-only queries are allowed, got: {0}")]
    #[diagnostic(
        code(tally::query::not_read_only),
        help("Use SELECT, WITH or VALUES statements.")
    )]
    NotReadOnly(String),

    #[error("{engine} rejected the query: {message}")]
    #[diagnostic(
        code(tally::query::engine),
        help("Check table and column names against the database schema.")
    )]
    Engine { engine: String, message: String },

    #[error("Column '{column}' has unsupported type {type_name}")]
    #[diagnostic(
        code(tally::query::unsupported_value),
        help("CAST the column to INTEGER, REAL or TEXT.")
    )]
    UnsupportedValue { column: String, type_name: String },

    #[error("Column name '{0}' appears more than once")]
    #[diagnostic(
        code(tally::query::duplicate_column),
        help("Alias the column with AS to give it a unique name.")
    )]
    DuplicateColumn(String),
}

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Row {row} has {actual} values but the table has {expected} columns")]
    #[diagnostic(code(tally::domain::row_width))]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid report '{name}': {reason}")]
    #[diagnostic(code(tally::domain::invalid_report))]
    InvalidReport { name: String, reason: String },

    #[error("Query '{0}' not found in report")]
    #[diagnostic(
        code(tally::domain::query_not_found),
        help("Run `tally report --list` to see the available queries.")
    )]
    QueryNotFound(String),

    #[error("Unknown {kind} '{value}', expected one of: {expected}")]
    #[diagnostic(code(tally::domain::unknown_variant))]
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
}
