// tally-core/src/domain/compiler/statement.rs
use sqlparser::ast::Statement;
use sqlparser::dialect::{Dialect, DuckDbDialect, SQLiteDialect};
use sqlparser::parser::Parser;
use tracing::debug;

use crate::domain::error::QueryError;
use crate::domain::project::Engine;

/// Rejects anything that is not exactly one read-only query
/// before it reaches the engine.
///
/// The engine has the last word on syntax: text this parser does not
/// understand is passed through. Read-only files and the SQLite adapter
/// still refuse writes on that path.
pub struct StatementGuard;

impl StatementGuard {
    pub fn check(sql: &str, engine: Engine) -> Result<(), QueryError> {
        if sql.trim().trim_matches(';').trim().is_empty() {
            return Err(QueryError::Empty);
        }

        let statements = match Parser::parse_sql(Self::dialect(engine), sql) {
            Ok(statements) => statements,
            Err(e) => {
                debug!(%engine, error = %e, "Parser gave up, deferring to the engine");
                return Ok(());
            }
        };

        match statements.as_slice() {
            [] => Err(QueryError::Empty),
            [Statement::Query(_)] => Ok(()),
            [other] => Err(QueryError::NotReadOnly(Self::keyword(other))),
            many => Err(QueryError::MultipleStatements(many.len())),
        }
    }

    fn dialect(engine: Engine) -> &'static dyn Dialect {
        match engine {
            Engine::Sqlite => &SQLiteDialect {},
            Engine::DuckDB => &DuckDbDialect {},
        }
    }

    // Leading keyword of the statement, e.g. "INSERT" or "DROP".
    fn keyword(stmt: &Statement) -> String {
        stmt.to_string()
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase()
    }
}
