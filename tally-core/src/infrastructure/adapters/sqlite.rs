// tally-core/src/infrastructure/adapters/sqlite.rs

use rusqlite::types::ValueRef;
use rusqlite::{Connection, ErrorCode, OpenFlags};
use std::path::Path;
use tracing::debug;

use crate::domain::error::QueryError;
use crate::domain::project::Engine;
use crate::domain::table::{ResultTable, Value};
use crate::error::TallyError;
use crate::infrastructure::error::ConnectionError;
use crate::ports::connector::Connector;

pub struct SqliteConnector {
    conn: Option<Connection>,
    path: String,
}

impl SqliteConnector {
    /// Opens a database file read-only. `:memory:` opens an empty in-memory database.
    pub fn open(db_path: &str) -> Result<Self, ConnectionError> {
        if db_path == ":memory:" {
            return Self::open_in_memory();
        }
        if !Path::new(db_path).exists() {
            return Err(ConnectionError::NotFound(db_path.to_string()));
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(db_path, flags).map_err(|e| {
            ConnectionError::Open {
                engine: Engine::Sqlite.to_string(),
                path: db_path.to_string(),
                message: e.to_string(),
            }
        })?;

        debug!(path = db_path, "Opened SQLite database (read-only)");
        Ok(Self {
            conn: Some(conn),
            path: db_path.to_string(),
        })
    }

    pub fn open_in_memory() -> Result<Self, ConnectionError> {
        let conn = Connection::open_in_memory().map_err(|e| ConnectionError::Open {
            engine: Engine::Sqlite.to_string(),
            path: ":memory:".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::from_connection(conn))
    }

    /// Wraps an already opened (and possibly seeded) connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Some(conn),
            path: ":memory:".to_string(),
        }
    }

    fn connection(&self) -> Result<&Connection, ConnectionError> {
        self.conn.as_ref().ok_or(ConnectionError::Closed)
    }
}

// Codes meaning the file itself is unusable, not the statement.
fn classify(err: rusqlite::Error) -> TallyError {
    if let rusqlite::Error::SqliteFailure(ffi_err, _) = &err {
        if matches!(
            ffi_err.code,
            ErrorCode::CannotOpen
                | ErrorCode::NotADatabase
                | ErrorCode::SystemIoFailure
                | ErrorCode::PermissionDenied
        ) {
            return ConnectionError::Unreachable(err.to_string()).into();
        }
    }
    QueryError::Engine {
        engine: Engine::Sqlite.to_string(),
        message: err.to_string(),
    }
    .into()
}

fn leading_keyword(sql: &str) -> String {
    sql.split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase()
}

fn convert(value: ValueRef<'_>, column: &str) -> Result<Value, QueryError> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Integer(v),
        ValueRef::Real(v) => Value::Real(v),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(_) => {
            return Err(QueryError::UnsupportedValue {
                column: column.to_string(),
                type_name: "BLOB".to_string(),
            });
        }
    })
}

impl Connector for SqliteConnector {
    fn query(&self, sql: &str) -> Result<ResultTable, TallyError> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(sql).map_err(classify)?;
        if !stmt.readonly() {
            return Err(QueryError::NotReadOnly(leading_keyword(sql)).into());
        }

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut rows = stmt.query([]).map_err(classify)?;
        let mut data = Vec::new();
        while let Some(row) = rows.next().map_err(classify)? {
            let mut values = Vec::with_capacity(columns.len());
            for (idx, name) in columns.iter().enumerate() {
                let raw = row.get_ref(idx).map_err(classify)?;
                values.push(convert(raw, name)?);
            }
            data.push(values);
        }

        ResultTable::new(columns, data)
    }

    fn close(&mut self) -> Result<(), TallyError> {
        match self.conn.take() {
            Some(conn) => {
                debug!(path = %self.path, "Closing SQLite connection");
                conn.close()
                    .map_err(|(_, e)| TallyError::from(ConnectionError::Close(e.to_string())))
            }
            None => Ok(()),
        }
    }

    fn is_closed(&self) -> bool {
        self.conn.is_none()
    }

    fn engine(&self) -> Engine {
        Engine::Sqlite
    }
}
