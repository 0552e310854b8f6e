// tally-core/src/infrastructure/adapters/duckdb.rs

use duckdb::types::ValueRef;
use duckdb::{AccessMode, Config, Connection};
use std::path::Path;
use tracing::debug;

use crate::domain::error::QueryError;
use crate::domain::project::Engine;
use crate::domain::table::{ResultTable, Value};
use crate::error::TallyError;
use crate::infrastructure::error::ConnectionError;
use crate::ports::connector::Connector;

pub struct DuckDBConnector {
    conn: Option<Connection>,
    path: String,
}

impl DuckDBConnector {
    /// Opens a database file read-only. `:memory:` opens an empty in-memory database.
    pub fn open(db_path: &str) -> Result<Self, ConnectionError> {
        let open_err = |e: duckdb::Error| ConnectionError::Open {
            engine: Engine::DuckDB.to_string(),
            path: db_path.to_string(),
            message: e.to_string(),
        };

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(Config::default()).map_err(open_err)?
        } else {
            if !Path::new(db_path).exists() {
                return Err(ConnectionError::NotFound(db_path.to_string()));
            }
            let config = Config::default()
                .access_mode(AccessMode::ReadOnly)
                .map_err(open_err)?;
            Connection::open_with_flags(db_path, config).map_err(open_err)?
        };

        debug!(path = db_path, "Opened DuckDB database");
        Ok(Self {
            conn: Some(conn),
            path: db_path.to_string(),
        })
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

fn engine_error(err: duckdb::Error) -> TallyError {
    QueryError::Engine {
        engine: Engine::DuckDB.to_string(),
        message: err.to_string(),
    }
    .into()
}

fn wide_integer(v: i128) -> Value {
    i64::try_from(v).map_or(Value::Real(v as f64), Value::Integer)
}

fn convert(value: ValueRef<'_>, column: &str) -> Result<Value, QueryError> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Boolean(b) => Value::Integer(i64::from(b)),
        ValueRef::TinyInt(v) => Value::Integer(v.into()),
        ValueRef::SmallInt(v) => Value::Integer(v.into()),
        ValueRef::Int(v) => Value::Integer(v.into()),
        ValueRef::BigInt(v) => Value::Integer(v),
        // SUM over INTEGER yields HUGEINT
        ValueRef::HugeInt(v) => wide_integer(v),
        ValueRef::UTinyInt(v) => Value::Integer(v.into()),
        ValueRef::USmallInt(v) => Value::Integer(v.into()),
        ValueRef::UInt(v) => Value::Integer(v.into()),
        ValueRef::UBigInt(v) => wide_integer(v.into()),
        ValueRef::Float(v) => Value::Real(v.into()),
        ValueRef::Double(v) => Value::Real(v),
        ValueRef::Decimal(d) => match d.to_string().parse::<f64>() {
            Ok(v) => Value::Real(v),
            Err(_) => Value::Text(d.to_string()),
        },
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(_) => {
            return Err(QueryError::UnsupportedValue {
                column: column.to_string(),
                type_name: "BLOB".to_string(),
            });
        }
        // Dates, timestamps, intervals, nested types
        other => Value::Text(format!("{:?}", other)),
    })
}

impl Connector for DuckDBConnector {
    fn query(&self, sql: &str) -> Result<ResultTable, TallyError> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(sql).map_err(engine_error)?;
        let mut rows = stmt.query([]).map_err(engine_error)?;

        // DuckDB only knows the output schema once the statement has run
        let columns: Vec<String> = rows
            .as_ref()
            .map(|s| s.column_names().into_iter().map(|c| c.to_string()).collect())
            .unwrap_or_default();

        let mut data = Vec::new();
        while let Some(row) = rows.next().map_err(engine_error)? {
            let mut values = Vec::with_capacity(columns.len());
            for (idx, name) in columns.iter().enumerate() {
                let raw = row.get_ref(idx).map_err(engine_error)?;
                values.push(convert(raw, name)?);
            }
            data.push(values);
        }

        ResultTable::new(columns, data)
    }

    fn close(&mut self) -> Result<(), TallyError> {
        match self.conn.take() {
            Some(conn) => {
                debug!(path = %self.path, "Closing DuckDB connection");
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
        Engine::DuckDB
    }
}
