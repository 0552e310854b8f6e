// src/domain/project/configuration.rs

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// SQL engine backing a connection.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Sqlite,
    DuckDB,
}

impl Engine {
    /// Infers the engine from a database file name.
    /// `.duckdb` / `.ddb` files are DuckDB, everything else is SQLite.
    pub fn from_path(path: &str) -> Self {
        match Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("duckdb") | Some("ddb") => Engine::DuckDB,
            _ => Engine::Sqlite,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Engine::Sqlite => "sqlite",
            Engine::DuckDB => "duckdb",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Engine {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Engine::Sqlite),
            "duckdb" => Ok(Engine::DuckDB),
            _ => Err(DomainError::UnknownVariant {
                kind: "engine",
                value: s.to_string(),
                expected: "sqlite, duckdb",
            }),
        }
    }
}

/// How result tables are written to stdout.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(DomainError::UnknownVariant {
                kind: "output format",
                value: s.to_string(),
                expected: "table, json",
            }),
        }
    }
}
