// tally-core/src/domain/report/definition.rs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::{Validate, ValidationError};

use crate::domain::error::DomainError;

/// A named, ordered list of queries run against one connection.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct Report {
    #[validate(length(min = 1, message = "Report name cannot be empty"))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "A report needs at least one query"))]
    #[validate(custom(function = "validate_unique_query_names"))]
    #[validate(nested)]
    pub queries: Vec<ReportQuery>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct ReportQuery {
    #[validate(length(min = 1, message = "Query name cannot be empty"))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "SQL cannot be empty"))]
    pub sql: String,

    /// Display truncation only; the query itself is run unchanged.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Report {
    /// Structural checks, surfaced as a domain error naming the report.
    pub fn ensure_valid(&self) -> Result<(), DomainError> {
        self.validate().map_err(|e| DomainError::InvalidReport {
            name: self.name.clone(),
            reason: e.to_string(),
        })
    }

    pub fn query(&self, name: &str) -> Result<&ReportQuery, DomainError> {
        self.queries
            .iter()
            .find(|q| q.name == name)
            .ok_or_else(|| DomainError::QueryNotFound(name.to_string()))
    }

    /// A copy of the report restricted to one query.
    pub fn only(&self, name: &str) -> Result<Report, DomainError> {
        let query = self.query(name)?.clone();
        Ok(Report {
            name: self.name.clone(),
            description: self.description.clone(),
            queries: vec![query],
        })
    }
}

fn validate_unique_query_names(queries: &[ReportQuery]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for q in queries {
        if !seen.insert(q.name.as_str()) {
            let mut err = ValidationError::new("duplicate_query_name");
            err.message = Some(format!("Query name '{}' is used twice", q.name).into());
            return Err(err);
        }
    }
    Ok(())
}
