// tally-core/src/infrastructure/config/report.rs

use std::path::Path;
use tracing::{info, instrument};

use super::project::load_yaml;
use crate::domain::report::Report;
use crate::error::TallyError;

/// Loads a report definition from YAML and checks its structure.
#[instrument]
pub fn load_report(path: &Path) -> Result<Report, TallyError> {
    let report: Report = load_yaml(path)?;
    report.ensure_valid()?;
    info!(report = %report.name, queries = report.queries.len(), "Report loaded");
    Ok(report)
}
