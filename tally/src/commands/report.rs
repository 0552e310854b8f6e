// tally/src/commands/report.rs
//
// USE CASE: Run a sequence of queries (built-in or from YAML) on one connection.

use std::path::{Path, PathBuf};
use tracing::info;

use tally_core::TallyError;
use tally_core::application::{run_report, with_connection};
use tally_core::domain::report::{Report, payments_report};
use tally_core::infrastructure::config::load_report;
use tally_core::infrastructure::render::renderer_for;

use crate::cli::DatabaseArgs;

pub fn execute(
    project_dir: &Path,
    file: Option<PathBuf>,
    only: Option<String>,
    list: bool,
    db: &DatabaseArgs,
) -> Result<(), TallyError> {
    let report = match file {
        Some(path) => load_report(&path)?,
        None => payments_report(),
    };
    let report = match only {
        Some(name) => report.only(&name)?,
        None => report,
    };

    if list {
        print_listing(&report);
        return Ok(());
    }

    let config = super::settings(project_dir, db)?;
    let renderer = renderer_for(config.display.format);

    let outcome = with_connection(&config.database, |conn| {
        let mut stdout = std::io::stdout().lock();
        run_report(conn, &report, renderer.as_ref(), &mut stdout)
    })?;

    info!(
        report = %report.name,
        queries = outcome.queries.len(),
        "✨ Report finished"
    );
    Ok(())
}

fn print_listing(report: &Report) {
    println!("📊 {} ({} queries)", report.name, report.queries.len());
    for query in &report.queries {
        let limit = query
            .limit
            .map(|n| format!(" [first {}]", n))
            .unwrap_or_default();
        println!(
            "   {:<34} {}{}",
            query.name,
            query.description.as_deref().unwrap_or(""),
            limit
        );
    }
}
