// tally/src/commands/query.rs
//
// USE CASE: Execute a raw SQL query (ad-hoc).

use std::io::{Read, Write};
use std::path::Path;

use tally_core::TallyError;
use tally_core::application::{render_result, run_query, with_connection};
use tally_core::infrastructure::render::renderer_for;

use crate::cli::DatabaseArgs;

pub fn execute(
    project_dir: &Path,
    query: String,
    limit: Option<usize>,
    db: &DatabaseArgs,
) -> Result<(), TallyError> {
    let config = super::settings(project_dir, db)?;

    let sql = if query == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        query
    };

    let renderer = renderer_for(config.display.format);
    let limit = limit.or(config.display.max_rows);

    let rendered = with_connection(&config.database, |conn| {
        let table = run_query(conn, &sql)?;
        let (out, _) = render_result("query", None, &table, limit, renderer.as_ref())?;
        Ok(out)
    })?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
