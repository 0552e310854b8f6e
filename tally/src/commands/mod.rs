// tally/src/commands/mod.rs

pub mod query;
pub mod report;

use std::path::Path;

use tally_core::TallyError;
use tally_core::infrastructure::config::{TallyConfig, load_config};

use crate::cli::DatabaseArgs;

/// tally.yaml + environment, then command-line flags on top.
pub fn settings(project_dir: &Path, args: &DatabaseArgs) -> Result<TallyConfig, TallyError> {
    let mut config = load_config(project_dir)?;

    if let Some(path) = &args.db_path {
        config.database.path = path.clone();
    }
    if let Some(engine) = args.engine {
        config.database.engine = Some(engine);
    }
    if let Some(format) = args.format {
        config.display.format = format;
    }

    tracing::debug!(?config, "Resolved settings");
    Ok(config)
}
