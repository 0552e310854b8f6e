// tally/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use tally_core::domain::project::{Engine, OutputFormat};

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Aggregate SQL queries over local databases, printed as tables", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project directory (where tally.yaml lives)
    #[arg(long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the `database` / `display` sections of tally.yaml.
#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// Path to the database file
    #[arg(long)]
    pub db_path: Option<String>,

    /// Database engine: sqlite | duckdb (default: inferred from the file extension)
    #[arg(long)]
    pub engine: Option<Engine>,

    /// Output format: table | json (a report prints one JSON array)
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ⚡ Executes a raw SQL query (Ad-hoc)
    Query {
        /// SQL text, or "-" to read it from stdin
        query: String,

        /// Display only the first N rows
        #[arg(long)]
        limit: Option<usize>,

        #[command(flatten)]
        db: DatabaseArgs,
    },

    /// 📊 Runs a report (the built-in payments report by default)
    Report {
        /// YAML report definition
        #[arg(long)]
        file: Option<PathBuf>,

        /// Run a single query of the report
        #[arg(long)]
        only: Option<String>,

        /// List the report's queries without running them
        #[arg(long)]
        list: bool,

        #[command(flatten)]
        db: DatabaseArgs,
    },
}
