// tally-core/src/infrastructure/config/project.rs

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::{Engine, OutputFormat};
use crate::infrastructure::error::InfrastructureError;

pub const DEFAULT_DB_PATH: &str = "data.sqlite";
const CONFIG_CANDIDATES: [&str; 2] = ["tally.yaml", "tally.yml"];

#[derive(Debug, Deserialize, Serialize, Validate, Clone, Default)]
pub struct TallyConfig {
    #[validate(nested)]
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone)]
pub struct DatabaseConfig {
    #[validate(length(min = 1, message = "Database path cannot be empty"))]
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Inferred from the file extension when absent.
    #[serde(default)]
    pub engine: Option<Engine>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            engine: None,
        }
    }
}

impl DatabaseConfig {
    pub fn resolved_engine(&self) -> Engine {
        self.engine.unwrap_or_else(|| Engine::from_path(&self.path))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DisplayConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Default truncation for ad-hoc queries.
    #[serde(default)]
    pub max_rows: Option<usize>,
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

// --- LOADER ---

/// Defaults, then `tally.yaml` if present, then `TALLY_*` environment overrides.
/// Command-line flags are layered on top by the caller.
#[instrument(skip(project_dir))]
pub fn load_config(project_dir: &Path) -> Result<TallyConfig, InfrastructureError> {
    let mut config = match find_config_file(project_dir) {
        Some(path) => {
            info!(path = ?path, "Loading configuration");
            load_yaml::<TallyConfig>(&path)?
        }
        None => TallyConfig::default(),
    };

    // Relative paths from the file are anchored at the project directory;
    // paths from the environment or the command line are taken as given.
    if config.database.path != ":memory:" && Path::new(&config.database.path).is_relative() {
        config.database.path = project_dir
            .join(&config.database.path)
            .to_string_lossy()
            .into_owned();
    }

    apply_env_overrides(&mut config)?;
    config.validate()?;

    Ok(config)
}

fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

/// Reads and parses one YAML file into `T`.
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::FileNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|source| InfrastructureError::Yaml {
        path: path.display().to_string(),
        source,
    })
}

fn apply_env_overrides(config: &mut TallyConfig) -> Result<(), InfrastructureError> {
    if let Ok(val) = std::env::var("TALLY_DB_PATH") {
        info!(old = ?config.database.path, new = ?val, "Overriding database path via ENV");
        config.database.path = val;
    }
    if let Ok(val) = std::env::var("TALLY_ENGINE") {
        let engine = val
            .parse::<Engine>()
            .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;
        info!(%engine, "Overriding engine via ENV");
        config.database.engine = Some(engine);
    }
    if let Ok(val) = std::env::var("TALLY_FORMAT") {
        config.display.format = val
            .parse::<OutputFormat>()
            .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;
    }
    Ok(())
}
