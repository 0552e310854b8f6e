pub mod project;
pub mod report;

pub use project::{DatabaseConfig, DisplayConfig, TallyConfig, load_config};
pub use report::load_report;
