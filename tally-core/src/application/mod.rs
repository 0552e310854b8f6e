// tally-core/src/application/mod.rs

pub mod connection;
pub mod ports;
pub mod report;
pub mod runner;

#[cfg(test)]
pub(crate) mod test_support;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write:
// `use tally_core::application::{run_query, run_report, with_connection};`

pub use connection::{scoped, with_connection};
pub use report::{QueryOutcome, ReportOutcome, render_result, run_report};
pub use runner::{run_query, truncate};
