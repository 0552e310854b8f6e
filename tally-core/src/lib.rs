// tally-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// The Connector contract: submit a statement, receive rows.
pub mod ports;

// 2. Domain
// ResultTable, statement guard, report definitions.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// DuckDB / SQLite connectors, config files, renderers.
pub mod infrastructure;

// 4. Application (Use Cases)
// Query runner, scoped connections, report execution.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use domain::table::{ResultTable, Row, Value};
pub use error::TallyError;
