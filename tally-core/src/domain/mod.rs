pub mod compiler;
pub mod error;
pub mod project;
pub mod report;
pub mod table;

// Handy re-exports to simplify imports elsewhere
pub use error::{DomainError, QueryError};
