pub mod builtin;
pub mod definition;

pub use builtin::{PAYMENTS_REPORT, payments_report};
pub use definition::{Report, ReportQuery};
