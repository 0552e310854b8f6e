pub mod statement;

pub use statement::StatementGuard;
