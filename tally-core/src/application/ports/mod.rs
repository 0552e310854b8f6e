pub mod renderer;

pub use renderer::{Framing, Section, TableRenderer};
