//! High-level operations backing the CLI lifecycle actions.

pub mod clean;
pub mod generate;

pub use clean::{clean, CleanResult};
pub use generate::{discover_projects, generate, GenerateOptions, GenerateResult};
