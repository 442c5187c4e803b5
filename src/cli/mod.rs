//! CLI surface for the spanmerge binary.
//!
//! Thin glue around [`crate::merge`]: argument parsing, JSON file IO, and
//! status messages. The merge itself never touches the filesystem.

pub mod parser;
mod run;

pub use parser::Cli;
pub use run::run;
