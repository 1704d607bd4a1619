//! CLI layer for strbuf.
//!
//! Provides the command-line interface using clap, with commands for
//! splitting, line reading, searching, replacing, parsing, and comparing.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
