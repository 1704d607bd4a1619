//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::tokenize::{DEFAULT_DELIMITERS, DEFAULT_TOGGLES};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// strbuf: byte-string buffers, tokenizing, and line reading.
///
/// Splits delimited text with quote-aware regions, reads files line by
/// line, and exposes the buffer search, replace, parse, and compare
/// operations from the shell.
#[derive(Parser, Debug)]
#[command(name = "strbuf")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (debug-level logs on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split text into tokens.
    ///
    /// Tokenizes TEXT, or every line of --file, on the delimiter bytes.
    /// Delimiters inside a toggle-quoted region are kept as content.
    Split {
        /// Text to split.
        #[arg(conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Split each line of this file instead.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Delimiter bytes; any one of them ends a token.
        #[arg(short, long, default_value_t = default_delimiters())]
        delimiters: String,

        /// Toggle bytes that open and close quoted regions.
        #[arg(short = 'q', long, default_value_t = default_toggles())]
        toggles: String,

        /// Fail if any token is longer than this many bytes.
        #[arg(long)]
        max_token_len: Option<usize>,
    },

    /// Print the lines of a file.
    Lines {
        /// Path to the file.
        file: PathBuf,
    },

    /// Find a byte sequence in text.
    Find {
        /// Text to search.
        text: String,

        /// Sequence to look for.
        needle: String,

        /// Start searching at this byte offset.
        #[arg(long, default_value = "0")]
        from: usize,

        /// Report the last occurrence instead of the first.
        #[arg(short, long)]
        last: bool,
    },

    /// Replace a byte sequence in text.
    Replace {
        /// Text to edit.
        text: String,

        /// Sequence to replace.
        old: String,

        /// Replacement.
        new: String,

        /// Start searching at this byte offset.
        #[arg(long, default_value = "0")]
        from: usize,

        /// Replace every occurrence, not just the first.
        #[arg(short, long)]
        all: bool,
    },

    /// Parse text as a number.
    Parse {
        /// Text to parse.
        value: String,

        /// Parse as a decimal float instead of an integer.
        #[arg(long)]
        float: bool,
    },

    /// Compare two byte strings lexicographically.
    Compare {
        /// Left-hand side.
        left: String,

        /// Right-hand side.
        right: String,
    },
}

fn default_delimiters() -> String {
    String::from_utf8_lossy(DEFAULT_DELIMITERS).into_owned()
}

fn default_toggles() -> String {
    String::from_utf8_lossy(DEFAULT_TOGGLES).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_split_defaults() {
        let cli = Cli::parse_from(["strbuf", "split", "a,b"]);
        let Commands::Split {
            text,
            file,
            delimiters,
            toggles,
            max_token_len,
        } = cli.command
        else {
            unreachable!("parsed a split command");
        };
        assert_eq!(text.as_deref(), Some("a,b"));
        assert!(file.is_none());
        assert_eq!(delimiters, ",");
        assert_eq!(toggles, "\"");
        assert!(max_token_len.is_none());
    }

    #[test]
    fn test_split_requires_input() {
        assert!(Cli::try_parse_from(["strbuf", "split"]).is_err());
        assert!(Cli::try_parse_from(["strbuf", "split", "a", "--file", "x.csv"]).is_err());
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::parse_from(["strbuf", "compare", "a", "b", "--format", "json"]);
        assert_eq!(cli.format, "json");
        assert!(!cli.verbose);
    }
}
