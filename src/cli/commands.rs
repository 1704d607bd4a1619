//! CLI command implementations.
//!
//! Each command builds buffers from its arguments, runs the library
//! operation, and hands the result to [`crate::cli::output`].

use crate::cli::output::{
    Number, OutputFormat, TokenRow, format_find, format_lines, format_number, format_ordering,
    format_replace, format_tokens,
};
use crate::cli::parser::{Cli, Commands};
use crate::core::{BufferList, ByteBuffer};
use crate::error::{BufferError, CommandError, Error, Result};
use crate::io::LineReader;
use crate::tokenize::Tokenizer;
use std::path::Path;
use tracing::debug;

/// Executes the CLI command.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Split {
            text,
            file,
            delimiters,
            toggles,
            max_token_len,
        } => {
            let mut tokenizer = Tokenizer::new()
                .with_delimiters(delimiters.as_bytes())
                .with_toggles(toggles.as_bytes());
            if let Some(max) = max_token_len {
                tokenizer = tokenizer.max_token_len(*max);
            }
            match (text, file) {
                (Some(text), _) => cmd_split_text(&tokenizer, text, format),
                (None, Some(path)) => cmd_split_file(&tokenizer, path, format),
                (None, None) => Err(CommandError::InvalidArgument(
                    "split needs TEXT or --file".to_string(),
                )
                .into()),
            }
        }
        Commands::Lines { file } => cmd_lines(file, format),
        Commands::Find {
            text,
            needle,
            from,
            last,
        } => cmd_find(text, needle, *from, *last, format),
        Commands::Replace {
            text,
            old,
            new,
            from,
            all,
        } => cmd_replace(text, old, new, *from, *all, format),
        Commands::Parse { value, float } => cmd_parse(value, *float, format),
        Commands::Compare { left, right } => cmd_compare(left, right, format),
    }
}

fn cmd_split_text(tokenizer: &Tokenizer, text: &str, format: OutputFormat) -> Result<String> {
    let source = ByteBuffer::from(text);
    let tokens = tokenizer.tokenize(&source)?;
    let rows = [TokenRow {
        line: 1,
        tokens: to_strings(&tokens),
    }];
    Ok(format_tokens(&rows, format))
}

fn cmd_split_file(tokenizer: &Tokenizer, path: &Path, format: OutputFormat) -> Result<String> {
    let mut rows = Vec::new();
    for (i, line) in LineReader::open(path)?.enumerate() {
        let tokens = tokenizer.tokenize(&line?)?;
        rows.push(TokenRow {
            line: i + 1,
            tokens: to_strings(&tokens),
        });
    }
    debug!(path = %path.display(), rows = rows.len(), "split file");
    Ok(format_tokens(&rows, format))
}

fn cmd_lines(path: &Path, format: OutputFormat) -> Result<String> {
    let lines = BufferList::from_path(path)?;
    Ok(format_lines(&to_strings(&lines), format))
}

fn cmd_find(
    text: &str,
    needle: &str,
    from: usize,
    last: bool,
    format: OutputFormat,
) -> Result<String> {
    let buffer = ByteBuffer::from(text);
    let found = if last {
        buffer.find_last(needle.as_bytes(), from)
    } else {
        buffer.find(needle.as_bytes(), from)
    };
    let offset = match found {
        Ok(offset) => Some(offset),
        Err(Error::Buffer(BufferError::NotFound)) => None,
        Err(e) => return Err(e),
    };
    Ok(format_find(needle, offset, format))
}

fn cmd_replace(
    text: &str,
    old: &str,
    new: &str,
    from: usize,
    all: bool,
    format: OutputFormat,
) -> Result<String> {
    if old.is_empty() {
        return Err(CommandError::InvalidArgument("OLD must not be empty".to_string()).into());
    }
    let mut buffer = ByteBuffer::from(text);
    let replacements = if all {
        buffer.find_replace_all(old.as_bytes(), new.as_bytes(), from)?
    } else {
        match buffer.find_replace(old.as_bytes(), new.as_bytes(), from) {
            Ok(_) => 1,
            Err(Error::Buffer(BufferError::NotFound)) => 0,
            Err(e) => return Err(e),
        }
    };
    Ok(format_replace(&buffer.to_string(), replacements, format))
}

fn cmd_parse(value: &str, float: bool, format: OutputFormat) -> Result<String> {
    let buffer = ByteBuffer::from(value);
    let number = if float {
        Number::Float(buffer.to_f64()?)
    } else {
        Number::Integer(buffer.to_i64()?)
    };
    Ok(format_number(number, format))
}

fn cmd_compare(left: &str, right: &str, format: OutputFormat) -> Result<String> {
    let ordering = ByteBuffer::from(left).compare(&ByteBuffer::from(right))?;
    Ok(format_ordering(left, right, ordering, format))
}

fn to_strings(list: &BufferList) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}
