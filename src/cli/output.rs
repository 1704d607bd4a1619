//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats. Byte content is shown lossily as
//! UTF-8 in both.

use crate::error::Error;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Tokens produced from one input line.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRow {
    /// One-based line number, or 1 for inline text.
    pub line: usize,
    /// The tokens, in order.
    pub tokens: Vec<String>,
}

/// Formats split results.
#[must_use]
pub fn format_tokens(rows: &[TokenRow], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for row in rows {
                let _ = writeln!(output, "Line {}: {} tokens", row.line, row.tokens.len());
                for (i, token) in row.tokens.iter().enumerate() {
                    let _ = writeln!(output, "  [{i}] {}", escape(token));
                }
            }
            output
        }
        OutputFormat::Json => format_json(&rows),
    }
}

/// Formats the lines of a file.
#[must_use]
pub fn format_lines(lines: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for (i, line) in lines.iter().enumerate() {
                let _ = writeln!(output, "{:>6}  {}", i + 1, escape(line));
            }
            output
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct LinesOutput<'a> {
                count: usize,
                lines: &'a [String],
            }
            format_json(&LinesOutput {
                count: lines.len(),
                lines,
            })
        }
    }
}

/// Formats a search result; `offset` is `None` when nothing matched.
#[must_use]
pub fn format_find(needle: &str, offset: Option<usize>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => offset.map_or_else(
            || format!("Not found: {needle}\n"),
            |offset| format!("Found at byte {offset}\n"),
        ),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct FindOutput<'a> {
                needle: &'a str,
                found: bool,
                offset: Option<usize>,
            }
            format_json(&FindOutput {
                needle,
                found: offset.is_some(),
                offset,
            })
        }
    }
}

/// Formats the outcome of a replace.
#[must_use]
pub fn format_replace(result: &str, replacements: usize, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "{result}");
            let _ = writeln!(output, "({replacements} replaced)");
            output
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ReplaceOutput<'a> {
                result: &'a str,
                replacements: usize,
            }
            format_json(&ReplaceOutput {
                result,
                replacements,
            })
        }
    }
}

/// A parsed number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Number {
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit float.
    Float(f64),
}

/// Formats a parsed number.
#[must_use]
pub fn format_number(number: Number, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => match number {
            Number::Integer(value) => format!("{value}\n"),
            Number::Float(value) => format!("{value}\n"),
        },
        OutputFormat::Json => format_json(&number),
    }
}

/// Formats a comparison result.
#[must_use]
pub fn format_ordering(left: &str, right: &str, ordering: Ordering, format: OutputFormat) -> String {
    let (word, symbol, sign) = match ordering {
        Ordering::Less => ("less", "<", -1),
        Ordering::Equal => ("equal", "==", 0),
        Ordering::Greater => ("greater", ">", 1),
    };
    match format {
        OutputFormat::Text => format!("{} {symbol} {}\n", escape(left), escape(right)),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct CompareOutput<'a> {
                ordering: &'a str,
                sign: i8,
            }
            format_json(&CompareOutput {
                ordering: word,
                sign,
            })
        }
    }
}

/// Formats an error.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput {
                error: String,
            }
            format_json(&ErrorOutput {
                error: error.to_string(),
            })
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Makes control characters visible in text output.
fn escape(s: &str) -> String {
    s.replace('\r', "\\r").replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BufferError;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("unknown"), OutputFormat::Text);
    }

    #[test]
    fn test_format_tokens() {
        let rows = vec![TokenRow {
            line: 1,
            tokens: vec!["a".to_string(), String::new()],
        }];
        let text = format_tokens(&rows, OutputFormat::Text);
        assert!(text.contains("Line 1: 2 tokens"));
        assert!(text.contains("  [0] a"));

        let json = format_tokens(&rows, OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["tokens"][1], "");
    }

    #[test]
    fn test_format_lines_escapes_carriage_return() {
        let lines = vec!["a\r".to_string()];
        assert_eq!(format_lines(&lines, OutputFormat::Text), "     1  a\\r\n");
        assert!(format_lines(&lines, OutputFormat::Json).contains("\"count\": 1"));
    }

    #[test]
    fn test_format_find() {
        assert_eq!(format_find("x", Some(3), OutputFormat::Text), "Found at byte 3\n");
        assert_eq!(format_find("x", None, OutputFormat::Text), "Not found: x\n");
        assert!(format_find("x", None, OutputFormat::Json).contains("\"found\": false"));
    }

    #[test]
    fn test_format_number_json() {
        let json = format_number(Number::Integer(-4), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["type"], "integer");
        assert_eq!(parsed["value"], -4);
    }

    #[test]
    fn test_format_ordering() {
        assert_eq!(
            format_ordering("a", "b", Ordering::Less, OutputFormat::Text),
            "a < b\n"
        );
        assert!(
            format_ordering("b", "b", Ordering::Equal, OutputFormat::Json)
                .contains("\"ordering\": \"equal\"")
        );
    }

    #[test]
    fn test_format_error() {
        let error = Error::from(BufferError::NotFound);
        assert!(format_error(&error, OutputFormat::Json).contains("\"error\""));
        assert_eq!(format_error(&error, OutputFormat::Text), error.to_string());
    }
}
